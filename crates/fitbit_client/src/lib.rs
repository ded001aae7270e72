//! Heart-rate endpoints of the Fitbit Web API: argument validation, resource
//! path construction and an async transport seam.

use async_trait::async_trait;
use thiserror::Error;

pub mod config;
pub mod deprecation;
pub mod heartrate;
pub mod http_client;
pub mod utils;

pub use deprecation::{DeprecationNotice, Deprecations};
pub use heartrate::{
    DateRangeOptions, DateSpec, DetailLevel, HeartRateClient, HeartRateQuery, IntradayOptions,
    Period, PeriodOptions, TimeSeriesOptions, TimeSpec,
};

#[derive(Debug, Error)]
pub enum FitbitError {
    /// Rejected caller input. Raised before any request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("api error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("configuration error: {0}")]
    Config(String),
}

impl FitbitError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FitbitError::InvalidArgument(msg.into())
    }

    /// Map a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => FitbitError::Auth(body),
            404 => FitbitError::NotFound(body),
            429 => FitbitError::RateLimited(body),
            _ => FitbitError::Api { status, body },
        }
    }
}

/// Authenticated GET against the Fitbit API, relative to its versioned base URL.
///
/// Implementors own bearer-token attachment and transport concerns; callers
/// hand over a resource path such as `user/-/activities/heart/date/today/1d.json`
/// and get the parsed body back.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, FitbitError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, FitbitError> {
        (**self).get_json(path).await
    }
}

/// Supplies the account identifier placed in every resource path.
pub trait UserContext: Send + Sync {
    fn user_id(&self) -> String;
}

impl UserContext for String {
    fn user_id(&self) -> String {
        self.clone()
    }
}

impl UserContext for &'static str {
    fn user_id(&self) -> String {
        (*self).to_string()
    }
}
