//! HTTP transport for the Fitbit Web API.
//!
//! This module provides a reqwest-based implementation of the [`HttpTransport`](crate::HttpTransport) trait.

use crate::{FitbitError, HttpTransport};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_BASE_URL: &str = "https://api.fitbit.com/1";

/// Bearer-token transport for the Fitbit API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    base_url: String,
    access_token: SecretString,
    locale: Option<String>,
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport.
    ///
    /// # Arguments
    /// * `base_url` - The versioned API root (e.g., "https://api.fitbit.com/1")
    /// * `access_token` - OAuth2 bearer token for the user
    pub fn new(base_url: &str, access_token: SecretString) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, access_token)
    }

    /// Reuse an existing reqwest client (connection pool, timeouts, proxies).
    pub fn with_client(client: reqwest::Client, base_url: &str, access_token: SecretString) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            locale: None,
            client,
        }
    }

    /// Send `Accept-Language`/`Accept-Locale`, which select the unit system
    /// and formatting of some Fitbit responses.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        let req = self
            .client
            .get(url)
            .bearer_auth(self.access_token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.locale {
            Some(locale) => req
                .header(reqwest::header::ACCEPT_LANGUAGE, locale.as_str())
                .header("Accept-Locale", locale.as_str()),
            None => req,
        }
    }

    /// Handle a response, converting status codes to appropriate errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, FitbitError> {
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> FitbitError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        tracing::debug!(status, body = %body_snippet, "fitbit request failed");
        FitbitError::from_status(status, body_snippet)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, FitbitError> {
        let url = self.url_for(path);
        tracing::debug!(%url, "GET");
        let resp = self.get_request(&url).send().await?;
        self.handle_response(resp).await
    }
}
