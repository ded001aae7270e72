use crate::http_client::DEFAULT_BASE_URL;
use crate::{FitbitError, UserContext};
use secrecy::SecretString;

/// Fitbit's alias for the user who owns the access token.
pub const CURRENT_USER: &str = "-";

#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: SecretString,
    pub user_id: String,
    pub base_url: String,
    pub deprecation_warnings: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, FitbitError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, FitbitError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let token = get("FITBIT_ACCESS_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| FitbitError::Config("FITBIT_ACCESS_TOKEN missing".into()))?;
        let user_id = get("FITBIT_USER_ID")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| CURRENT_USER.into());
        let base_url = get("FITBIT_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let deprecation_warnings = match get("FITBIT_DEPRECATION_WARNINGS") {
            None => true,
            Some(v) => !matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            ),
        };
        Ok(Self {
            access_token: SecretString::new(token.into()),
            user_id,
            base_url,
            deprecation_warnings,
        })
    }
}

impl UserContext for Config {
    fn user_id(&self) -> String {
        self.user_id.clone()
    }
}
