use crate::GarminError;
use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_BASE_URL: &str = "https://connect.garmin.com";
pub const DEFAULT_SSO_URL: &str = "https://sso.garmin.com/sso";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; https://github.com/andrewcooke/choochoo)";
pub const DEFAULT_ORIGIN: &str = "https://sso.garmin.com";
pub const DEFAULT_CSS_URL: &str =
    "https://static.garmincdn.com/com.garmin.connect/ui/css/gauth-custom-v1.2-min.css";

const ACTIVITIES_PATH: &str = "/proxy/activitylist-service/activities/search/activities";

/// Endpoints and fixed headers used by the client. Immutable once the client
/// is built; tests point `base_url` and `sso_url` at a mock server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GarminConfig {
    pub base_url: String,
    pub sso_url: String,
    pub user_agent: String,
    pub origin: String,
    pub css_url: String,
    /// Log headers, cookies and redirects of every response at debug level.
    pub log_responses: bool,
}

impl Default for GarminConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            sso_url: DEFAULT_SSO_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            origin: DEFAULT_ORIGIN.into(),
            css_url: DEFAULT_CSS_URL.into(),
            log_responses: false,
        }
    }
}

impl GarminConfig {
    /// Production endpoints pointed at another host pair.
    pub fn with_urls(base_url: &str, sso_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            sso_url: sso_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, GarminError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Same as [`GarminConfig::from_env`] but reads through `get`, so tests
    /// don't have to touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, GarminError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url = get("GARMIN_CONNECT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let sso_url = get("GARMIN_CONNECT_SSO_URL").unwrap_or_else(|| DEFAULT_SSO_URL.into());
        let log_responses = match get("GARMIN_CONNECT_LOG_RESPONSES").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(GarminError::Config(format!(
                    "GARMIN_CONNECT_LOG_RESPONSES must be true/false, got {other}"
                )));
            }
        };
        for (name, value) in [("base url", &base_url), ("sso url", &sso_url)] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(GarminError::Config(format!(
                    "{name} must be an http(s) url: {value}"
                )));
            }
        }
        Ok(Self {
            log_responses,
            ..Self::with_urls(&base_url, &sso_url)
        })
    }

    /// The "modern" web app root; the SSO portal redirects here.
    pub fn modern_url(&self) -> String {
        format!("{}/modern", self.base_url)
    }

    pub fn signin_url(&self) -> String {
        format!("{}/signin", self.sso_url)
    }

    pub fn activities_url(&self) -> String {
        format!("{}{}", self.modern_url(), ACTIVITIES_PATH)
    }
}

/// Login credentials. Only held for the duration of a login call.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into().into()),
        }
    }

    pub fn from_env() -> Result<Self, GarminError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    pub fn from_env_with<F>(mut get: F) -> Result<Self, GarminError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let username = get("GARMIN_CONNECT_USERNAME")
            .ok_or_else(|| GarminError::Config("GARMIN_CONNECT_USERNAME missing".into()))?;
        let password = get("GARMIN_CONNECT_PASSWORD")
            .ok_or_else(|| GarminError::Config("GARMIN_CONNECT_PASSWORD missing".into()))?;
        Ok(Self::new(username, password))
    }

    /// Both fields must be non-empty before anything is sent.
    pub fn validate(&self) -> Result<(), GarminError> {
        if self.username.trim().is_empty() {
            return Err(GarminError::InvalidInput("username must not be empty".into()));
        }
        if self.password.expose_secret().is_empty() {
            return Err(GarminError::InvalidInput("password must not be empty".into()));
        }
        Ok(())
    }
}
