//! Garmin Connect SSO login and activity export.
//!
//! The flow is always the same: build a [`http_client::ReqwestGarminClient`],
//! [`GarminClient::login`], fetch a [`DateRange`] with
//! [`GarminClient::get_activities`], then hand the payload to one of the
//! writers in [`export`].

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub mod config;
pub mod export;
pub mod http_client;
pub mod session;
pub mod utils;

pub use config::{Credentials, GarminConfig};
pub use export::{ExportFormat, download_activities, export_csv, export_json};
pub use utils::DateRange;

#[derive(Debug, Error)]
pub enum GarminError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http status {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("cannot write {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot export an empty activity list as csv")]
    EmptyPayload,
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl GarminError {
    /// True for transport failures and non-success HTTP statuses.
    pub fn is_http(&self) -> bool {
        matches!(self, GarminError::Http(_) | GarminError::Status { .. })
    }

    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GarminError::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// One activity as returned by the remote service. Its shape is owned by
/// Garmin and is not validated here.
pub type ActivityRecord = serde_json::Map<String, serde_json::Value>;

/// The records returned by a single fetch, in service order.
pub type ActivityBatch = Vec<ActivityRecord>;

#[async_trait]
pub trait GarminClient: Send + Sync + 'static {
    /// Run the SSO handshake. On success the session carries the cookies
    /// required by every later call.
    async fn login(&self, credentials: &Credentials) -> Result<(), GarminError>;

    /// Fetch one page of activities for `range` and return the raw body.
    ///
    /// The service caps the number of records per call; wide ranges are
    /// truncated, not paginated.
    async fn get_activities(&self, range: &DateRange) -> Result<String, GarminError>;

    /// Like [`GarminClient::get_activities`] but decoded into records.
    async fn get_activity_batch(&self, range: &DateRange) -> Result<ActivityBatch, GarminError> {
        let body = self.get_activities(range).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
