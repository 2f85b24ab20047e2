//! REST source error type wrapping reqwest errors.

use fleetdash_domain::error::FleetError;

/// Errors originating from the REST data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The base URL is blank.
    #[error("REST source URL must not be empty")]
    MissingUrl,

    /// Building the client, sending the request or reading the body failed.
    #[error("request to `{table}` failed")]
    Request {
        table: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("`{table}` responded with status {status}")]
    Status { table: &'static str, status: u16 },

    /// Building the HTTP client failed.
    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
}

impl From<SourceError> for FleetError {
    fn from(err: SourceError) -> Self {
        Self::Source(Box::new(err))
    }
}
