//! # fleetdash-adapter-rest
//!
//! Data source reading the fleet tables from a backend-as-a-service REST API
//! (`GET {base}/rest/v1/<table>?select=…&order=…`).
//!
//! ## Responsibilities
//! - Implement the [`FleetSource`] port defined in `fleetdash-app::ports`
//! - Authenticate with the project API key (`apikey` header and bearer token)
//! - Hand rows over untouched; remapping happens in `fleetdash-app::remap`
//!
//! ## Dependency rule
//! Depends on `fleetdash-app` (for port traits) and `fleetdash-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;

use std::future::Future;
use std::time::Duration;

use fleetdash_app::ports::{FleetSource, Record};
use fleetdash_domain::error::FleetError;

pub use error::SourceError;

/// Configuration for the REST data source.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://example.supabase.co`.
    pub base_url: String,
    /// Anonymous API key sent with every request.
    pub api_key: String,
    pub timeout: Duration,
}

impl RestConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Build a [`RestSource`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingUrl`] for a blank URL, or
    /// [`SourceError::Client`] if the HTTP client cannot be built.
    pub fn build(self) -> Result<RestSource, SourceError> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SourceError::MissingUrl);
        }
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(RestSource {
            client,
            base_url,
            api_key: self.api_key,
        })
    }
}

/// [`FleetSource`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct RestSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestSource {
    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch(
        &self,
        table: &'static str,
        select: &str,
        order: Option<&str>,
    ) -> Result<Vec<Record>, SourceError> {
        let mut query = vec![("select", select)];
        if let Some(order) = order {
            query.push(("order", order));
        }
        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|source| SourceError::Request { table, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                table,
                status: status.as_u16(),
            });
        }
        let rows = response
            .json::<Vec<Record>>()
            .await
            .map_err(|source| SourceError::Request { table, source })?;
        tracing::debug!(rows = rows.len(), "table fetched");
        Ok(rows)
    }
}

impl FleetSource for RestSource {
    fn list_vehicles(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
        async move {
            Ok(self
                .fetch("vehicles", "id,plate,model,type,location,status", Some("plate"))
                .await?)
        }
    }

    fn list_reservations(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
        async move { Ok(self.fetch("reservations", "*", Some("start_date")).await?) }
    }

    fn list_projects(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
        async move { Ok(self.fetch("projects", "*", None).await?) }
    }
}
