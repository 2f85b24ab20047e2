//! Where the initial fleet records come from.
//!
//! Upstream records are loosely typed (`snake_case` columns, numeric or
//! string ids, empty strings for absent values). They are handed over as raw
//! JSON and turned into domain entities by [`crate::remap`].

use std::future::Future;

use fleetdash_domain::error::FleetError;

/// One upstream row, before remapping.
pub type Record = serde_json::Value;

/// Read-only access to the upstream fleet tables.
///
/// Implementations live in adapter crates (e.g. the REST backend or the
/// built-in demo data).
pub trait FleetSource: Send + Sync {
    /// Vehicle rows, ordered by plate.
    fn list_vehicles(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send;

    /// Reservation rows, ordered by start date.
    fn list_reservations(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send;

    /// Project rows.
    fn list_projects(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send;
}
