//! # fleetdash-adapter-demo
//!
//! Built-in sample fleet for demos and local development.
//!
//! ## Provided data
//!
//! | Table | Rows | Shape |
//! |-------|------|-------|
//! | vehicles | 19 | upstream rows (`location`, `last_user`) |
//! | reservations | 7 | upstream rows, projects referenced by name |
//! | projects | 9 | upstream rows (`km_per_day`) |
//! | employees | 8 | canonical [`Employee`](fleetdash_domain::employee::Employee) |
//! | departments | 10 | canonical two-level tree |
//!
//! The sample is consistent as of [`demo_now`]: every vehicle marked booked
//! has an approved reservation running at that instant.
//!
//! ## Dependency rule
//!
//! Depends on `fleetdash-app` (port traits) and `fleetdash-domain` only.

mod directory;
mod records;

use std::future::Future;

use chrono::{TimeZone, Utc};
use fleetdash_app::ports::{FleetSource, Record};
use fleetdash_domain::error::FleetError;
use fleetdash_domain::time::Timestamp;

pub use directory::{demo_departments, demo_employees};

/// The instant the sample data describes: 2026-01-11 10:00 UTC.
#[must_use]
pub fn demo_now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 1, 11, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

/// [`FleetSource`] serving the built-in sample rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoSource;

impl FleetSource for DemoSource {
    fn list_vehicles(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
        async { Ok(records::vehicles()) }
    }

    fn list_reservations(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
        async { Ok(records::reservations()) }
    }

    fn list_projects(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
        async { Ok(records::projects()) }
    }
}
