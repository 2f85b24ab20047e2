//! # fleetdash-adapter-http-axum
//!
//! HTTP adapter exposing the fleet store over a JSON REST API.
//!
//! ## Responsibilities
//! - Validate request bodies and query strings before they reach the store
//! - Resolve the acting employee from the `x-fleet-user` header
//! - Map [`fleetdash_domain::error::FleetError`] variants to HTTP status codes
//!
//! ## Dependency rule
//! Depends on `fleetdash-app` and `fleetdash-domain`. The store is shared
//! behind an async `RwLock`; handlers never hold the lock across an `.await`.

pub mod api;
pub mod error;
pub mod router;
pub mod session;
pub mod state;
