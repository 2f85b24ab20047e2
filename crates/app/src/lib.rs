//! # fleetdash-app
//!
//! Application layer — the entity store, use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `FleetSource` — upstream records for vehicles, reservations and projects
//!   - `Notifier` — user-facing success/failure notices
//! - Own every collection in the [`store::FleetStore`], the single source of truth
//!   for vehicles, reservations, employees, projects and departments
//! - Carry the acting user explicitly through a [`session::Session`]
//! - Remap loosely-typed upstream records into canonical domain entities
//! - Load the initial snapshot through the [`services::FleetLoader`]
//!
//! ## Dependency rule
//! Depends on `fleetdash-domain` only (plus `serde_json` for upstream records).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod remap;
pub mod services;
pub mod session;
pub mod store;
