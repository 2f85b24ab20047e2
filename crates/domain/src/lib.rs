//! # fleetdash-domain
//!
//! Pure domain model for the fleetdash vehicle reservation dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps and clocks
//! - Define **Vehicles**, **Reservations**, **Employees**, **Projects** and **Departments**
//! - Decide **availability**: containment, closed-interval conflicts, derived vehicle status
//! - Compute **usage analytics** (vehicle-days, estimated kilometers) and dashboard summaries
//! - Keep the bounded **activity log** of recent domain events
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod period;
pub mod time;

pub mod activity;
pub mod analytics;
pub mod availability;
pub mod department;
pub mod employee;
pub mod project;
pub mod reservation;
pub mod timeline;
pub mod vehicle;
