//! Application services: use-cases that coordinate ports and the store.

pub mod loader;

pub use loader::FleetLoader;
