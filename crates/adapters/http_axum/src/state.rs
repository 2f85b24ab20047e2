//! Shared application state for axum handlers.

use std::sync::Arc;

use fleetdash_app::store::FleetStore;
use fleetdash_domain::id::EmployeeId;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// State shared across all axum handlers.
///
/// `default_user` acts for requests that carry no `x-fleet-user` header.
pub struct AppState<N, C> {
    pub store: Arc<RwLock<FleetStore<N, C>>>,
    pub default_user: EmployeeId,
}

impl<N, C> Clone for AppState<N, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            default_user: self.default_user,
        }
    }
}

impl<N, C> AppState<N, C> {
    #[must_use]
    pub fn new(store: FleetStore<N, C>, default_user: EmployeeId) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            default_user,
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, FleetStore<N, C>> {
        self.store.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, FleetStore<N, C>> {
        self.store.write().await
    }
}
