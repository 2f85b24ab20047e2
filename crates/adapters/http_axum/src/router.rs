//! HTTP router construction.

use axum::Router;
use axum::routing::get;
use fleetdash_app::ports::Notifier;
use fleetdash_domain::time::Clock;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::state::AppState;

/// Build the full axum router: `/health` plus the JSON API under `/api`.
pub fn build<N, C>(state: AppState<N, C>) -> Router
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .nest("/api", api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
