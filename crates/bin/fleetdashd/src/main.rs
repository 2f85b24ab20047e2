//! # fleetdashd — fleetdash daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Load the fleet tables from the configured source
//! - Seed the employee directory and department tree
//! - Build the store and the axum router, then serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use fleetdash_adapter_demo::{DemoSource, demo_departments, demo_employees, demo_now};
use fleetdash_adapter_http_axum::router;
use fleetdash_adapter_http_axum::state::AppState;
use fleetdash_adapter_rest::RestConfig;
use fleetdash_app::ports::TracingNotifier;
use fleetdash_app::services::FleetLoader;
use fleetdash_app::store::{FleetSnapshot, FleetStore};
use fleetdash_domain::id::EmployeeId;
use fleetdash_domain::time::{Clock, FixedClock, SystemClock};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, SourceKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match config.source.kind {
        SourceKind::Demo => {
            let snapshot = FleetLoader::new(DemoSource).load().await;
            serve(&config, seed(snapshot), FixedClock(demo_now())).await
        }
        SourceKind::Rest => {
            let source =
                RestConfig::new(&config.source.rest_url, &config.source.rest_key).build()?;
            let snapshot = FleetLoader::new(source).load().await;
            serve(&config, seed(snapshot), SystemClock).await
        }
    }
}

/// The upstream tables carry no staff or department data.
fn seed(mut snapshot: FleetSnapshot) -> FleetSnapshot {
    snapshot.employees = demo_employees();
    snapshot.departments = demo_departments();
    snapshot
}

async fn serve<C>(config: &Config, snapshot: FleetSnapshot, clock: C) -> anyhow::Result<()>
where
    C: Clock + Send + Sync + 'static,
{
    let default_user = EmployeeId::new(config.session.default_user);
    if !snapshot.employees.iter().any(|e| e.id == default_user) {
        tracing::warn!(%default_user, "default user is not a known employee");
    }

    let store = FleetStore::from_snapshot(snapshot, TracingNotifier, clock);
    let app = router::build(AppState::new(store, default_user));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, source = ?config.source.kind, "fleetdashd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("fleetdashd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
