//! Build the initial [`FleetSnapshot`] from a [`FleetSource`].

use std::future::Future;

use fleetdash_domain::error::FleetError;

use crate::ports::{FleetSource, Record};
use crate::remap;
use crate::store::FleetSnapshot;

/// Pulls upstream tables and remaps them into domain entities.
pub struct FleetLoader<S> {
    source: S,
}

impl<S: FleetSource> FleetLoader<S> {
    /// Create a new loader reading from the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch vehicles, projects and reservations.
    ///
    /// Projects are remapped first so reservation project names resolve. A
    /// failing table is logged and loaded as empty; employees and departments
    /// are not part of the upstream tables and stay empty.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> FleetSnapshot {
        let projects = remap::projects(&fetch("projects", self.source.list_projects()).await);
        let vehicles = remap::vehicles(&fetch("vehicles", self.source.list_vehicles()).await);
        let reservations = remap::reservations(
            &fetch("reservations", self.source.list_reservations()).await,
            &projects,
        );
        tracing::info!(
            vehicles = vehicles.len(),
            reservations = reservations.len(),
            projects = projects.len(),
            "fleet loaded"
        );
        FleetSnapshot {
            vehicles,
            reservations,
            projects,
            ..FleetSnapshot::default()
        }
    }
}

async fn fetch(
    table: &'static str,
    request: impl Future<Output = Result<Vec<Record>, FleetError>>,
) -> Vec<Record> {
    match request.await {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(table, error = %err, "failed to load table, using an empty one");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetdash_domain::id::{ProjectId, VehicleId};
    use serde_json::json;

    #[derive(Default)]
    struct InMemorySource {
        vehicles: Vec<Record>,
        reservations: Vec<Record>,
        projects: Vec<Record>,
        failing: bool,
    }

    impl InMemorySource {
        fn respond(&self, records: &[Record]) -> Result<Vec<Record>, FleetError> {
            if self.failing {
                Err(FleetError::Source(Box::new(std::io::Error::other(
                    "connection refused",
                ))))
            } else {
                Ok(records.to_vec())
            }
        }
    }

    impl FleetSource for InMemorySource {
        fn list_vehicles(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
            let result = self.respond(&self.vehicles);
            async { result }
        }

        fn list_reservations(
            &self,
        ) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
            let result = self.respond(&self.reservations);
            async { result }
        }

        fn list_projects(&self) -> impl Future<Output = Result<Vec<Record>, FleetError>> + Send {
            let result = self.respond(&self.projects);
            async { result }
        }
    }

    #[tokio::test]
    async fn should_resolve_reservation_project_by_name() {
        let source = InMemorySource {
            vehicles: vec![json!({
                "id": 2, "plate": "BG2765-RL", "model": "Volvo XC60",
                "type": "SUV", "location": "Site A", "status": "booked"
            })],
            reservations: vec![json!({
                "id": 1, "vehicle_id": 2, "booker_name": "Maria Silva",
                "sector": "Engineering - Design", "project": "Northern Highway Project",
                "start_date": "2026-01-11T09:00", "end_date": "2026-01-13T17:00",
                "status": "approved"
            })],
            projects: vec![json!({ "id": 1, "name": "Northern Highway Project" })],
            failing: false,
        };

        let snapshot = FleetLoader::new(source).load().await;

        assert_eq!(snapshot.vehicles[0].id, VehicleId::new(2));
        assert_eq!(snapshot.reservations[0].project_id, Some(ProjectId::new(1)));
        assert!(snapshot.employees.is_empty());
    }

    #[tokio::test]
    async fn should_load_empty_collections_when_source_fails() {
        let source = InMemorySource {
            vehicles: vec![json!({ "id": 1, "plate": "BG2795-VO" })],
            failing: true,
            ..InMemorySource::default()
        };

        let snapshot = FleetLoader::new(source).load().await;

        assert_eq!(snapshot, FleetSnapshot::default());
    }
}
