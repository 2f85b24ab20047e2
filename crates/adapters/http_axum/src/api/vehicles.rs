//! JSON REST handlers for vehicles.

use axum::Json;
use axum::extract::{Path, Query, State};
use fleetdash_app::ports::Notifier;
use fleetdash_domain::availability::Availability;
use fleetdash_domain::id::VehicleId;
use fleetdash_domain::time::{Clock, Timestamp, parse_timestamp};
use fleetdash_domain::vehicle::{NewVehicle, Vehicle, VehiclePatch};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::session::ActingUser;
use crate::state::AppState;

/// Query parameters for the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of model, plate or type.
    pub search: Option<String>,
}

/// Query parameters for the status endpoint. `at` defaults to now.
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub vehicle_id: VehicleId,
    pub at: Timestamp,
    pub status: Availability,
}

/// Possible responses from the list endpoint.
response!(ListResponse, Ok(Vec<Vehicle>));

/// Possible responses from the get and update endpoints.
response!(GetResponse, Ok(Vehicle));

/// Possible responses from the create endpoint.
response!(CreateResponse, Created(Vehicle));

/// Possible responses from the delete endpoint.
response!(DeleteResponse, NoContent);

/// Possible responses from the status endpoint.
response!(StatusResponse, Ok(StatusBody));

/// `GET /api/vehicles`, with statuses derived at the current instant.
pub async fn list<N, C>(
    State(state): State<AppState<N, C>>,
    Query(query): Query<ListQuery>,
) -> ListResponse
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let store = state.read().await;
    let vehicles = match query.search.as_deref() {
        Some(search) => store.search_vehicles(search),
        None => store.vehicles(),
    };
    ListResponse::Ok(Json(vehicles))
}

pub async fn get<N, C>(
    State(state): State<AppState<N, C>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: VehicleId = id.parse()?;
    let vehicle = state
        .read()
        .await
        .vehicle(id)
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;
    Ok(GetResponse::Ok(Json(vehicle)))
}

pub async fn create<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Json(draft): Json<NewVehicle>,
) -> Result<CreateResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    draft.validate()?;
    let vehicle = state.write().await.add_vehicle(&session, draft)?;
    Ok(CreateResponse::Created(Json(vehicle)))
}

pub async fn update<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Path(id): Path<String>,
    Json(patch): Json<VehiclePatch>,
) -> Result<GetResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: VehicleId = id.parse()?;
    let vehicle = state
        .write()
        .await
        .update_vehicle(&session, id, patch)
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;
    Ok(GetResponse::Ok(Json(vehicle)))
}

pub async fn delete<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: VehicleId = id.parse()?;
    state
        .write()
        .await
        .delete_vehicle(&session, id)
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /api/vehicles/{id}/status?at=`
pub async fn status<N, C>(
    State(state): State<AppState<N, C>>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<StatusResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: VehicleId = id.parse()?;
    let store = state.read().await;
    let at = match query.at.as_deref() {
        Some(raw) => parse_timestamp(raw)?,
        None => store.now(),
    };
    let status = store
        .status_at(id, at)
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;
    Ok(StatusResponse::Ok(Json(StatusBody {
        vehicle_id: id,
        at,
        status,
    })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::router::tests::{get_request, json_request, send, state};

    #[tokio::test]
    async fn should_list_vehicles_with_derived_status() {
        let (status, body) = send(&state(), get_request("/api/vehicles")).await;

        assert_eq!(status, StatusCode::OK);
        let vehicles = body.as_array().unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[1]["id"], "2");
        assert_eq!(vehicles[1]["status"], "booked");
        assert_eq!(vehicles[0]["status"], "available");
    }

    #[tokio::test]
    async fn should_filter_vehicles_by_search() {
        let (_, body) = send(&state(), get_request("/api/vehicles?search=van")).await;

        let vehicles = body.as_array().unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0]["plate"], "BG2765-RL");
    }

    #[tokio::test]
    async fn should_create_vehicle_with_next_id() {
        let state = state();
        let draft = json!({ "model": "Fiat Doblo", "plate": "BG2700-LU", "type": "Van" });

        let (status, body) = send(&state, json_request("POST", "/api/vehicles", &draft)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "3");
        assert_eq!(body["status"], "available");
        assert_eq!(state.read().await.activities().count(), 1);
    }

    #[tokio::test]
    async fn should_reject_vehicle_without_plate() {
        let draft = json!({ "model": "Fiat Doblo", "plate": " ", "type": "Van" });

        let (status, body) = send(&state(), json_request("POST", "/api/vehicles", &draft)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "field `plate` must not be empty");
    }

    #[tokio::test]
    async fn should_patch_vehicle_location() {
        let patch = json!({ "currentLocation": "North Site" });

        let (status, body) =
            send(&state(), json_request("PATCH", "/api/vehicles/1", &patch)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentLocation"], "North Site");
        assert_eq!(body["plate"], "BG1671-TO");
    }

    #[tokio::test]
    async fn should_report_derived_status_after_patch() {
        let state = state();
        let patch = json!({ "currentLocation": "Site A" });

        let (_, fetched) = send(&state, get_request("/api/vehicles/2")).await;
        let (status, patched) =
            send(&state, json_request("PATCH", "/api/vehicles/2", &patch)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["status"], "booked");
        assert_eq!(patched["status"], fetched["status"]);
        assert_eq!(patched["currentLocation"], "Site A");
    }

    #[tokio::test]
    async fn should_return_404_when_deleting_unknown_vehicle() {
        let request = axum::http::Request::builder()
            .method("DELETE")
            .uri("/api/vehicles/99")
            .body(axum::body::Body::empty())
            .unwrap();

        let (status, _) = send(&state(), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_400_for_non_numeric_id() {
        let (status, _) = send(&state(), get_request("/api/vehicles/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_report_status_at_instant() {
        let state = state();

        let (_, during) = send(
            &state,
            get_request("/api/vehicles/2/status?at=2026-01-12T12:00:00Z"),
        )
        .await;
        let (_, after) = send(
            &state,
            get_request("/api/vehicles/2/status?at=2026-01-14T12:00"),
        )
        .await;

        assert_eq!(during["status"], "booked");
        assert_eq!(after["status"], "available");
    }
}
