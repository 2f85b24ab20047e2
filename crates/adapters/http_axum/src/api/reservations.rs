//! JSON REST handlers for reservations and their approval workflow.

use axum::Json;
use axum::extract::{Path, Query, State};
use fleetdash_app::ports::Notifier;
use fleetdash_domain::error::ValidationError;
use fleetdash_domain::id::{ProjectId, ReservationId, VehicleId};
use fleetdash_domain::period::Period;
use fleetdash_domain::reservation::{
    NewReservation, Reservation, ReservationPatch, ReservationStatus,
};
use fleetdash_domain::time::{Clock, parse_timestamp};
use serde::{Deserialize, Serialize};

use super::{non_blank, required};
use crate::error::ApiError;
use crate::session::ActingUser;
use crate::state::AppState;

/// Request body for submitting a reservation.
///
/// A blank `bookerName` or `sector` is filled in from the acting employee.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub vehicle_id: VehicleId,
    #[serde(default)]
    pub booker_name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub vehicle_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictQuery {
    pub vehicle_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConflictBody {
    pub conflict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<Reservation>,
}

/// Possible responses from the list endpoint.
response!(ListResponse, Ok(Vec<Reservation>));

/// Possible responses from the update, approve and reject endpoints.
response!(GetResponse, Ok(Reservation));

/// Possible responses from the create endpoint.
response!(CreateResponse, Created(Reservation));

/// Possible responses from the delete endpoint.
response!(DeleteResponse, NoContent);

/// Possible responses from the conflict check endpoint.
response!(ConflictResponse, Ok(ConflictBody));

fn period(start: &str, end: &str) -> Result<Period, ValidationError> {
    let period = Period::new(parse_timestamp(start)?, parse_timestamp(end)?);
    if period.end < period.start {
        return Err(ValidationError::InvalidValue {
            field: "endDate",
            value: end.to_string(),
        });
    }
    Ok(period)
}

pub async fn list<N, C>(
    State(state): State<AppState<N, C>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let status = non_blank(query.status.as_deref())
        .map(str::parse::<ReservationStatus>)
        .transpose()?;
    let vehicle_id = non_blank(query.vehicle_id.as_deref())
        .map(str::parse::<VehicleId>)
        .transpose()?;

    let reservations = state
        .read()
        .await
        .reservations()
        .iter()
        .filter(|r| status.is_none_or(|s| r.status == s))
        .filter(|r| vehicle_id.is_none_or(|id| r.vehicle_id == id))
        .cloned()
        .collect();
    Ok(ListResponse::Ok(Json(reservations)))
}

/// `POST /api/reservations`: submit for approval, refusing overlaps.
pub async fn create<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Json(request): Json<CreateReservationRequest>,
) -> Result<CreateResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let period = period(&request.start_date, &request.end_date)?;
    let booker = non_blank(request.booker_name.as_deref()).unwrap_or(&session.user.name);
    let sector = non_blank(request.sector.as_deref()).unwrap_or(&session.user.sector);
    let mut builder = NewReservation::builder()
        .vehicle_id(request.vehicle_id)
        .booker_name(booker)
        .sector(sector)
        .period(period.start, period.end);
    if let Some(project_id) = request.project_id {
        builder = builder.project_id(project_id);
    }
    if let Some(notes) = non_blank(request.notes.as_deref()) {
        builder = builder.notes(notes);
    }
    let draft = builder.build()?;

    let mut store = state.write().await;
    if store.vehicle(draft.vehicle_id).is_none() {
        return Err(ApiError::not_found("Vehicle", draft.vehicle_id));
    }
    let reservation = store.submit_reservation(&session, draft)?;
    Ok(CreateResponse::Created(Json(reservation)))
}

pub async fn update<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Path(id): Path<String>,
    Json(patch): Json<ReservationPatch>,
) -> Result<GetResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: ReservationId = id.parse()?;
    let reservation = state
        .write()
        .await
        .update_reservation(&session, id, patch)
        .ok_or_else(|| ApiError::not_found("Reservation", id))?;
    Ok(GetResponse::Ok(Json(reservation)))
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
    let id: ReservationId = id.parse()?;
    state
        .write()
        .await
        .delete_reservation(&session, id)
        .ok_or_else(|| ApiError::not_found("Reservation", id))?;
    Ok(DeleteResponse::NoContent)
}

pub async fn approve<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: ReservationId = id.parse()?;
    let reservation = state.write().await.approve_reservation(&session, id)?;
    Ok(GetResponse::Ok(Json(reservation)))
}

pub async fn reject<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: ReservationId = id.parse()?;
    let reservation = state.write().await.reject_reservation(&session, id)?;
    Ok(GetResponse::Ok(Json(reservation)))
}

/// `GET /api/reservations/conflict?vehicleId&start&end`
pub async fn conflict<N, C>(
    State(state): State<AppState<N, C>>,
    Query(query): Query<ConflictQuery>,
) -> Result<ConflictResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let vehicle_id: VehicleId = required(query.vehicle_id.as_deref(), "vehicleId")?.parse()?;
    let period = period(
        required(query.start.as_deref(), "start")?,
        required(query.end.as_deref(), "end")?,
    )?;

    let reservation = state
        .read()
        .await
        .find_conflict(vehicle_id, &period)
        .cloned();
    Ok(ConflictResponse::Ok(Json(ConflictBody {
        conflict: reservation.is_some(),
        reservation,
    })))
}
