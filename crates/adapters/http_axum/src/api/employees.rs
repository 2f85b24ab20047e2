//! JSON REST handlers for employees.

use axum::Json;
use axum::extract::{Path, State};
use fleetdash_app::ports::Notifier;
use fleetdash_domain::employee::{Employee, EmployeePatch, NewEmployee};
use fleetdash_domain::id::EmployeeId;
use fleetdash_domain::time::Clock;

use crate::error::ApiError;
use crate::session::ActingUser;
use crate::state::AppState;

response!(ListResponse, Ok(Vec<Employee>));
response!(UpdateResponse, Ok(Employee));
response!(CreateResponse, Created(Employee));
response!(DeleteResponse, NoContent);

pub async fn list<N, C>(State(state): State<AppState<N, C>>) -> ListResponse
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.read().await.employees().to_vec()))
}

pub async fn create<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Json(draft): Json<NewEmployee>,
) -> Result<CreateResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    draft.validate()?;
    let employee = state.write().await.add_employee(&session, draft)?;
    Ok(CreateResponse::Created(Json(employee)))
}

pub async fn update<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
    Path(id): Path<String>,
    Json(patch): Json<EmployeePatch>,
) -> Result<UpdateResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: EmployeeId = id.parse()?;
    let employee = state
        .write()
        .await
        .update_employee(&session, id, patch)
        .ok_or_else(|| ApiError::not_found("Employee", id))?;
    Ok(UpdateResponse::Ok(Json(employee)))
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
    let id: EmployeeId = id.parse()?;
    state
        .write()
        .await
        .delete_employee(&session, id)
        .ok_or_else(|| ApiError::not_found("Employee", id))?;
    Ok(DeleteResponse::NoContent)
}
