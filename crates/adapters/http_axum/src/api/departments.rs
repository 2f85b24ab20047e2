//! JSON REST handlers for the department tree.

use axum::Json;
use axum::extract::{Path, State};
use fleetdash_app::ports::Notifier;
use fleetdash_domain::department::{Department, DepartmentPatch, NewDepartment};
use fleetdash_domain::id::DepartmentId;
use fleetdash_domain::time::Clock;

use crate::error::ApiError;
use crate::state::AppState;

response!(ListResponse, Ok(Vec<Department>));
response!(SectorsResponse, Ok(Vec<String>));
response!(UpdateResponse, Ok(Department));
response!(CreateResponse, Created(Department));

// Delete answers with every department it removed.
response!(DeleteResponse, Ok(Vec<Department>));

pub async fn list<N, C>(State(state): State<AppState<N, C>>) -> ListResponse
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.read().await.departments().to_vec()))
}

/// `GET /api/sectors`: flattened `"<parent> - <child>"` labels in tree order.
pub async fn sectors<N, C>(State(state): State<AppState<N, C>>) -> SectorsResponse
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    SectorsResponse::Ok(Json(state.read().await.sector_labels()))
}

pub async fn create<N, C>(
    State(state): State<AppState<N, C>>,
    Json(draft): Json<NewDepartment>,
) -> Result<CreateResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    draft.validate()?;
    let mut store = state.write().await;
    if let Some(parent) = &draft.parent
        && !store.departments().iter().any(|d| &d.id == parent)
    {
        return Err(ApiError::not_found("Department", parent));
    }
    let department = store.add_department(draft);
    Ok(CreateResponse::Created(Json(department)))
}

pub async fn update<N, C>(
    State(state): State<AppState<N, C>>,
    Path(id): Path<String>,
    Json(patch): Json<DepartmentPatch>,
) -> Result<UpdateResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = DepartmentId::new(id);
    let department = state
        .write()
        .await
        .update_department(&id, patch)
        .ok_or_else(|| ApiError::not_found("Department", &id))?;
    Ok(UpdateResponse::Ok(Json(department)))
}

pub async fn delete<N, C>(
    State(state): State<AppState<N, C>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = DepartmentId::new(id);
    let removed = state
        .write()
        .await
        .delete_department(&id)
        .ok_or_else(|| ApiError::not_found("Department", &id))?;
    Ok(DeleteResponse::Ok(Json(removed)))
}
