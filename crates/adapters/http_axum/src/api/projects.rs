//! JSON REST handlers for projects.

use axum::Json;
use axum::extract::{Path, State};
use fleetdash_app::ports::Notifier;
use fleetdash_domain::id::ProjectId;
use fleetdash_domain::project::{NewProject, Project, ProjectPatch};
use fleetdash_domain::time::Clock;

use crate::error::ApiError;
use crate::state::AppState;

response!(ListResponse, Ok(Vec<Project>));
response!(UpdateResponse, Ok(Project));
response!(CreateResponse, Created(Project));
response!(DeleteResponse, NoContent);

pub async fn list<N, C>(State(state): State<AppState<N, C>>) -> ListResponse
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    ListResponse::Ok(Json(state.read().await.projects().to_vec()))
}

pub async fn create<N, C>(
    State(state): State<AppState<N, C>>,
    Json(draft): Json<NewProject>,
) -> Result<CreateResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    draft.validate()?;
    let project = state.write().await.add_project(draft)?;
    Ok(CreateResponse::Created(Json(project)))
}

pub async fn update<N, C>(
    State(state): State<AppState<N, C>>,
    Path(id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> Result<UpdateResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: ProjectId = id.parse()?;
    let project = state
        .write()
        .await
        .update_project(id, patch)
        .ok_or_else(|| ApiError::not_found("Project", id))?;
    Ok(UpdateResponse::Ok(Json(project)))
}

/// Reservations that reference the project keep their dangling id.
pub async fn delete<N, C>(
    State(state): State<AppState<N, C>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id: ProjectId = id.parse()?;
    state
        .write()
        .await
        .delete_project(id)
        .ok_or_else(|| ApiError::not_found("Project", id))?;
    Ok(DeleteResponse::NoContent)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    use crate::router::tests::{json_request, send, state};

    #[tokio::test]
    async fn should_create_project_with_rate() {
        let draft = json!({ "name": "Road Maintenance", "kmPerDay": 150 });

        let (status, body) = send(&state(), json_request("POST", "/api/projects", &draft)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "2");
        assert_eq!(body["kmPerDay"], 150);
    }

    #[tokio::test]
    async fn should_keep_reservation_project_id_after_delete() {
        let state = state();
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/projects/1")
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(&state, request).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        let store = state.read().await;
        assert!(store.projects().is_empty());
        assert!(store.reservations()[0].project_id.is_some());
    }
}
