//! Read-only dashboard views: summary figures, usage analytics, the
//! availability timeline, the caller's own reservations and recent activity.

use axum::Json;
use axum::extract::{Query, State};
use chrono::NaiveDate;
use fleetdash_app::ports::Notifier;
use fleetdash_domain::activity::Activity;
use fleetdash_domain::analytics::{FleetSummary, Selection, UsageFilter, UsageReport};
use fleetdash_domain::error::ValidationError;
use fleetdash_domain::id::ProjectId;
use fleetdash_domain::period::DayRange;
use fleetdash_domain::project::Project;
use fleetdash_domain::time::{Clock, parse_timestamp};
use fleetdash_domain::timeline::{BookerReservations, TimelineRow};
use serde::Deserialize;

use super::{non_blank, required};
use crate::error::ApiError;
use crate::session::ActingUser;
use crate::state::AppState;

const DEFAULT_TIMELINE_DAYS: u32 = 7;
const MAX_TIMELINE_DAYS: u32 = 31;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub department: Option<String>,
    /// Project id or exact project name.
    pub project: Option<String>,
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub start: Option<String>,
    pub days: Option<u32>,
}

response!(SummaryResponse, Ok(FleetSummary));
response!(AnalyticsResponse, Ok(UsageReport));
response!(TimelineResponse, Ok(Vec<TimelineRow>));
response!(MyReservationsResponse, Ok(BookerReservations));
response!(ActivitiesResponse, Ok(Vec<Activity>));

/// Calendar day of a date or timestamp parameter.
fn day(raw: &str) -> Result<NaiveDate, ValidationError> {
    parse_timestamp(raw).map(|ts| ts.date_naive())
}

fn project_selection(
    raw: Option<&str>,
    projects: &[Project],
) -> Result<Selection<ProjectId>, ValidationError> {
    let Selection::Only(reference) = Selection::from_text(raw) else {
        return Ok(Selection::Any);
    };
    projects
        .iter()
        .find(|p| p.name == reference)
        .or_else(|| {
            let id = reference.parse::<ProjectId>().ok()?;
            projects.iter().find(|p| p.id == id)
        })
        .map(|p| Selection::Only(p.id))
        .ok_or(ValidationError::InvalidValue {
            field: "project",
            value: reference,
        })
}

pub async fn summary<N, C>(State(state): State<AppState<N, C>>) -> SummaryResponse
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    SummaryResponse::Ok(Json(state.read().await.summary()))
}

/// `GET /api/analytics?from&to&department&project&vehicleType`
///
/// `from` and `to` are inclusive days; `all`-style filter values match everything.
pub async fn analytics<N, C>(
    State(state): State<AppState<N, C>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<AnalyticsResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let range = DayRange::new(
        day(required(query.from.as_deref(), "from")?)?,
        day(required(query.to.as_deref(), "to")?)?,
    );
    if range.to < range.from {
        return Err(ValidationError::InvalidValue {
            field: "to",
            value: range.to.to_string(),
        }
        .into());
    }

    let store = state.read().await;
    let filter = UsageFilter {
        department: Selection::from_text(query.department.as_deref()),
        project: project_selection(query.project.as_deref(), store.projects())?,
        vehicle_type: Selection::from_text(query.vehicle_type.as_deref()),
    };
    Ok(AnalyticsResponse::Ok(Json(store.usage(range, &filter))))
}

/// `GET /api/timeline?start&days`, defaulting to a week from today.
pub async fn timeline<N, C>(
    State(state): State<AppState<N, C>>,
    Query(query): Query<TimelineQuery>,
) -> Result<TimelineResponse, ApiError>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let days = query.days.unwrap_or(DEFAULT_TIMELINE_DAYS);
    if !(1..=MAX_TIMELINE_DAYS).contains(&days) {
        return Err(ValidationError::InvalidValue {
            field: "days",
            value: days.to_string(),
        }
        .into());
    }

    let store = state.read().await;
    let start = match non_blank(query.start.as_deref()) {
        Some(raw) => day(raw)?,
        None => store.now().date_naive(),
    };
    Ok(TimelineResponse::Ok(Json(store.timeline(start, days))))
}

pub async fn my_reservations<N, C>(
    State(state): State<AppState<N, C>>,
    ActingUser(session): ActingUser,
) -> MyReservationsResponse
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    MyReservationsResponse::Ok(Json(state.read().await.reservations_of(&session)))
}

/// Most recent first.
pub async fn activities<N, C>(State(state): State<AppState<N, C>>) -> ActivitiesResponse
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    ActivitiesResponse::Ok(Json(state.read().await.activities().cloned().collect()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    use crate::router::tests::{get_request, json_request, send, state};
    use crate::session::USER_HEADER;

    #[tokio::test]
    async fn should_summarize_fleet() {
        let (status, body) = send(&state(), get_request("/api/summary")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({
            "totalVehicles": 2,
            "availableNow": 1,
            "bookedToday": 1,
            "upcomingReservations": 0,
            "pendingApprovals": 0
        }));
    }

    #[tokio::test]
    async fn should_compute_vehicle_days_and_km() {
        let (status, body) = send(
            &state(),
            get_request("/api/analytics?from=2026-01-11&to=2026-01-17&department=All%20Departments"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "vehicleDays": 3, "estimatedKm": 300 }));
    }

    #[tokio::test]
    async fn should_filter_analytics_by_project_name_and_type() {
        let state = state();

        let (_, by_name) = send(
            &state,
            get_request("/api/analytics?from=2026-01-11&to=2026-01-17&project=Bridge%20Renovation"),
        )
        .await;
        let (_, wrong_type) = send(
            &state,
            get_request("/api/analytics?from=2026-01-11&to=2026-01-17&vehicleType=SUV"),
        )
        .await;

        assert_eq!(by_name["vehicleDays"], 3);
        assert_eq!(wrong_type["vehicleDays"], 0);
    }

    #[tokio::test]
    async fn should_reject_unknown_project_filter() {
        let (status, _) = send(
            &state(),
            get_request("/api/analytics?from=2026-01-11&to=2026-01-17&project=Unknown"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_unknown_project_id_filter() {
        let (status, body) = send(
            &state(),
            get_request("/api/analytics?from=2026-01-11&to=2026-01-17&project=999"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("999"));
    }

    #[tokio::test]
    async fn should_accept_known_project_id_filter() {
        let (status, body) = send(
            &state(),
            get_request("/api/analytics?from=2026-01-11&to=2026-01-17&project=1"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vehicleDays"], 3);
    }

    #[tokio::test]
    async fn should_require_analytics_range() {
        let (status, _) = send(&state(), get_request("/api/analytics?from=2026-01-11")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_render_week_timeline_from_today() {
        let (status, body) = send(&state(), get_request("/api/timeline")).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        let cells = rows[1]["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[0]["date"], "2026-01-11");
        assert_eq!(cells[2]["state"], "booked");
        assert_eq!(cells[3]["state"], "available");
    }

    #[tokio::test]
    async fn should_refuse_oversized_timeline() {
        let (status, _) = send(&state(), get_request("/api/timeline?days=90")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_group_reservations_of_acting_user() {
        let request = Request::builder()
            .uri("/api/me/reservations")
            .header(USER_HEADER, "2")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&state(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active"][0]["id"], "1");
        assert!(body["pending"].as_array().unwrap().is_empty());
        assert!(body["past"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_activities_newest_first() {
        let state = state();
        for plate in ["BG0001-AA", "BG0002-BB"] {
            let draft = json!({ "model": "Renault Kangoo", "plate": plate, "type": "Van" });
            send(&state, json_request("POST", "/api/vehicles", &draft)).await;
        }

        let (_, body) = send(&state, get_request("/api/activities")).await;

        let activities = body.as_array().unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0]["message"], "Vehicle BG0002-BB added");
        assert_eq!(activities[0]["type"], "vehicle_added");
        assert_eq!(activities[0]["user"], "John Smith");
    }
}
