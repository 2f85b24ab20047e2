//! End-to-end smoke tests for the full fleetdashd stack.
//!
//! Each test loads the built-in sample fleet through the real loader, wraps
//! it in a store frozen at the sample's reference instant and exercises the
//! HTTP layer via `tower::ServiceExt::oneshot`. No TCP port is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use fleetdash_adapter_demo::{DemoSource, demo_departments, demo_employees, demo_now};
use fleetdash_adapter_http_axum::router;
use fleetdash_adapter_http_axum::session::USER_HEADER;
use fleetdash_adapter_http_axum::state::AppState;
use fleetdash_app::ports::TracingNotifier;
use fleetdash_app::services::FleetLoader;
use fleetdash_app::store::FleetStore;
use fleetdash_domain::id::EmployeeId;
use fleetdash_domain::time::FixedClock;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

type DemoState = AppState<Arc<TracingNotifier>, FixedClock>;

/// Build fully-wired state backed by the demo source.
async fn app_state() -> DemoState {
    let mut snapshot = FleetLoader::new(DemoSource).load().await;
    snapshot.employees = demo_employees();
    snapshot.departments = demo_departments();
    let store = FleetStore::from_snapshot(
        snapshot,
        Arc::new(TracingNotifier),
        FixedClock(demo_now()),
    );
    AppState::new(store, EmployeeId::new(1))
}

async fn call(state: &DemoState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router::build(state.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, user: u64, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header(USER_HEADER, user.to_string())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_as(uri: &str, user: u64) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(USER_HEADER, user.to_string())
        .body(Body::empty())
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let response = router::build(app_state().await)
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Dashboard reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_summarize_sample_fleet() {
    let (status, body) = call(&app_state().await, get("/api/summary")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({
        "totalVehicles": 19,
        "availableNow": 14,
        "bookedToday": 5,
        "upcomingReservations": 2,
        "pendingApprovals": 2
    }));
}

#[tokio::test]
async fn should_list_vehicles_sorted_by_plate_with_derived_status() {
    let (status, body) = call(&app_state().await, get("/api/vehicles")).await;

    assert_eq!(status, StatusCode::OK);
    let vehicles = body.as_array().unwrap();
    assert_eq!(vehicles.len(), 19);
    assert_eq!(vehicles[0]["plate"], "BG1645-XB");
    let booked = vehicles.iter().filter(|v| v["status"] == "booked").count();
    assert_eq!(booked, 5);
}

#[tokio::test]
async fn should_compute_weekly_usage() {
    let state = app_state().await;

    let (_, all) = call(&state, get("/api/analytics?from=2026-01-11&to=2026-01-17")).await;
    let (_, engineering) = call(
        &state,
        get("/api/analytics?from=2026-01-11&to=2026-01-17&department=Engineering%20-%20Design"),
    )
    .await;

    assert_eq!(all, json!({ "vehicleDays": 15, "estimatedKm": 2070 }));
    assert_eq!(engineering, json!({ "vehicleDays": 3, "estimatedKm": 450 }));
}

#[tokio::test]
async fn should_list_sector_labels_in_tree_order() {
    let (_, body) = call(&app_state().await, get("/api/sectors")).await;

    let labels = body.as_array().unwrap();
    assert_eq!(labels.len(), 10);
    assert_eq!(labels[0], "Management");
    assert_eq!(labels[3], "Engineering - Design");
}

// ---------------------------------------------------------------------------
// Reservation workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_run_reservation_through_approval() {
    let state = app_state().await;
    let draft = json!({
        "vehicleId": "8",
        "projectId": "3",
        "startDate": "2026-01-12T08:00",
        "endDate": "2026-01-12T18:00",
        "notes": "Survey run"
    });

    let (created, reservation) =
        call(&state, send_json("POST", "/api/reservations", 2, &draft)).await;
    assert_eq!(created, StatusCode::CREATED);
    assert_eq!(reservation["id"], "8");
    assert_eq!(reservation["bookerName"], "Maria Silva");
    assert_eq!(reservation["sector"], "Engineering - Design");

    let (forbidden, _) = call(&state, post_as("/api/reservations/8/approve", 2)).await;
    assert_eq!(forbidden, StatusCode::FORBIDDEN);

    let (approved, body) = call(&state, post_as("/api/reservations/8/approve", 1)).await;
    assert_eq!(approved, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["approvedBy"], "John Smith");

    let (_, status) = call(&state, get("/api/vehicles/8/status?at=2026-01-12T12:00")).await;
    assert_eq!(status["status"], "booked");

    let (_, activities) = call(&state, get("/api/activities")).await;
    assert_eq!(
        activities[0]["message"],
        "Reservation for BG2792-GB approved for Maria Silva"
    );
    assert_eq!(
        activities[1]["message"],
        "New reservation for BG2792-GB by Maria Silva"
    );
}

#[tokio::test]
async fn should_refuse_double_booking() {
    let state = app_state().await;
    let draft = json!({
        "vehicleId": "10",
        "startDate": "2026-01-15T17:00",
        "endDate": "2026-01-16T09:00"
    });

    let (status, body) = call(&state, send_json("POST", "/api/reservations", 3, &draft)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["conflict"]["bookerName"], "Pedro Alves");
    let (_, activities) = call(&state, get("/api/activities")).await;
    assert!(activities.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_group_my_reservations() {
    let state = app_state().await;
    let request = Request::builder()
        .uri("/api/me/reservations")
        .header(USER_HEADER, "7")
        .body(Body::empty())
        .unwrap();

    let (status, body) = call(&state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["active"].as_array().unwrap().is_empty());
    assert_eq!(body["pending"][0]["id"], "6");
}

#[tokio::test]
async fn should_show_pending_and_booked_days_on_timeline() {
    let (_, rows) = call(&app_state().await, get("/api/timeline?start=2026-01-11&days=7")).await;

    let row = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["plate"] == "BG2795-VO")
        .unwrap();
    let states: Vec<_> = row["cells"]
        .as_array()
        .unwrap()
        .iter()
        .map(|cell| cell["state"].as_str().unwrap())
        .collect();
    assert_eq!(states, [
        "available", "available", "available", "pending", "available", "available", "available"
    ]);
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_add_and_remove_project() {
    let state = app_state().await;
    let draft = json!({ "name": "Coastal Survey", "kmPerDay": 90 });

    let (created, project) = call(&state, send_json("POST", "/api/projects", 1, &draft)).await;
    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/projects/10")
        .body(Body::empty())
        .unwrap();
    let (deleted, _) = call(&state, delete).await;
    let (_, projects) = call(&state, get("/api/projects")).await;

    assert_eq!(created, StatusCode::CREATED);
    assert_eq!(project["id"], "10");
    assert_eq!(deleted, StatusCode::NO_CONTENT);
    assert_eq!(projects.as_array().unwrap().len(), 9);
}
