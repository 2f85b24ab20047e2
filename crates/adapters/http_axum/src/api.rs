//! JSON REST API handlers.

/// Declare a single-outcome endpoint response and its [`IntoResponse`] impl.
///
/// [`IntoResponse`]: axum::response::IntoResponse
macro_rules! response {
    ($name:ident, Ok($body:ty)) => {
        pub enum $name {
            Ok(::axum::Json<$body>),
        }

        impl ::axum::response::IntoResponse for $name {
            fn into_response(self) -> ::axum::response::Response {
                match self {
                    Self::Ok(json) => ::axum::response::IntoResponse::into_response(json),
                }
            }
        }
    };
    ($name:ident, Created($body:ty)) => {
        pub enum $name {
            Created(::axum::Json<$body>),
        }

        impl ::axum::response::IntoResponse for $name {
            fn into_response(self) -> ::axum::response::Response {
                match self {
                    Self::Created(json) => ::axum::response::IntoResponse::into_response((
                        ::axum::http::StatusCode::CREATED,
                        json,
                    )),
                }
            }
        }
    };
    ($name:ident, NoContent) => {
        pub enum $name {
            NoContent,
        }

        impl ::axum::response::IntoResponse for $name {
            fn into_response(self) -> ::axum::response::Response {
                match self {
                    Self::NoContent => ::axum::response::IntoResponse::into_response(
                        ::axum::http::StatusCode::NO_CONTENT,
                    ),
                }
            }
        }
    };
}

#[allow(clippy::missing_errors_doc)]
pub mod departments;
#[allow(clippy::missing_errors_doc)]
pub mod employees;
#[allow(clippy::missing_errors_doc)]
pub mod insights;
#[allow(clippy::missing_errors_doc)]
pub mod projects;
#[allow(clippy::missing_errors_doc)]
pub mod reservations;
#[allow(clippy::missing_errors_doc)]
pub mod vehicles;

use axum::Router;
use axum::routing::{get, patch, post};
use fleetdash_app::ports::Notifier;
use fleetdash_domain::error::ValidationError;
use fleetdash_domain::time::Clock;

use crate::state::AppState;

/// Trimmed value of an optional parameter, `None` when blank.
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn required<'a>(raw: Option<&'a str>, field: &'static str) -> Result<&'a str, ValidationError> {
    non_blank(raw).ok_or(ValidationError::EmptyField(field))
}

/// Build the `/api` sub-router with all JSON endpoints.
pub fn routes<N, C>() -> Router<AppState<N, C>>
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/vehicles",
            get(vehicles::list::<N, C>).post(vehicles::create::<N, C>),
        )
        .route(
            "/vehicles/{id}",
            get(vehicles::get::<N, C>)
                .patch(vehicles::update::<N, C>)
                .delete(vehicles::delete::<N, C>),
        )
        .route("/vehicles/{id}/status", get(vehicles::status::<N, C>))
        .route(
            "/reservations",
            get(reservations::list::<N, C>).post(reservations::create::<N, C>),
        )
        .route(
            "/reservations/conflict",
            get(reservations::conflict::<N, C>),
        )
        .route(
            "/reservations/{id}",
            patch(reservations::update::<N, C>).delete(reservations::delete::<N, C>),
        )
        .route(
            "/reservations/{id}/approve",
            post(reservations::approve::<N, C>),
        )
        .route(
            "/reservations/{id}/reject",
            post(reservations::reject::<N, C>),
        )
        .route(
            "/employees",
            get(employees::list::<N, C>).post(employees::create::<N, C>),
        )
        .route(
            "/employees/{id}",
            patch(employees::update::<N, C>).delete(employees::delete::<N, C>),
        )
        .route(
            "/projects",
            get(projects::list::<N, C>).post(projects::create::<N, C>),
        )
        .route(
            "/projects/{id}",
            patch(projects::update::<N, C>).delete(projects::delete::<N, C>),
        )
        .route(
            "/departments",
            get(departments::list::<N, C>).post(departments::create::<N, C>),
        )
        .route(
            "/departments/{id}",
            patch(departments::update::<N, C>).delete(departments::delete::<N, C>),
        )
        .route("/sectors", get(departments::sectors::<N, C>))
        .route("/summary", get(insights::summary::<N, C>))
        .route("/analytics", get(insights::analytics::<N, C>))
        .route("/timeline", get(insights::timeline::<N, C>))
        .route("/me/reservations", get(insights::my_reservations::<N, C>))
        .route("/activities", get(insights::activities::<N, C>))
}
