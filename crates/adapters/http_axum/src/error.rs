//! Map domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fleetdash_domain::error::{ConflictError, FleetError, NotFoundError, ValidationError};
use fleetdash_domain::id::ReservationId;
use fleetdash_domain::reservation::ReservationStatus;
use fleetdash_domain::time::Timestamp;
use serde::Serialize;

/// Wrapper that converts [`FleetError`] into an axum response.
#[derive(Debug)]
pub struct ApiError(pub FleetError);

impl ApiError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self(
            NotFoundError {
                entity,
                id: id.to_string(),
            }
            .into(),
        )
    }
}

impl From<FleetError> for ApiError {
    fn from(err: FleetError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conflict: Option<ConflictBody>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictBody {
    reservation_id: ReservationId,
    booker_name: String,
    status: ReservationStatus,
    start_date: Timestamp,
    end_date: Timestamp,
}

impl From<&ConflictError> for ConflictBody {
    fn from(conflict: &ConflictError) -> Self {
        Self {
            reservation_id: conflict.reservation_id,
            booker_name: conflict.booker_name.clone(),
            status: conflict.status,
            start_date: conflict.start,
            end_date: conflict.end,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, conflict) = match &self.0 {
            FleetError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            FleetError::Forbidden(err) => (StatusCode::FORBIDDEN, err.to_string(), None),
            FleetError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string(), None),
            FleetError::Conflict(err) => (
                StatusCode::CONFLICT,
                err.to_string(),
                Some(ConflictBody::from(err)),
            ),
            FleetError::Source(err) => {
                tracing::error!(error = %err, "data source error");
                (StatusCode::BAD_GATEWAY, self.0.to_string(), None)
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                conflict,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fleetdash_domain::error::ForbiddenError;

    #[test]
    fn should_map_validation_to_bad_request() {
        let response = ApiError::from(ValidationError::EmptyField("plate")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_forbidden_to_403() {
        let err = FleetError::from(ForbiddenError {
            action: "approve reservations",
            user: "Maria Silva".to_string(),
        });
        assert_eq!(ApiError(err).into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn should_map_not_found_to_404() {
        let response = ApiError::not_found("Vehicle", 99).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_map_conflict_to_409() {
        let at = Utc.with_ymd_and_hms(2026, 1, 11, 9, 0, 0).unwrap();
        let err = FleetError::from(ConflictError {
            reservation_id: ReservationId::new(1),
            booker_name: "Maria Silva".to_string(),
            status: ReservationStatus::Approved,
            start: at,
            end: at,
        });
        assert_eq!(ApiError(err).into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn should_map_source_to_bad_gateway() {
        let err = FleetError::Source("connection refused".into());
        assert_eq!(ApiError(err).into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
