//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`FleetError`]
//! via `#[from]`. Nothing here is fatal: every variant describes an operation
//! that did not happen.

use crate::id::ReservationId;
use crate::reservation::ReservationStatus;
use crate::time::Timestamp;

/// Base error for every fleetdash operation.
#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("reservation conflict")]
    Conflict(#[from] ConflictError),

    #[error("forbidden")]
    Forbidden(#[from] ForbiddenError),

    /// Upstream data source failure (network, decoding, …).
    #[error("data source error: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),
}

/// A caller-supplied value breaks a domain rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("invalid identifier `{0}`")]
    InvalidId(String),

    #[error("invalid {field} `{value}`")]
    InvalidValue { field: &'static str, value: String },

    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),

    #[error("no {0} identifier left to allocate")]
    IdsExhausted(&'static str),

    #[error("cannot move reservation from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A candidate reservation overlaps an existing non-rejected one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("vehicle is already {status} for {booker_name} from {start} to {end}")]
pub struct ConflictError {
    pub reservation_id: ReservationId,
    pub booker_name: String,
    pub status: ReservationStatus,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// The acting user lacks the role required for an action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{user} is not allowed to {action}")]
pub struct ForbiddenError {
    pub action: &'static str,
    pub user: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_fleet_error() {
        let err: FleetError = ValidationError::EmptyField("plate").into();
        assert!(matches!(
            err,
            FleetError::Validation(ValidationError::EmptyField("plate"))
        ));
    }

    #[test]
    fn should_describe_not_found_error() {
        let err = NotFoundError {
            entity: "Vehicle",
            id: "7".to_string(),
        };
        assert_eq!(err.to_string(), "Vehicle `7` not found");
    }

    #[test]
    fn should_describe_forbidden_error() {
        let err = ForbiddenError {
            action: "approve reservations",
            user: "Maria Silva".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Maria Silva is not allowed to approve reservations"
        );
    }
}
