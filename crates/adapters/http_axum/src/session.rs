//! Resolve the acting employee for a request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fleetdash_app::ports::Notifier;
use fleetdash_app::session::Session;
use fleetdash_domain::error::{ForbiddenError, ValidationError};
use fleetdash_domain::id::EmployeeId;
use fleetdash_domain::time::Clock;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the acting employee's id.
pub const USER_HEADER: &str = "x-fleet-user";

/// The session of the employee named by [`USER_HEADER`], or of the
/// configured default user when the header is absent.
pub struct ActingUser(pub Session);

impl<N, C> FromRequestParts<AppState<N, C>> for ActingUser
where
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<N, C>,
    ) -> Result<Self, Self::Rejection> {
        let id = match parts.headers.get(USER_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| ValidationError::InvalidId(format!("{value:?}")))?
                .parse::<EmployeeId>()?,
            None => state.default_user,
        };

        let store = state.read().await;
        let employee = store.employee(id).cloned().ok_or_else(|| {
            ApiError(
                ForbiddenError {
                    action: "use the dashboard",
                    user: format!("employee {id}"),
                }
                .into(),
            )
        })?;
        Ok(Self(Session::new(employee)))
    }
}
