//! The acting user, passed explicitly to every operation that
//! needs an identity.

use fleetdash_domain::employee::Employee;
use fleetdash_domain::error::{FleetError, ForbiddenError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Employee,
}

impl Session {
    #[must_use]
    pub fn new(user: Employee) -> Self {
        Self { user }
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user.name
    }

    /// # Errors
    ///
    /// Returns [`FleetError::Forbidden`] unless the user is an administrator.
    pub fn require_admin(&self, action: &'static str) -> Result<(), FleetError> {
        if self.user.is_admin() {
            Ok(())
        } else {
            Err(ForbiddenError {
                action,
                user: self.user.name.clone(),
            }
            .into())
        }
    }
}
