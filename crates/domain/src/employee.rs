//! Employees book vehicles; admins also approve them.

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, ValidationError};
use crate::id::EmployeeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub sector: String,
    pub role: Role,
}

impl Employee {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Fields of an employee before the store assigns its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub sector: String,
    #[serde(default)]
    pub role: Role,
}

impl NewEmployee {
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] when name, email or sector is blank.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmptyField("email").into());
        }
        if self.sector.trim().is_empty() {
            return Err(ValidationError::EmptyField("sector").into());
        }
        Ok(())
    }

    #[must_use]
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            sector: self.sector,
            role: self.role,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub sector: Option<String>,
    pub role: Option<Role>,
}

impl EmployeePatch {
    pub fn apply(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(email) = self.email {
            employee.email = email;
        }
        if let Some(sector) = self.sector {
            employee.sector = sector;
        }
        if let Some(role) = self.role {
            employee.role = role;
        }
    }
}
