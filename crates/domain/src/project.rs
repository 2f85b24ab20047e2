//! Projects that reservations are booked for, each with a kilometer-per-day rate.

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, ValidationError};
use crate::id::ProjectId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Estimated distance driven per reserved day.
    pub km_per_day: u32,
}

/// Fields of a project before the store assigns its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub km_per_day: u32,
}

impl NewProject {
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] when the name is blank.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        Ok(())
    }

    #[must_use]
    pub fn with_id(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            km_per_day: self.km_per_day,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub km_per_day: Option<u32>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(km_per_day) = self.km_per_day {
            project.km_per_day = km_per_day;
        }
    }
}
