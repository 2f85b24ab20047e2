//! Departments form a two-level tree of sectors and sub-sectors.

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, ValidationError};
use crate::id::DepartmentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<DepartmentId>,
}

impl Department {
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Sector path: the name for top-level departments, `"<parent> - <child>"`
    /// for sub-sectors. A dangling parent falls back to the bare name.
    #[must_use]
    pub fn sector_label(&self, departments: &[Department]) -> String {
        self.parent
            .as_ref()
            .and_then(|parent| departments.iter().find(|d| &d.id == parent))
            .map_or_else(
                || self.name.clone(),
                |parent| format!("{} - {}", parent.name, self.name),
            )
    }
}

/// Sector labels in tree order: each top-level department followed by its children.
#[must_use]
pub fn sector_labels(departments: &[Department]) -> Vec<String> {
    departments
        .iter()
        .filter(|d| d.is_top_level())
        .flat_map(|top| {
            std::iter::once(top.name.clone()).chain(
                departments
                    .iter()
                    .filter(|child| child.parent.as_ref() == Some(&top.id))
                    .map(|child| child.sector_label(departments)),
            )
        })
        .collect()
}

/// Fields of a department before the store derives its slug id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    #[serde(default)]
    pub parent: Option<DepartmentId>,
}

impl NewDepartment {
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
    pub fn into_department(self) -> Department {
        Department {
            id: DepartmentId::from_name(&self.name),
            name: self.name,
            parent: self.parent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DepartmentPatch {
    pub name: Option<String>,
    pub parent: Option<DepartmentId>,
}

impl DepartmentPatch {
    pub fn apply(self, department: &mut Department) {
        if let Some(name) = self.name {
            department.name = name;
        }
        if self.parent.is_some() {
            department.parent = self.parent;
        }
    }
}
