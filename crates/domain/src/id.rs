//! Typed identifier newtypes.
//!
//! Reference data and reservations use sequential numeric ids (the next id is
//! `max(existing) + 1`), rendered as strings on the wire. Departments are keyed
//! by a slug of their name. Activities get a random UUID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_numeric_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(into = "String", try_from = "String")]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw numeric id.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Access the raw numeric id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Allocate the id following the largest of `existing` (`1` when empty).
            ///
            /// Returns `None` once the largest id is `u64::MAX`.
            #[must_use]
            pub fn next_after<I: IntoIterator<Item = Self>>(existing: I) -> Option<Self> {
                existing
                    .into_iter()
                    .map(Self::get)
                    .max()
                    .unwrap_or(0)
                    .checked_add(1)
                    .map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| ValidationError::InvalidId(s.to_string()))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_numeric_id!(
    /// Unique identifier for a [`Vehicle`](crate::vehicle::Vehicle).
    VehicleId
);

define_numeric_id!(
    /// Unique identifier for a [`Reservation`](crate::reservation::Reservation).
    ReservationId
);

define_numeric_id!(
    /// Unique identifier for an [`Employee`](crate::employee::Employee).
    EmployeeId
);

define_numeric_id!(
    /// Unique identifier for a [`Project`](crate::project::Project).
    ProjectId
);

/// Slug identifier for a [`Department`](crate::department::Department).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(String);

impl DepartmentId {
    /// Wrap an existing slug as-is.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive the slug from a department name: lowercase, whitespace runs become `-`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(
            name.split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join("-"),
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for an [`Activity`](crate::activity::Activity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(uuid::Uuid);

impl Default for ActivityId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl ActivityId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
