//! Short, human-readable records of store mutations.
//!
//! The log keeps the [`ActivityLog::CAPACITY`] most recent entries, newest
//! first. It is for display only.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::id::ActivityId;
use crate::time::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ReservationCreated,
    ReservationApproved,
    ReservationRejected,
    ReservationUpdated,
    ReservationDeleted,
    VehicleAdded,
    VehicleUpdated,
    VehicleDeleted,
    EmployeeAdded,
    EmployeeUpdated,
    EmployeeDeleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: Timestamp,
    /// Name of the acting employee.
    pub user: String,
}

impl Activity {
    #[must_use]
    pub fn new(
        kind: ActivityKind,
        message: impl Into<String>,
        user: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            kind,
            message: message.into(),
            timestamp,
            user: user.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
}

impl ActivityLog {
    pub const CAPACITY: usize = 10;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `activity`, dropping the oldest entry once full.
    pub fn record(&mut self, activity: Activity) {
        self.entries.push_front(activity);
        self.entries.truncate(Self::CAPACITY);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
