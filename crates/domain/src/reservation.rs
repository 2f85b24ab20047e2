//! A reservation requests one vehicle over a closed time interval.
//!
//! Lifecycle: created `pending`, then moved exactly once to `approved` or
//! `rejected` by an administrator. Both of those states are terminal.

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, ValidationError};
use crate::id::{ProjectId, ReservationId, VehicleId};
use crate::period::Period;
use crate::time::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReservationStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Approved => f.write_str("approved"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ValidationError::InvalidValue {
                field: "reservation status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub vehicle_id: VehicleId,
    pub booker_name: String,
    /// Department path, see [`Department::sector_label`](crate::department::Department::sector_label).
    pub sector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<Timestamp>,
}

impl Reservation {
    #[must_use]
    pub fn period(&self) -> Period {
        Period::new(self.start_date, self.end_date)
    }

    /// Approved and `start <= instant <= end`.
    #[must_use]
    pub fn is_active_at(&self, instant: Timestamp) -> bool {
        self.status == ReservationStatus::Approved && self.period().contains(instant)
    }

    /// Move to `approved`, recording who approved it and when.
    ///
    /// Returns `false` when the reservation was already approved (nothing changes).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] when the reservation was rejected.
    pub fn approve(&mut self, approver: &str, at: Timestamp) -> Result<bool, FleetError> {
        match self.status {
            ReservationStatus::Pending => {
                self.status = ReservationStatus::Approved;
                self.approved_by = Some(approver.to_string());
                self.approved_at = Some(at);
                Ok(true)
            }
            ReservationStatus::Approved => Ok(false),
            ReservationStatus::Rejected => Err(ValidationError::InvalidTransition {
                from: self.status,
                to: ReservationStatus::Approved,
            }
            .into()),
        }
    }

    /// Move to `rejected`.
    ///
    /// Returns `false` when the reservation was already rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTransition`] when the reservation was approved.
    pub fn reject(&mut self) -> Result<bool, FleetError> {
        match self.status {
            ReservationStatus::Pending => {
                self.status = ReservationStatus::Rejected;
                Ok(true)
            }
            ReservationStatus::Rejected => Ok(false),
            ReservationStatus::Approved => Err(ValidationError::InvalidTransition {
                from: self.status,
                to: ReservationStatus::Rejected,
            }
            .into()),
        }
    }
}

/// Fields of a reservation request before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub vehicle_id: VehicleId,
    pub booker_name: String,
    pub sector: String,
    pub project_id: Option<ProjectId>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub notes: Option<String>,
}

impl NewReservation {
    #[must_use]
    pub fn builder() -> NewReservationBuilder {
        NewReservationBuilder::default()
    }

    #[must_use]
    pub fn period(&self) -> Period {
        Period::new(self.start_date, self.end_date)
    }

    /// Check the fields a caller must supply. The store itself never calls this.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] when the booker or sector is blank.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.booker_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("bookerName").into());
        }
        if self.sector.trim().is_empty() {
            return Err(ValidationError::EmptyField("sector").into());
        }
        Ok(())
    }

    /// Materialize as a `pending` reservation.
    #[must_use]
    pub fn into_pending(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            vehicle_id: self.vehicle_id,
            booker_name: self.booker_name,
            sector: self.sector,
            project_id: self.project_id,
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes,
            status: ReservationStatus::Pending,
            approved_by: None,
            approved_at: None,
        }
    }
}

/// Step-by-step builder for [`NewReservation`].
#[derive(Debug, Default)]
pub struct NewReservationBuilder {
    vehicle_id: Option<VehicleId>,
    booker_name: Option<String>,
    sector: Option<String>,
    project_id: Option<ProjectId>,
    start_date: Option<Timestamp>,
    end_date: Option<Timestamp>,
    notes: Option<String>,
}

impl NewReservationBuilder {
    #[must_use]
    pub fn vehicle_id(mut self, vehicle_id: VehicleId) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    #[must_use]
    pub fn booker_name(mut self, booker_name: impl Into<String>) -> Self {
        self.booker_name = Some(booker_name.into());
        self
    }

    #[must_use]
    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    #[must_use]
    pub fn project_id(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    #[must_use]
    pub fn period(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Consume the builder, validate, and return a [`NewReservation`].
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] if the vehicle or dates are missing,
    /// or the booker or sector is blank.
    pub fn build(self) -> Result<NewReservation, FleetError> {
        let vehicle_id = self
            .vehicle_id
            .ok_or(ValidationError::EmptyField("vehicleId"))?;
        let start_date = self
            .start_date
            .ok_or(ValidationError::EmptyField("startDate"))?;
        let end_date = self.end_date.ok_or(ValidationError::EmptyField("endDate"))?;
        let draft = NewReservation {
            vehicle_id,
            booker_name: self.booker_name.unwrap_or_default(),
            sector: self.sector.unwrap_or_default(),
            project_id: self.project_id,
            start_date,
            end_date,
            notes: self.notes,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Partial update merged into an existing [`Reservation`].
///
/// Status is deliberately absent: it only moves through
/// [`Reservation::approve`] and [`Reservation::reject`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationPatch {
    pub vehicle_id: Option<VehicleId>,
    pub booker_name: Option<String>,
    pub sector: Option<String>,
    pub project_id: Option<ProjectId>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub notes: Option<String>,
}

impl ReservationPatch {
    pub fn apply(self, reservation: &mut Reservation) {
        if let Some(vehicle_id) = self.vehicle_id {
            reservation.vehicle_id = vehicle_id;
        }
        if let Some(booker_name) = self.booker_name {
            reservation.booker_name = booker_name;
        }
        if let Some(sector) = self.sector {
            reservation.sector = sector;
        }
        if self.project_id.is_some() {
            reservation.project_id = self.project_id;
        }
        if let Some(start_date) = self.start_date {
            reservation.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            reservation.end_date = end_date;
        }
        if self.notes.is_some() {
            reservation.notes = self.notes;
        }
    }
}
