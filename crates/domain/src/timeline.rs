//! Day-by-day views over reservations: the fleet timeline grid and a
//! booker's own reservations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{ReservationId, VehicleId};
use crate::reservation::{Reservation, ReservationStatus};
use crate::time::{Timestamp, start_of_day};
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Available,
    Booked,
    Pending,
    /// Covered by a rejected reservation.
    Unavailable,
}

impl From<ReservationStatus> for DayState {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Approved => Self::Booked,
            ReservationStatus::Pending => Self::Pending,
            ReservationStatus::Rejected => Self::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineCell {
    pub date: NaiveDate,
    pub state: DayState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<ReservationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booker_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRow {
    pub vehicle_id: VehicleId,
    pub plate: String,
    pub model: String,
    pub cells: Vec<TimelineCell>,
}

/// One row per vehicle, one cell per day over `days` consecutive days from `start`.
///
/// A cell shows the first reservation (in slice order) whose calendar-day
/// span covers that day.
#[must_use]
pub fn timeline(
    vehicles: &[Vehicle],
    reservations: &[Reservation],
    start: NaiveDate,
    days: u32,
) -> Vec<TimelineRow> {
    let range: Vec<NaiveDate> = start.iter_days().take(days as usize).collect();
    vehicles
        .iter()
        .map(|vehicle| TimelineRow {
            vehicle_id: vehicle.id,
            plate: vehicle.plate.clone(),
            model: vehicle.model.clone(),
            cells: range
                .iter()
                .map(|&date| cell(vehicle.id, reservations, date))
                .collect(),
        })
        .collect()
}

fn cell(vehicle_id: VehicleId, reservations: &[Reservation], date: NaiveDate) -> TimelineCell {
    let covering = reservations
        .iter()
        .filter(|r| r.vehicle_id == vehicle_id)
        .find(|r| r.period().days().contains(date));
    match covering {
        Some(reservation) => TimelineCell {
            date,
            state: reservation.status.into(),
            reservation_id: Some(reservation.id),
            booker_name: Some(reservation.booker_name.clone()),
        },
        None => TimelineCell {
            date,
            state: DayState::Available,
            reservation_id: None,
            booker_name: None,
        },
    }
}

/// A booker's reservations, split the way the "my reservations" page shows them.
///
/// The groups may overlap: a pending reservation that already ended is both
/// pending and past.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookerReservations {
    /// Approved and ending on or after the start of today.
    pub active: Vec<Reservation>,
    pub pending: Vec<Reservation>,
    /// Ended before the start of today, whatever the status.
    pub past: Vec<Reservation>,
}

#[must_use]
pub fn group_for_booker(
    reservations: &[Reservation],
    booker_name: &str,
    now: Timestamp,
) -> BookerReservations {
    let today = start_of_day(now.date_naive());
    let mut groups = BookerReservations::default();
    for reservation in reservations.iter().filter(|r| r.booker_name == booker_name) {
        if reservation.status == ReservationStatus::Approved && reservation.end_date >= today {
            groups.active.push(reservation.clone());
        }
        if reservation.status == ReservationStatus::Pending {
            groups.pending.push(reservation.clone());
        }
        if reservation.end_date < today {
            groups.past.push(reservation.clone());
        }
    }
    groups
}
