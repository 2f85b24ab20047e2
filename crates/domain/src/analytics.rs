//! Usage analytics and dashboard summary figures.

use serde::{Deserialize, Serialize};

use crate::availability::active_reservation;
use crate::id::ProjectId;
use crate::period::{DayRange, Period};
use crate::project::Project;
use crate::reservation::{Reservation, ReservationStatus};
use crate::time::{Timestamp, end_of_day, start_of_day};
use crate::vehicle::{Vehicle, VehicleStatus};

/// A filter value, or the "all/any" sentinel that lets everything through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    Any,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    #[must_use]
    pub fn admits(&self, value: Option<&T>) -> bool {
        match self {
            Self::Any => true,
            Self::Only(expected) => value == Some(expected),
        }
    }
}

impl Selection<String> {
    /// Read a free-text filter, treating blank and the [`SENTINELS`]
    /// (case-insensitive) as the sentinel.
    #[must_use]
    pub fn from_text(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => Self::Any,
            Some(text) if is_sentinel(text) => Self::Any,
            Some(text) => Self::Only(text.to_string()),
        }
    }
}

/// Filter values meaning "no filter", as the dashboard's selectors send them.
pub const SENTINELS: [&str; 5] = ["all", "any", "All Types", "All Projects", "All Departments"];

fn is_sentinel(text: &str) -> bool {
    text.is_empty()
        || SENTINELS
            .iter()
            .any(|sentinel| sentinel.eq_ignore_ascii_case(text))
}

/// AND-combined filters applied before aggregating usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageFilter {
    /// Exact match against [`Reservation::sector`].
    pub department: Selection<String>,
    pub project: Selection<ProjectId>,
    /// Exact match against the reserved vehicle's type.
    pub vehicle_type: Selection<String>,
}

impl UsageFilter {
    fn admits(&self, reservation: &Reservation, vehicles: &[Vehicle]) -> bool {
        let vehicle_type = vehicles
            .iter()
            .find(|v| v.id == reservation.vehicle_id)
            .map(|v| &v.vehicle_type);
        self.department.admits(Some(&reservation.sector))
            && self.project.admits(reservation.project_id.as_ref())
            && self.vehicle_type.admits(vehicle_type)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub vehicle_days: u64,
    pub estimated_km: u64,
}

/// Vehicle-days and estimated kilometers of approved reservations within `range`.
///
/// Days are counted per calendar day touched, not as `ceil(end - start) + 1`:
/// a reservation from the 11th 09:00 to the 13th 17:00 is 3 vehicle-days.
/// Where the two disagree the calendar-day count wins.
///
/// Each reservation's calendar-day span is clipped to `range`; every day of
/// the clipped span counts once, so a reservation starting and ending on the
/// same day is one vehicle-day. Kilometers are `days * km_per_day` of the
/// referenced project; reservations without a resolvable project add days
/// but no distance.
#[must_use]
pub fn usage_report(
    range: DayRange,
    filter: &UsageFilter,
    reservations: &[Reservation],
    vehicles: &[Vehicle],
    projects: &[Project],
) -> UsageReport {
    reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Approved)
        .filter(|r| filter.admits(r, vehicles))
        .filter_map(|r| range.clip(&r.period().days()).map(|days| (r, days.len_days())))
        .fold(UsageReport::default(), |mut report, (reservation, days)| {
            report.vehicle_days += days;
            let rate = reservation
                .project_id
                .and_then(|id| projects.iter().find(|p| p.id == id))
                .map_or(0, |p| u64::from(p.km_per_day));
            report.estimated_km += days * rate;
            report
        })
}

/// Headline figures of the dashboard at `now`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_vehicles: usize,
    /// Not in maintenance and without an approved reservation containing `now`.
    pub available_now: usize,
    /// Vehicles with an approved reservation overlapping today.
    pub booked_today: usize,
    /// Non-rejected reservations starting after `now`.
    pub upcoming_reservations: usize,
    pub pending_approvals: usize,
}

#[must_use]
pub fn summarize(vehicles: &[Vehicle], reservations: &[Reservation], now: Timestamp) -> FleetSummary {
    let today = Period::new(
        start_of_day(now.date_naive()),
        end_of_day(now.date_naive()),
    );
    let available_now = vehicles
        .iter()
        .filter(|v| v.status != VehicleStatus::Maintenance)
        .filter(|v| active_reservation(reservations, v.id, now).is_none())
        .count();
    let booked_today = vehicles
        .iter()
        .filter(|v| {
            reservations.iter().any(|r| {
                r.vehicle_id == v.id
                    && r.status == ReservationStatus::Approved
                    && r.period().overlaps(&today)
            })
        })
        .count();
    let upcoming_reservations = reservations
        .iter()
        .filter(|r| r.status != ReservationStatus::Rejected && r.start_date > now)
        .count();
    let pending_approvals = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Pending)
        .count();

    FleetSummary {
        total_vehicles: vehicles.len(),
        available_now,
        booked_today,
        upcoming_reservations,
        pending_approvals,
    }
}
