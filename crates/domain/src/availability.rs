//! Whether a vehicle is free at an instant or over an interval.
//!
//! Everything here is a pure function over a reservation slice; nothing is
//! cached. Status priority is fixed: maintenance > booked > pending > available.

use serde::{Deserialize, Serialize};

use crate::error::ConflictError;
use crate::id::VehicleId;
use crate::period::Period;
use crate::reservation::{Reservation, ReservationStatus};
use crate::time::Timestamp;
use crate::vehicle::{Vehicle, VehicleStatus};

/// Vehicle state as shown to users at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Booked,
    Pending,
    Maintenance,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::Booked => f.write_str("booked"),
            Self::Pending => f.write_str("pending"),
            Self::Maintenance => f.write_str("maintenance"),
        }
    }
}

fn containing(
    reservations: &[Reservation],
    vehicle_id: VehicleId,
    status: ReservationStatus,
    instant: Timestamp,
) -> Option<&Reservation> {
    reservations.iter().find(|r| {
        r.vehicle_id == vehicle_id && r.status == status && r.period().contains(instant)
    })
}

/// The approved reservation of `vehicle_id` containing `instant`, if any.
#[must_use]
pub fn active_reservation(
    reservations: &[Reservation],
    vehicle_id: VehicleId,
    instant: Timestamp,
) -> Option<&Reservation> {
    containing(
        reservations,
        vehicle_id,
        ReservationStatus::Approved,
        instant,
    )
}

/// Classify `vehicle` at `instant`.
#[must_use]
pub fn status_at(vehicle: &Vehicle, reservations: &[Reservation], instant: Timestamp) -> Availability {
    if vehicle.status == VehicleStatus::Maintenance {
        return Availability::Maintenance;
    }
    if active_reservation(reservations, vehicle.id, instant).is_some() {
        return Availability::Booked;
    }
    if containing(reservations, vehicle.id, ReservationStatus::Pending, instant).is_some() {
        return Availability::Pending;
    }
    Availability::Available
}

/// First non-rejected reservation of `vehicle_id` whose interval overlaps
/// `candidate` (closed intervals, so touching endpoints conflict).
#[must_use]
pub fn find_conflict<'a>(
    reservations: &'a [Reservation],
    vehicle_id: VehicleId,
    candidate: &Period,
) -> Option<&'a Reservation> {
    reservations.iter().find(|r| {
        r.vehicle_id == vehicle_id
            && r.status != ReservationStatus::Rejected
            && r.period().overlaps(candidate)
    })
}

#[must_use]
pub fn has_conflict(reservations: &[Reservation], vehicle_id: VehicleId, candidate: &Period) -> bool {
    find_conflict(reservations, vehicle_id, candidate).is_some()
}

impl From<&Reservation> for ConflictError {
    fn from(existing: &Reservation) -> Self {
        Self {
            reservation_id: existing.id,
            booker_name: existing.booker_name.clone(),
            status: existing.status,
            start: existing.start_date,
            end: existing.end_date,
        }
    }
}

/// A copy of `vehicle` with `status` and `last_user` derived from `reservations` at `now`.
///
/// - `maintenance` is kept as stored;
/// - an approved reservation containing `now` makes it `booked`, with the
///   booker as `last_user`;
/// - otherwise it is `available`, keeping the stored `last_user`.
#[must_use]
pub fn derive_vehicle_status(vehicle: &Vehicle, reservations: &[Reservation], now: Timestamp) -> Vehicle {
    let mut derived = vehicle.clone();
    if vehicle.status == VehicleStatus::Maintenance {
        return derived;
    }
    match active_reservation(reservations, vehicle.id, now) {
        Some(active) => {
            derived.status = VehicleStatus::Booked;
            derived.last_user = Some(active.booker_name.clone());
        }
        None => derived.status = VehicleStatus::Available,
    }
    derived
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ReservationId;
    use chrono::{TimeZone, Utc};

    fn at(day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    fn vehicle(id: u64, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id: VehicleId::new(id),
            model: "Volvo XC60".to_string(),
            plate: format!("BG27{id:02}-RL"),
            vehicle_type: "SUV".to_string(),
            status,
            current_location: None,
            last_user: Some("John Doe".to_string()),
        }
    }

    fn reservation(
        id: u64,
        vehicle: u64,
        status: ReservationStatus,
        start: Timestamp,
        end: Timestamp,
    ) -> Reservation {
        Reservation {
            id: ReservationId::new(id),
            vehicle_id: VehicleId::new(vehicle),
            booker_name: format!("Booker {id}"),
            sector: "Management".to_string(),
            project_id: None,
            start_date: start,
            end_date: end,
            notes: None,
            status,
            approved_by: None,
            approved_at: None,
        }
    }

    #[test]
    fn should_report_booked_for_every_instant_of_approved_reservation() {
        let car = vehicle(2, VehicleStatus::Available);
        let reservations = vec![reservation(
            1,
            2,
            ReservationStatus::Approved,
            at(11, 9),
            at(13, 17),
        )];
        for instant in [at(11, 9), at(12, 0), at(13, 17)] {
            assert_eq!(status_at(&car, &reservations, instant), Availability::Booked);
        }
        assert_eq!(
            status_at(&car, &reservations, at(13, 18)),
            Availability::Available
        );
    }

    #[test]
    fn should_report_maintenance_regardless_of_reservations() {
        let car = vehicle(2, VehicleStatus::Maintenance);
        let reservations = vec![
            reservation(1, 2, ReservationStatus::Approved, at(11, 9), at(13, 17)),
            reservation(2, 2, ReservationStatus::Pending, at(14, 9), at(14, 17)),
        ];
        for instant in [at(10, 0), at(12, 0), at(14, 10)] {
            assert_eq!(
                status_at(&car, &reservations, instant),
                Availability::Maintenance
            );
        }
    }

    #[test]
    fn should_prefer_booked_over_pending() {
        let car = vehicle(2, VehicleStatus::Available);
        let reservations = vec![
            reservation(1, 2, ReservationStatus::Pending, at(11, 0), at(12, 0)),
            reservation(2, 2, ReservationStatus::Approved, at(11, 0), at(12, 0)),
        ];
        assert_eq!(status_at(&car, &reservations, at(11, 12)), Availability::Booked);
    }

    #[test]
    fn should_report_pending_when_only_pending_contains_instant() {
        let car = vehicle(1, VehicleStatus::Available);
        let reservations = vec![reservation(
            6,
            1,
            ReservationStatus::Pending,
            at(14, 9),
            at(14, 15),
        )];
        assert_eq!(
            status_at(&car, &reservations, at(14, 10)),
            Availability::Pending
        );
    }

    #[test]
    fn should_ignore_reservations_of_other_vehicles() {
        let car = vehicle(1, VehicleStatus::Available);
        let reservations = vec![reservation(
            1,
            2,
            ReservationStatus::Approved,
            at(11, 0),
            at(12, 0),
        )];
        assert_eq!(
            status_at(&car, &reservations, at(11, 12)),
            Availability::Available
        );
    }

    #[test]
    fn should_conflict_when_endpoints_touch() {
        let existing = vec![reservation(
            1,
            4,
            ReservationStatus::Approved,
            at(10, 0),
            at(12, 0),
        )];
        let candidate = Period::new(at(12, 0), at(14, 0));
        assert!(has_conflict(&existing, VehicleId::new(4), &candidate));
    }

    #[test]
    fn should_detect_conflict_symmetrically() {
        let a = reservation(1, 4, ReservationStatus::Pending, at(10, 0), at(12, 0));
        let b = reservation(2, 4, ReservationStatus::Approved, at(11, 0), at(14, 0));

        let a_vs_b = has_conflict(std::slice::from_ref(&b), a.vehicle_id, &a.period());
        let b_vs_a = has_conflict(std::slice::from_ref(&a), b.vehicle_id, &b.period());
        assert!(a_vs_b);
        assert_eq!(a_vs_b, b_vs_a);
    }

    #[test]
    fn should_ignore_rejected_reservations_when_checking_conflicts() {
        let existing = vec![reservation(
            1,
            4,
            ReservationStatus::Rejected,
            at(10, 0),
            at(12, 0),
        )];
        let candidate = Period::new(at(11, 0), at(11, 30));
        assert!(find_conflict(&existing, VehicleId::new(4), &candidate).is_none());
    }

    #[test]
    fn should_return_first_conflict_and_describe_it() {
        let existing = vec![
            reservation(1, 4, ReservationStatus::Pending, at(10, 0), at(12, 0)),
            reservation(2, 4, ReservationStatus::Approved, at(11, 0), at(13, 0)),
        ];
        let candidate = Period::new(at(11, 0), at(11, 30));
        let conflict = find_conflict(&existing, VehicleId::new(4), &candidate).unwrap();
        assert_eq!(conflict.id, ReservationId::new(1));

        let error = ConflictError::from(conflict);
        assert_eq!(error.status, ReservationStatus::Pending);
        assert_eq!(error.booker_name, "Booker 1");
    }

    #[test]
    fn should_derive_booked_with_booker_as_last_user() {
        let car = vehicle(2, VehicleStatus::Available);
        let reservations = vec![reservation(
            1,
            2,
            ReservationStatus::Approved,
            at(11, 9),
            at(13, 17),
        )];
        let derived = derive_vehicle_status(&car, &reservations, at(11, 10));
        assert_eq!(derived.status, VehicleStatus::Booked);
        assert_eq!(derived.last_user.as_deref(), Some("Booker 1"));
    }

    #[test]
    fn should_revert_stale_booked_to_available_keeping_last_user() {
        let car = vehicle(2, VehicleStatus::Booked);
        let derived = derive_vehicle_status(&car, &[], at(11, 10));
        assert_eq!(derived.status, VehicleStatus::Available);
        assert_eq!(derived.last_user.as_deref(), Some("John Doe"));
    }

    #[test]
    fn should_never_touch_maintenance_when_deriving() {
        let car = vehicle(2, VehicleStatus::Maintenance);
        let reservations = vec![reservation(
            1,
            2,
            ReservationStatus::Approved,
            at(11, 9),
            at(13, 17),
        )];
        assert_eq!(derive_vehicle_status(&car, &reservations, at(12, 0)), car);
    }
}
