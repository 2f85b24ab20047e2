//! Turn loosely-typed upstream rows into domain entities.
//!
//! Upstream tables use `snake_case` columns (`vehicle_id`, `start_date`,
//! `location`), may send ids as numbers or strings, and use empty strings
//! for absent values. Both `snake_case` and `camelCase` names are accepted;
//! empty strings become `None`. Reservations reference projects by name
//! upstream and are resolved to a [`ProjectId`] here.

use std::str::FromStr;

use fleetdash_domain::error::ValidationError;
use fleetdash_domain::id::{ProjectId, ReservationId, VehicleId};
use fleetdash_domain::project::Project;
use fleetdash_domain::reservation::{Reservation, ReservationStatus};
use fleetdash_domain::time::{Timestamp, parse_timestamp};
use fleetdash_domain::vehicle::{Vehicle, VehicleStatus};
use serde_json::Value;

use crate::ports::Record;

fn field<'a>(record: &'a Record, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .find(|value| !value.is_null())
}

/// Text value of the first present field; numbers and booleans are rendered,
/// blank strings count as absent.
fn text(record: &Record, names: &[&str]) -> Option<String> {
    match field(record, names)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required<T>(record: &Record, names: &[&'static str]) -> Result<T, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    text(record, names)
        .ok_or(ValidationError::EmptyField(names[0]))?
        .parse()
}

fn timestamp(record: &Record, names: &[&'static str]) -> Result<Timestamp, ValidationError> {
    let raw = text(record, names).ok_or(ValidationError::EmptyField(names[0]))?;
    parse_timestamp(&raw)
}

fn optional_timestamp(record: &Record, names: &[&str]) -> Option<Timestamp> {
    text(record, names).and_then(|raw| parse_timestamp(&raw).ok())
}

/// Remap one vehicle row.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the id is missing or not numeric.
pub fn vehicle(record: &Record) -> Result<Vehicle, ValidationError> {
    let id: VehicleId = required(record, &["id"])?;
    let status = text(record, &["status"]).map_or(Ok(VehicleStatus::Available), |raw| raw.parse())?;
    Ok(Vehicle {
        id,
        model: text(record, &["model"]).unwrap_or_default(),
        plate: text(record, &["plate"]).unwrap_or_default(),
        vehicle_type: text(record, &["type", "vehicle_type", "vehicleType"]).unwrap_or_default(),
        status,
        current_location: text(record, &["currentLocation", "current_location", "location"]),
        last_user: text(record, &["lastUser", "last_user"]),
    })
}

/// Remap one project row. A missing rate counts as `0` km per day.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the id is missing or not numeric.
pub fn project(record: &Record) -> Result<Project, ValidationError> {
    let id: ProjectId = required(record, &["id"])?;
    let km_per_day = text(record, &["kmPerDay", "km_per_day"])
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or_default();
    Ok(Project {
        id,
        name: text(record, &["name"]).unwrap_or_default(),
        km_per_day,
    })
}

/// Resolve an upstream project reference: an explicit id column first,
/// then the `project` column matched by name, then by id.
fn project_ref(record: &Record, projects: &[Project]) -> Option<ProjectId> {
    if let Some(id) = text(record, &["projectId", "project_id"]) {
        return id.parse().ok();
    }
    let reference = text(record, &["project"])?;
    let resolved = projects
        .iter()
        .find(|p| p.name == reference)
        .or_else(|| {
            let id = reference.parse::<ProjectId>().ok()?;
            projects.iter().find(|p| p.id == id)
        })
        .map(|p| p.id);
    if resolved.is_none() {
        tracing::warn!(project = %reference, "unresolved project reference, dropping it");
    }
    resolved
}

/// Remap one reservation row, resolving its project against `projects`.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the id, vehicle id or either bound is
/// missing or malformed, or when the status is unknown.
pub fn reservation(record: &Record, projects: &[Project]) -> Result<Reservation, ValidationError> {
    let id: ReservationId = required(record, &["id"])?;
    let vehicle_id: VehicleId = required(record, &["vehicleId", "vehicle_id"])?;
    let start_date = timestamp(record, &["startDate", "start_date"])?;
    let end_date = timestamp(record, &["endDate", "end_date"])?;
    let status =
        text(record, &["status"]).map_or(Ok(ReservationStatus::Pending), |raw| raw.parse())?;
    Ok(Reservation {
        id,
        vehicle_id,
        booker_name: text(record, &["bookerName", "booker_name"]).unwrap_or_default(),
        sector: text(record, &["sector"]).unwrap_or_default(),
        project_id: project_ref(record, projects),
        start_date,
        end_date,
        notes: text(record, &["notes"]),
        status,
        approved_by: text(record, &["approvedBy", "approved_by"]),
        approved_at: optional_timestamp(record, &["approvedAt", "approved_at"]),
    })
}

fn remap_all<T>(
    kind: &'static str,
    records: &[Record],
    mut remap: impl FnMut(&Record) -> Result<T, ValidationError>,
) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| {
            remap(record)
                .inspect_err(|err| tracing::warn!(kind, error = %err, "skipping malformed record"))
                .ok()
        })
        .collect()
}

/// Remap every vehicle row, skipping malformed ones.
pub fn vehicles(records: &[Record]) -> Vec<Vehicle> {
    remap_all("vehicle", records, vehicle)
}

/// Remap every project row, skipping malformed ones.
pub fn projects(records: &[Record]) -> Vec<Project> {
    remap_all("project", records, project)
}

/// Remap every reservation row, skipping malformed ones.
pub fn reservations(records: &[Record], projects: &[Project]) -> Vec<Reservation> {
    remap_all("reservation", records, |record| reservation(record, projects))
}
