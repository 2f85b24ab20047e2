//! Fleet vehicles, identified to users by their plate.

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, ValidationError};
use crate::id::VehicleId;

/// Stored vehicle status.
///
/// Only [`Maintenance`](Self::Maintenance) is authoritative; `booked` vs
/// `available` is derived from reservations on read
/// (see [`derive_vehicle_status`](crate::availability::derive_vehicle_status)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Available,
    Booked,
    Maintenance,
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::Booked => f.write_str("booked"),
            Self::Maintenance => f.write_str("maintenance"),
        }
    }
}

impl std::str::FromStr for VehicleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "booked" => Ok(Self::Booked),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ValidationError::InvalidValue {
                field: "vehicle status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub model: String,
    pub plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub status: VehicleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_user: Option<String>,
}

impl Vehicle {
    /// Case-insensitive substring match on model, plate or type.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || [&self.model, &self.plate, &self.vehicle_type]
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Fields of a vehicle before the store assigns its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub model: String,
    pub plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub last_user: Option<String>,
}

impl NewVehicle {
    /// Check the fields a caller must supply. The store itself never calls this.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Validation`] when `model`, `plate` or `type` is blank.
    pub fn validate(&self) -> Result<(), FleetError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyField("model").into());
        }
        if self.plate.trim().is_empty() {
            return Err(ValidationError::EmptyField("plate").into());
        }
        if self.vehicle_type.trim().is_empty() {
            return Err(ValidationError::EmptyField("type").into());
        }
        Ok(())
    }

    #[must_use]
    pub fn with_id(self, id: VehicleId) -> Vehicle {
        Vehicle {
            id,
            model: self.model,
            plate: self.plate,
            vehicle_type: self.vehicle_type,
            status: self.status,
            current_location: self.current_location,
            last_user: self.last_user,
        }
    }
}

/// Partial update merged into an existing [`Vehicle`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehiclePatch {
    pub model: Option<String>,
    pub plate: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub status: Option<VehicleStatus>,
    pub current_location: Option<String>,
    pub last_user: Option<String>,
}

impl VehiclePatch {
    pub fn apply(self, vehicle: &mut Vehicle) {
        if let Some(model) = self.model {
            vehicle.model = model;
        }
        if let Some(plate) = self.plate {
            vehicle.plate = plate;
        }
        if let Some(vehicle_type) = self.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(status) = self.status {
            vehicle.status = status;
        }
        if self.current_location.is_some() {
            vehicle.current_location = self.current_location;
        }
        if self.last_user.is_some() {
            vehicle.last_user = self.last_user;
        }
    }
}
