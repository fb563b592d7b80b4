//! Modelo de Vehicle
//!
//! Vehículos registrados por los usuarios. El tipo de vehículo determina
//! la capacidad total de asientos usada al compartir un ride.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Tipos de vehículo soportados, almacenados como código SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Sedan,
    Suv,
    Coupe,
    Hatchback,
    MiniVan,
}

impl VehicleType {
    /// Todos los tipos, en orden de código (0..=4).
    pub fn all() -> [VehicleType; 5] {
        [
            VehicleType::Sedan,
            VehicleType::Suv,
            VehicleType::Coupe,
            VehicleType::Hatchback,
            VehicleType::MiniVan,
        ]
    }

    pub fn from_code(code: i16) -> Option<VehicleType> {
        match code {
            0 => Some(VehicleType::Sedan),
            1 => Some(VehicleType::Suv),
            2 => Some(VehicleType::Coupe),
            3 => Some(VehicleType::Hatchback),
            4 => Some(VehicleType::MiniVan),
            _ => None,
        }
    }

    pub fn code(&self) -> i16 {
        match self {
            VehicleType::Sedan => 0,
            VehicleType::Suv => 1,
            VehicleType::Coupe => 2,
            VehicleType::Hatchback => 3,
            VehicleType::MiniVan => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Sedan => "Sedan",
            VehicleType::Suv => "SUV",
            VehicleType::Coupe => "Coupe",
            VehicleType::Hatchback => "Hatchback",
            VehicleType::MiniVan => "Mini van",
        }
    }

    /// Asientos totales del vehículo, conductor incluido.
    pub fn capacity(&self) -> i32 {
        match self {
            VehicleType::Sedan => 4,
            VehicleType::Suv => 6,
            VehicleType::Coupe => 2,
            VehicleType::Hatchback => 4,
            VehicleType::MiniVan => 7,
        }
    }
}

/// Vehicle - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub plate_number: String,
    pub vehicle_type: i16,
    pub created_at: DateTime<Utc>,
}

/// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 20))]
    pub plate_number: String,

    #[validate(range(min = 0, max = 4))]
    pub vehicle_type: i16,
}

/// Response de vehículo para la API
#[derive(Debug, Clone, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub plate_number: String,
    pub vehicle_type: i16,
    pub vehicle_type_label: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        let (label, capacity) = match VehicleType::from_code(vehicle.vehicle_type) {
            Some(vt) => (vt.label().to_string(), vt.capacity()),
            None => ("Unknown".to_string(), 0),
        };
        Self {
            id: vehicle.id,
            plate_number: vehicle.plate_number,
            vehicle_type: vehicle.vehicle_type,
            vehicle_type_label: label,
            capacity,
            created_at: vehicle.created_at,
        }
    }
}

/// Opción de tipo de vehículo para el formulario de ride
#[derive(Debug, Clone, Serialize)]
pub struct VehicleTypeOption {
    pub code: i16,
    pub label: &'static str,
    pub capacity: i32,
}

/// Lista de opciones (código, etiqueta, capacidad) para los formularios.
pub fn vehicle_type_options() -> Vec<VehicleTypeOption> {
    VehicleType::all()
        .iter()
        .map(|vt| VehicleTypeOption {
            code: vt.code(),
            label: vt.label(),
            capacity: vt.capacity(),
        })
        .collect()
}
