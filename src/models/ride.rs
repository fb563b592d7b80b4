//! Modelo de Ride
//!
//! Este módulo contiene el struct Ride y los requests/responses de todo
//! el ciclo de vida de un ride: creación, edición, búsqueda, detalle,
//! confirmación y finalización.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::VehicleType;
use crate::utils::validation::{validate_datetime_field, FORM_DATETIME_FORMAT};

/// Ride - mapea exactamente a la tabla rides
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ride {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub destination: String,
    pub arrive_time: DateTime<Utc>,
    pub passenger_count: i32,
    pub vehicle_type: i16,
    pub vehicle_id: Option<Uuid>,
    pub confirmed: bool,
    pub completed: bool,
    pub if_share: bool,
    pub created_at: DateTime<Utc>,
}

impl Ride {
    /// Estado derivado de los flags (confirmed, completed).
    /// Total sobre las cuatro combinaciones: completed domina.
    pub fn status(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else if self.confirmed {
            "Confirmed"
        } else {
            "Open"
        }
    }

    pub fn vehicle_type_label(&self) -> &'static str {
        match VehicleType::from_code(self.vehicle_type) {
            Some(vt) => vt.label(),
            None => "Unknown",
        }
    }
}

/// Request para crear o editar un ride
#[derive(Debug, Deserialize, Validate)]
pub struct RideRequest {
    #[validate(length(min = 1, max = 200))]
    pub destination: String,

    /// Fecha/hora de llegada en formato YYYY-MM-DDTHH:MM
    #[validate(custom = "validate_datetime_field")]
    pub arrive_time: String,

    #[validate(range(min = 1, max = 100))]
    pub passenger_count: i32,

    #[validate(range(min = 0, max = 4))]
    pub vehicle_type: i16,

    #[serde(default)]
    pub if_share: bool,
}

/// Request de búsqueda de rides compartidos: dirección de destino y
/// ventana de llegada [start, end].
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRideRequest {
    #[validate(length(min = 1, max = 200))]
    pub address: String,

    #[validate(custom = "validate_datetime_field")]
    pub start: String,

    #[validate(custom = "validate_datetime_field")]
    pub end: String,

    #[validate(range(min = 1, max = 100))]
    pub passenger_count: i32,
}

/// Request para unirse a un ride compartido
#[derive(Debug, Deserialize, Validate)]
pub struct JoinRideRequest {
    #[validate(range(min = 1, max = 100))]
    pub passenger_count: i32,
}

/// Request para confirmar un ride asignando un vehículo propio
#[derive(Debug, Deserialize)]
pub struct ConfirmRideRequest {
    pub vehicle_id: Uuid,
}

/// Response de ride para listados
#[derive(Debug, Clone, Serialize)]
pub struct RideResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub destination: String,
    pub arrive_time: DateTime<Utc>,
    pub passenger_count: i32,
    pub vehicle_type: i16,
    pub vehicle_type_label: &'static str,
    pub if_share: bool,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<Ride> for RideResponse {
    fn from(ride: Ride) -> Self {
        let status = ride.status();
        let vehicle_type_label = ride.vehicle_type_label();
        Self {
            id: ride.id,
            owner_id: ride.owner_id,
            destination: ride.destination,
            arrive_time: ride.arrive_time,
            passenger_count: ride.passenger_count,
            vehicle_type: ride.vehicle_type,
            vehicle_type_label,
            if_share: ride.if_share,
            status,
            created_at: ride.created_at,
        }
    }
}

/// Bloque de conductor/vehículo en el detalle de un ride.
/// Sin vehículo asignado se devuelven los placeholders del frontend.
#[derive(Debug, Clone, Serialize)]
pub struct DriverInfo {
    pub driver: String,
    pub plate: String,
    pub driver_phone: String,
    pub driver_email: String,
}

impl DriverInfo {
    pub fn not_assigned() -> Self {
        Self {
            driver: "Not assigned yet".to_string(),
            plate: "Unknown".to_string(),
            driver_phone: "Unknown".to_string(),
            driver_email: "Unknown".to_string(),
        }
    }
}

/// Compañero de viaje en el detalle de un ride compartido.
/// party_size es el tamaño del grupo con el que se unió.
#[derive(Debug, Clone, Serialize)]
pub struct CoRider {
    pub full_name: String,
    pub gender_label: &'static str,
    pub party_size: i32,
}

/// Response de detalle de un ride
#[derive(Debug, Serialize)]
pub struct RideDetailResponse {
    pub ride: RideResponse,
    pub owner_name: String,
    pub driver: DriverInfo,
    pub shared_by: Vec<CoRider>,
}

/// Contexto de la página "mis rides" (GET /ride/started),
/// agrupados por estado y ordenados por arrive_time
#[derive(Debug, Serialize)]
pub struct StartedRidesResponse {
    pub open_rides: Vec<RideResponse>,
    pub confirmed_rides: Vec<RideResponse>,
    pub completed_rides: Vec<RideResponse>,
}

/// Contexto del formulario de creación (GET /ride/require)
#[derive(Debug, Serialize)]
pub struct RideFormContext {
    pub vehicle_types: Vec<crate::models::vehicle::VehicleTypeOption>,
}

impl Default for RideFormContext {
    fn default() -> Self {
        Self {
            vehicle_types: crate::models::vehicle::vehicle_type_options(),
        }
    }
}

/// Contexto del formulario de edición con los valores actuales
#[derive(Debug, Serialize)]
pub struct EditRideFormContext {
    pub ride: RideResponse,
    /// arrive_time re-formateado para el input datetime del formulario
    pub arrive_time_form: String,
    pub vehicle_types: Vec<crate::models::vehicle::VehicleTypeOption>,
}

impl EditRideFormContext {
    pub fn new(ride: Ride) -> Self {
        let arrive_time_form = ride.arrive_time.format(FORM_DATETIME_FORMAT).to_string();
        Self {
            ride: RideResponse::from(ride),
            arrive_time_form,
            vehicle_types: crate::models::vehicle::vehicle_type_options(),
        }
    }
}

/// Contexto del formulario de búsqueda (GET /ride/search)
#[derive(Debug, Serialize)]
pub struct SearchFormContext {
    pub message: &'static str,
}

impl Default for SearchFormContext {
    fn default() -> Self {
        Self {
            message: "Results will be displayed below. ",
        }
    }
}

/// Resultados de búsqueda con el mensaje de conteo
#[derive(Debug, Serialize)]
pub struct SearchResultsResponse {
    pub message: String,
    pub results: Vec<RideResponse>,
}

impl SearchResultsResponse {
    pub fn new(results: Vec<RideResponse>) -> Self {
        let message = format!("{} orders found: ", results.len());
        Self { message, results }
    }
}
