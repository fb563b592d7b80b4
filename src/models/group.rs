//! Modelo de Group
//!
//! Grupos de compartición. Cada usuario tiene como máximo un grupo por
//! tamaño de pasajeros; los rides compartidos se enlazan a grupos vía
//! la tabla ride_groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Group - mapea exactamente a la tabla sharing_groups
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub user_id: Uuid,
    pub passenger_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Fila de la tabla de enlace ride_groups
#[derive(Debug, Clone, FromRow)]
pub struct RideGroupLink {
    pub ride_id: Uuid,
    pub group_id: Uuid,
}
