//! Modelo de User y Profile
//!
//! Cuentas de usuario con su perfil asociado (móvil y género).
//! El perfil se crea junto con la cuenta durante el registro.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_phone;

/// Etiquetas de género, en orden de código (0..=2).
pub const GENDER_LABELS: [&str; 3] = ["female", "male", "NG"];

/// Etiqueta legible para un código de género. Códigos desconocidos
/// se tratan como "NG" (not given).
pub fn gender_label(code: i16) -> &'static str {
    match code {
        0 => GENDER_LABELS[0],
        1 => GENDER_LABELS[1],
        _ => GENDER_LABELS[2],
    }
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Profile - mapea exactamente a la tabla profiles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mobile: String,
    pub gender: i16,
    pub created_at: DateTime<Utc>,
}

/// Request para registrar un nuevo usuario
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    #[validate(custom = "validate_phone")]
    pub mobile: String,

    #[validate(range(min = 0, max = 2))]
    pub gender: i16,
}

/// Request de login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: Option<String>,
    pub user_id: Option<String>,
    pub full_name: Option<String>,
}

impl LoginResponse {
    pub fn success(token: String, user_id: String, full_name: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            message: None,
            user_id: Some(user_id),
            full_name: Some(full_name),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            token: None,
            message: Some(message),
            user_id: None,
            full_name: None,
        }
    }
}

/// Response de usuario para la API (sin password)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub gender: i16,
    pub gender_label: &'static str,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_parts(user: User, profile: Profile) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            mobile: profile.mobile,
            gender: profile.gender,
            gender_label: gender_label(profile.gender),
            created_at: user.created_at,
        }
    }
}

/// Contexto del formulario de registro (GET /register)
#[derive(Debug, Serialize)]
pub struct RegisterFormContext {
    pub genders: [&'static str; 3],
}

impl Default for RegisterFormContext {
    fn default() -> Self {
        Self {
            genders: GENDER_LABELS,
        }
    }
}
