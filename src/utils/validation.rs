//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos de los formularios.

use chrono::{DateTime, NaiveDateTime, Utc};
use validator::ValidationError;

/// Formato de fecha/hora que envían los formularios del frontend
pub const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Validar y convertir el datetime de un formulario (interpretado como UTC)
pub fn validate_form_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    NaiveDateTime::parse_from_str(value, FORM_DATETIME_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DDTHH:MM".to_string());
            error
        })
}

/// Validador custom para campos datetime de los requests
pub fn validate_datetime_field(value: &str) -> Result<(), ValidationError> {
    validate_form_datetime(value).map(|_| ())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_validate_form_datetime() {
        let parsed = validate_form_datetime("2025-08-25T14:30").unwrap();
        assert_eq!(parsed.hour(), 14);
        assert_eq!(parsed.minute(), 30);

        assert!(validate_form_datetime("2025-08-25 14:30").is_err());
        assert!(validate_form_datetime("25/08/2025T14:30").is_err());
        assert!(validate_form_datetime("").is_err());
    }

    #[test]
    fn test_form_datetime_is_utc() {
        let parsed = validate_form_datetime("2025-01-01T00:00").unwrap();
        assert_eq!(parsed.timezone(), Utc);
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("+33 6 12 34 56 78").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }
}
