//! Utilidades de validación
//!
//! Funciones helper para las reglas que cruzan varios campos y no pueden
//! expresarse con los derives de `validator`.

use chrono::NaiveDate;

use crate::utils::errors::{validation_error, AppError};

/// Valida que el rango de fechas de un abono sea coherente:
/// la fecha de fin debe ser estrictamente posterior a la de inicio.
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), AppError> {
    if end_date <= start_date {
        return Err(validation_error(
            "end_date",
            "end_date debe ser posterior a start_date",
        ));
    }
    Ok(())
}

/// Valida que un string no esté vacío (tras recortar espacios)
pub fn validate_not_empty(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(validation_error(field, "no puede estar vacío"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_date_after_start_date_is_valid() {
        assert!(validate_date_range(date(2025, 1, 1), date(2025, 2, 1)).is_ok());
    }

    #[test]
    fn test_end_date_equal_to_start_date_is_rejected() {
        assert!(validate_date_range(date(2025, 1, 1), date(2025, 1, 1)).is_err());
    }

    #[test]
    fn test_end_date_before_start_date_is_rejected() {
        assert!(validate_date_range(date(2025, 2, 1), date(2025, 1, 1)).is_err());
    }

    #[test]
    fn test_blank_string_is_rejected() {
        assert!(validate_not_empty("location", "   ").is_err());
        assert!(validate_not_empty("location", "Paris").is_ok());
    }
}
