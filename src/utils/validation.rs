//! Utilidades de validación
//!
//! Funciones helper para validar y convertir fechas de las declaraciones
//! de seed.

use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use validator::ValidationError;

/// Formato de fecha de calendario aceptado en los ficheros de seed
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Medianoche UTC del día indicado
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Sumar años de calendario a un instante, saturando si el resultado no existe
pub fn add_years(from: DateTime<Utc>, years: u32) -> DateTime<Utc> {
    from.checked_add_months(Months::new(years * 12))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
