//! Parsing of coordinate strings entered by garden staff
//!
//! Values come from forms where either `.` or `,` is used as the decimal
//! separator, e.g. `"55.7512"` or `"55,7512"`.

use thiserror::Error;

/// Coordinate parsing failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("not a number: '{0}'")]
    NotANumber(String),

    #[error("{axis} {value} is outside [-{limit}, {limit}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        limit: f64,
    },
}

/// Parse a decimal number accepting `,` as the decimal separator
pub fn parse_coordinate(raw: &str) -> Result<f64, CoordinateError> {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoordinateError::NotANumber(raw.to_string())),
    }
}

/// Parse a latitude in degrees
pub fn parse_latitude(raw: &str) -> Result<f64, CoordinateError> {
    parse_bounded(raw, "latitude", 90.0)
}

/// Parse a longitude in degrees
pub fn parse_longitude(raw: &str) -> Result<f64, CoordinateError> {
    parse_bounded(raw, "longitude", 180.0)
}

fn parse_bounded(raw: &str, axis: &'static str, limit: f64) -> Result<f64, CoordinateError> {
    let value = parse_coordinate(raw)?;
    if value.abs() > limit {
        return Err(CoordinateError::OutOfRange { axis, value, limit });
    }
    Ok(value)
}
