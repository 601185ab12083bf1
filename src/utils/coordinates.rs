use crate::error::{ImportError, Result};
use crate::utils::constants::{AUTHALIC_RADIUS, WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_RADIUS};
use std::f64::consts::FRAC_PI_4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// Returns the sign applied for a hemisphere letter, or None if the letter
    /// does not belong to this axis
    fn hemisphere_sign(&self, letter: char) -> Option<f64> {
        match (self, letter.to_ascii_uppercase()) {
            (Axis::Latitude, 'N') | (Axis::Longitude, 'E') => Some(1.0),
            (Axis::Latitude, 'S') | (Axis::Longitude, 'W') => Some(-1.0),
            _ => None,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Convert an ARGOS compass-suffixed coordinate to signed decimal degrees
///
/// # Examples
/// ```
/// use argos_import::utils::coordinates::{parse_compass_coordinate, Axis};
///
/// assert_eq!(parse_compass_coordinate("34.500S", Axis::Latitude).unwrap(), -34.5);
/// assert_eq!(parse_compass_coordinate("120.250E", Axis::Longitude).unwrap(), 120.25);
/// ```
pub fn parse_compass_coordinate(token: &str, axis: Axis) -> Result<f64> {
    let trimmed = token.trim();

    let letter = trimmed.chars().last().ok_or_else(|| {
        ImportError::InvalidCoordinate(format!("Empty {} value", axis))
    })?;

    let sign = axis.hemisphere_sign(letter).ok_or_else(|| {
        ImportError::InvalidCoordinate(format!(
            "Invalid {} hemisphere in '{}'",
            axis, token
        ))
    })?;

    let magnitude = trimmed[..trimmed.len() - letter.len_utf8()]
        .parse::<f64>()
        .map_err(|_| {
            ImportError::InvalidCoordinate(format!("Invalid {} value: '{}'", axis, token))
        })?;

    if !magnitude.is_finite() || magnitude < 0.0 || magnitude > axis.limit() {
        return Err(ImportError::InvalidCoordinate(format!(
            "{} {} is outside [0, {}]",
            axis,
            magnitude,
            axis.limit()
        )));
    }

    Ok(sign * magnitude)
}

/// Project WGS84 degrees to spherical Web Mercator metres
pub fn web_mercator(longitude: f64, latitude: f64) -> Result<(f64, f64)> {
    if latitude.abs() > WEB_MERCATOR_MAX_LAT {
        return Err(ImportError::Projection(format!(
            "Latitude {} is beyond the Web Mercator limit of ±{}",
            latitude, WEB_MERCATOR_MAX_LAT
        )));
    }

    let x = WEB_MERCATOR_RADIUS * longitude.to_radians();
    let y = WEB_MERCATOR_RADIUS * (FRAC_PI_4 + latitude.to_radians() / 2.0).tan().ln();
    Ok((x, y))
}

/// Project WGS84 degrees to the World Equidistant Cylindrical plane (metres)
pub fn equidistant_cylindrical(longitude: f64, latitude: f64) -> (f64, f64) {
    (
        AUTHALIC_RADIUS * longitude.to_radians(),
        AUTHALIC_RADIUS * latitude.to_radians(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_signs() {
        assert_eq!(parse_compass_coordinate("34.500N", Axis::Latitude).unwrap(), 34.5);
        assert_eq!(parse_compass_coordinate("34.500S", Axis::Latitude).unwrap(), -34.5);
        assert_eq!(parse_compass_coordinate("120.250E", Axis::Longitude).unwrap(), 120.25);
        assert_eq!(parse_compass_coordinate("120.250W", Axis::Longitude).unwrap(), -120.25);
    }

    #[test]
    fn test_lowercase_and_whitespace() {
        assert_eq!(parse_compass_coordinate(" 10.0s ", Axis::Latitude).unwrap(), -10.0);
    }

    #[test]
    fn test_malformed_coordinates() {
        assert!(parse_compass_coordinate("", Axis::Latitude).is_err());
        assert!(parse_compass_coordinate("N", Axis::Latitude).is_err());
        assert!(parse_compass_coordinate("abcN", Axis::Latitude).is_err());
        assert!(parse_compass_coordinate("34.5", Axis::Latitude).is_err());
        assert!(parse_compass_coordinate("nanN", Axis::Latitude).is_err());
        assert!(parse_compass_coordinate("-34.5N", Axis::Latitude).is_err());
    }

    #[test]
    fn test_wrong_axis_letter() {
        assert!(parse_compass_coordinate("34.5E", Axis::Latitude).is_err());
        assert!(parse_compass_coordinate("120.0N", Axis::Longitude).is_err());
    }

    #[test]
    fn test_out_of_range() {
        assert!(parse_compass_coordinate("90.0N", Axis::Latitude).is_ok());
        assert!(parse_compass_coordinate("90.5N", Axis::Latitude).is_err());
        assert!(parse_compass_coordinate("180.0W", Axis::Longitude).is_ok());
        assert!(parse_compass_coordinate("181.0W", Axis::Longitude).is_err());
    }

    #[test]
    fn test_web_mercator() {
        let (x, y) = web_mercator(0.0, 0.0).unwrap();
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);

        let (x, _) = web_mercator(180.0, 0.0).unwrap();
        assert!((x - 20_037_508.342_789).abs() < 0.01);

        let (_, y) = web_mercator(0.0, 45.0).unwrap();
        assert!((y - 5_621_521.486_192).abs() < 0.01);

        assert!(web_mercator(0.0, 89.0).is_err());
    }

    #[test]
    fn test_equidistant_cylindrical() {
        let (x, y) = equidistant_cylindrical(-120.25, 34.5);
        assert!((x - -13_371_189.929).abs() < 0.01);
        assert!((y - 3_836_224.969).abs() < 0.01);
    }
}
