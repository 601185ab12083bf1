use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};
use crate::utils::constants::{EPSG_WEB_MERCATOR, EPSG_WGS84, ESRI_WORLD_EQUIDISTANT_CYLINDRICAL};
use crate::utils::coordinates::{equidistant_cylindrical, web_mercator};

/// Output coordinate systems. ARGOS fixes always arrive as WGS84 degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SpatialReference {
    #[default]
    Wgs84,
    WebMercator,
    WorldEquidistantCylindrical,
}

impl SpatialReference {
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            EPSG_WGS84 => Ok(SpatialReference::Wgs84),
            EPSG_WEB_MERCATOR => Ok(SpatialReference::WebMercator),
            ESRI_WORLD_EQUIDISTANT_CYLINDRICAL => Ok(SpatialReference::WorldEquidistantCylindrical),
            other => Err(ImportError::UnsupportedSpatialReference(other)),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            SpatialReference::Wgs84 => EPSG_WGS84,
            SpatialReference::WebMercator => EPSG_WEB_MERCATOR,
            SpatialReference::WorldEquidistantCylindrical => ESRI_WORLD_EQUIDISTANT_CYLINDRICAL,
        }
    }

    pub fn authority(&self) -> &'static str {
        match self {
            SpatialReference::WorldEquidistantCylindrical => "ESRI",
            _ => "EPSG",
        }
    }

    /// OGC URN, used by the GeoJSON crs member
    pub fn urn(&self) -> String {
        format!("urn:ogc:def:crs:{}::{}", self.authority(), self.code())
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, SpatialReference::Wgs84)
    }

    /// Map WGS84 longitude/latitude into this reference
    pub fn project(&self, longitude: f64, latitude: f64) -> Result<(f64, f64)> {
        match self {
            SpatialReference::Wgs84 => Ok((longitude, latitude)),
            SpatialReference::WebMercator => web_mercator(longitude, latitude),
            SpatialReference::WorldEquidistantCylindrical => {
                Ok(equidistant_cylindrical(longitude, latitude))
            }
        }
    }
}

impl TryFrom<u32> for SpatialReference {
    type Error = ImportError;

    fn try_from(code: u32) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<SpatialReference> for u32 {
    fn from(sr: SpatialReference) -> Self {
        sr.code()
    }
}

impl std::fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.authority(), self.code())
    }
}

impl std::str::FromStr for SpatialReference {
    type Err = ImportError;

    /// Accepts "4326", "EPSG:4326" or "ESRI:54002"
    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .trim()
            .rsplit(':')
            .next()
            .unwrap_or_default();
        let code = digits.parse::<u32>().map_err(|_| {
            ImportError::Config(format!("Invalid spatial reference: '{}'", s))
        })?;
        Self::from_code(code)
    }
}
