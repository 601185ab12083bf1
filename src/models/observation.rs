use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;

/// Timestamp layouts seen in ARGOS downloads once '.' separators are
/// rewritten to '/'
const TIMESTAMP_FORMATS: [&str; 3] = ["%m/%d/%y %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// A single ARGOS fix in WGS84 decimal degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Observation {
    pub tag_id: i64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub location_class: Option<String>,

    pub timestamp: Option<String>,
}

impl Observation {
    pub fn new(
        tag_id: i64,
        latitude: f64,
        longitude: f64,
        location_class: Option<String>,
        timestamp: Option<String>,
    ) -> Result<Self> {
        let observation = Self {
            tag_id,
            latitude,
            longitude,
            location_class,
            timestamp,
        };
        observation.validate()?;
        Ok(observation)
    }

    /// Build the "MM/DD/YY HH:MM:SS" timestamp from the header date and time tokens
    pub fn format_timestamp(date: &str, time: &str) -> String {
        format!("{} {}", date.replace('.', "/"), time)
    }

    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.timestamp.as_deref()?)
    }
}

pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
}
