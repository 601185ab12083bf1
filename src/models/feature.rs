use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Observation, SpatialReference};

/// One row of the output feature class: point geometry plus TagID, LC and Date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "TagID")]
    pub tag_id: i64,

    #[serde(rename = "LC")]
    pub location_class: Option<String>,

    #[serde(rename = "Date")]
    pub date: Option<String>,

    #[serde(rename = "X")]
    pub x: f64,

    #[serde(rename = "Y")]
    pub y: f64,
}

impl Feature {
    pub fn from_observation(observation: &Observation, sr: SpatialReference) -> Result<Self> {
        let (x, y) = sr.project(observation.longitude, observation.latitude)?;

        Ok(Self {
            tag_id: observation.tag_id,
            location_class: observation.location_class.clone(),
            date: observation.timestamp.clone(),
            x,
            y,
        })
    }
}
