use crate::error::Result;
use crate::models::{Feature, SpatialReference};
use crate::utils::constants::{FIELD_DATE, FIELD_LOCATION_CLASS, FIELD_TAG_ID};
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streams a GeoJSON FeatureCollection, one feature per append.
///
/// A legacy `crs` member is emitted for anything other than WGS84.
pub struct GeoJsonFeatureWriter {
    out: BufWriter<File>,
    rows_written: u64,
}

impl GeoJsonFeatureWriter {
    pub fn create(path: &Path, sr: SpatialReference) -> Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);

        out.write_all(b"{\"type\":\"FeatureCollection\",")?;
        if !sr.is_geographic() {
            let crs = json!({ "type": "name", "properties": { "name": sr.urn() } });
            out.write_all(b"\"crs\":")?;
            serde_json::to_writer(&mut out, &crs)?;
            out.write_all(b",")?;
        }
        out.write_all(b"\"features\":[")?;

        Ok(Self {
            out,
            rows_written: 0,
        })
    }

    pub fn append(&mut self, feature: &Feature) -> Result<()> {
        if self.rows_written > 0 {
            self.out.write_all(b",")?;
        }

        let value = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [feature.x, feature.y] },
            "properties": {
                FIELD_TAG_ID: feature.tag_id,
                FIELD_LOCATION_CLASS: feature.location_class,
                FIELD_DATE: feature.date,
            }
        });
        serde_json::to_writer(&mut self.out, &value)?;

        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn finish(mut self) -> Result<u64> {
        self.out.write_all(b"]}")?;
        self.out.flush()?;
        Ok(self.rows_written)
    }
}
