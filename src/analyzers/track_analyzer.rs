use crate::error::Result;
use crate::models::observation::parse_timestamp;
use crate::models::{Feature, SpatialReference};
use crate::writers::ParquetWriter;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug)]
pub struct TrackStatistics {
    pub total_records: usize,
    pub spatial_reference: Option<SpatialReference>,
    pub records_per_tag: BTreeMap<i64, usize>,
    pub location_classes: BTreeMap<String, usize>,
    pub bounds: Option<GeographicBounds>,
    pub time_span: Option<(NaiveDateTime, NaiveDateTime)>,
    pub unparsed_timestamps: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeographicBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl GeographicBounds {
    fn extend(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }
}

impl TrackStatistics {
    pub fn unique_tags(&self) -> usize {
        self.records_per_tag.len()
    }

    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== ARGOS Track Summary ===\n");
        summary.push_str(&format!("Total fixes: {}\n", self.total_records));
        summary.push_str(&format!(
            "Spatial reference: {}\n",
            self.spatial_reference
                .map(|sr| sr.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        ));
        summary.push_str(&format!("Tags: {}\n", self.unique_tags()));
        for (tag, count) in &self.records_per_tag {
            summary.push_str(&format!("  {}: {} fixes\n", tag, count));
        }

        if !self.location_classes.is_empty() {
            summary.push_str("Location classes:\n");
            for (lc, count) in &self.location_classes {
                summary.push_str(&format!(
                    "  {}: {} ({:.1}%)\n",
                    lc,
                    count,
                    100.0 * *count as f64 / self.total_records as f64
                ));
            }
        }

        if let Some(bounds) = &self.bounds {
            let unit = match self.spatial_reference {
                Some(sr) if !sr.is_geographic() => "m",
                _ => "°",
            };
            summary.push_str(&format!(
                "Bounds: X [{:.3}{unit}, {:.3}{unit}], Y [{:.3}{unit}, {:.3}{unit}]\n",
                bounds.min_x,
                bounds.max_x,
                bounds.min_y,
                bounds.max_y,
                unit = unit
            ));
        }

        if let Some((first, last)) = &self.time_span {
            summary.push_str(&format!("Time span: {} to {}\n", first, last));
        }
        if self.unparsed_timestamps > 0 {
            summary.push_str(&format!(
                "Unparsed timestamps: {}\n",
                self.unparsed_timestamps
            ));
        }

        summary
    }
}

pub struct TrackAnalyzer;

impl TrackAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_parquet(&self, path: &Path) -> Result<TrackStatistics> {
        self.analyze_parquet_with_limit(path, 0)
    }

    /// Analyze up to `limit` features of a feature class (0 = all)
    pub fn analyze_parquet_with_limit(&self, path: &Path, limit: usize) -> Result<TrackStatistics> {
        let (spatial_reference, features) =
            ParquetWriter::new().read_features_with_limit(path, limit)?;
        Ok(self.analyze_features(&features, spatial_reference))
    }

    pub fn analyze_features(
        &self,
        features: &[Feature],
        spatial_reference: Option<SpatialReference>,
    ) -> TrackStatistics {
        let mut stats = TrackStatistics {
            total_records: features.len(),
            spatial_reference,
            records_per_tag: BTreeMap::new(),
            location_classes: BTreeMap::new(),
            bounds: None,
            time_span: None,
            unparsed_timestamps: 0,
        };

        for feature in features {
            *stats.records_per_tag.entry(feature.tag_id).or_default() += 1;

            if let Some(lc) = &feature.location_class {
                *stats.location_classes.entry(lc.clone()).or_default() += 1;
            }

            match stats.bounds.as_mut() {
                Some(bounds) => bounds.extend(feature.x, feature.y),
                None => {
                    stats.bounds = Some(GeographicBounds {
                        min_x: feature.x,
                        max_x: feature.x,
                        min_y: feature.y,
                        max_y: feature.y,
                    })
                }
            }

            let Some(date) = feature.date.as_deref() else {
                continue;
            };
            match parse_timestamp(date) {
                Some(ts) => {
                    stats.time_span = Some(match stats.time_span {
                        Some((first, last)) => (first.min(ts), last.max(ts)),
                        None => (ts, ts),
                    });
                }
                None => stats.unparsed_timestamps += 1,
            }
        }

        stats
    }
}

impl Default for TrackAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn feature(tag_id: i64, lc: &str, date: &str, x: f64, y: f64) -> Feature {
        Feature {
            tag_id,
            location_class: Some(lc.to_string()),
            date: Some(date.to_string()),
            x,
            y,
        }
    }

    #[test]
    fn test_analyze_features() {
        let features = vec![
            feature(20616, "3", "07/03/03 13:52:36", -120.25, 34.5),
            feature(20616, "A", "07/05/03 08:00:00", -121.0, 35.0),
            feature(20617, "3", "garbled", -119.5, 33.0),
        ];

        let stats = TrackAnalyzer::new().analyze_features(&features, Some(SpatialReference::Wgs84));

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.unique_tags(), 2);
        assert_eq!(stats.records_per_tag[&20616], 2);
        assert_eq!(stats.location_classes["3"], 2);
        assert_eq!(
            stats.bounds,
            Some(GeographicBounds {
                min_x: -121.0,
                max_x: -119.5,
                min_y: 33.0,
                max_y: 35.0
            })
        );

        let (first, last) = stats.time_span.unwrap();
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2003, 7, 3).unwrap());
        assert_eq!(last.date(), NaiveDate::from_ymd_opt(2003, 7, 5).unwrap());
        assert_eq!(stats.unparsed_timestamps, 1);

        let summary = stats.detailed_summary();
        assert!(summary.contains("Total fixes: 3"));
        assert!(summary.contains("EPSG:4326"));
    }

    #[test]
    fn test_empty_dataset() {
        let stats = TrackAnalyzer::new().analyze_features(&[], None);
        assert_eq!(stats.total_records, 0);
        assert!(stats.bounds.is_none());
        assert!(stats.detailed_summary().contains("unknown"));
    }
}
