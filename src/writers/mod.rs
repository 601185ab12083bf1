pub mod csv_writer;
pub mod geojson_writer;
pub mod parquet_writer;

pub use csv_writer::CsvFeatureWriter;
pub use geojson_writer::GeoJsonFeatureWriter;
pub use parquet_writer::{ParquetFeatureWriter, ParquetFileInfo, ParquetWriter};

use crate::config::ImportSettings;
use crate::error::{ImportError, Result};
use crate::models::Feature;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Parquet,
    GeoJson,
    Csv,
}

impl OutputFormat {
    /// Pick the output format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "parquet" | "geoparquet" => Ok(OutputFormat::Parquet),
            "geojson" | "json" => Ok(OutputFormat::GeoJson),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(ImportError::Config(format!(
                "Unsupported output format '{}' for {} (use .parquet, .geojson or .csv)",
                other,
                path.display()
            ))),
        }
    }
}

/// The single write handle of an import run. Creating it creates the empty
/// feature class (replacing any existing one); `finish` releases it.
pub enum FeatureClassWriter {
    Parquet(ParquetFeatureWriter),
    GeoJson(GeoJsonFeatureWriter),
    Csv(CsvFeatureWriter),
}

impl FeatureClassWriter {
    pub fn create(path: &Path, settings: &ImportSettings) -> Result<Self> {
        let format = OutputFormat::from_path(path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let writer = match format {
            OutputFormat::Parquet => FeatureClassWriter::Parquet(
                ParquetWriter::new()
                    .with_compression(&settings.compression)?
                    .with_row_group_size(settings.row_group_size)
                    .create(path, settings.spatial_reference)?,
            ),
            OutputFormat::GeoJson => FeatureClassWriter::GeoJson(GeoJsonFeatureWriter::create(
                path,
                settings.spatial_reference,
            )?),
            OutputFormat::Csv => FeatureClassWriter::Csv(CsvFeatureWriter::create(path)?),
        };

        info!(
            "Created {:?} point feature class {} ({})",
            format,
            path.display(),
            settings.spatial_reference
        );
        Ok(writer)
    }

    pub fn append(&mut self, feature: &Feature) -> Result<()> {
        match self {
            FeatureClassWriter::Parquet(w) => w.append(feature),
            FeatureClassWriter::GeoJson(w) => w.append(feature),
            FeatureClassWriter::Csv(w) => w.append(feature),
        }
    }

    pub fn rows_written(&self) -> u64 {
        match self {
            FeatureClassWriter::Parquet(w) => w.rows_written(),
            FeatureClassWriter::GeoJson(w) => w.rows_written(),
            FeatureClassWriter::Csv(w) => w.rows_written(),
        }
    }

    pub fn finish(self) -> Result<u64> {
        match self {
            FeatureClassWriter::Parquet(w) => w.finish(),
            FeatureClassWriter::GeoJson(w) => w.finish(),
            FeatureClassWriter::Csv(w) => w.finish(),
        }
    }
}
