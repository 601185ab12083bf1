use crate::config::{AttributeSet, ImportSettings};
use crate::error::Result;
use crate::models::SpatialReference;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "argos-import")]
#[command(about = "Load ARGOS telemetry fixes into a point feature class")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a directory (or single file) of ARGOS data into a feature class
    Import {
        #[arg(help = "ARGOS data directory or file")]
        input: PathBuf,

        #[arg(help = "Output feature class (.parquet, .geojson or .csv) [default: output/argos-tracks-{YYMMDD}.parquet]")]
        output: Option<PathBuf>,

        #[arg(
            value_parser = parse_spatial_reference,
            help = "Output spatial reference (4326, 3857 or 54002)"
        )]
        spatial_reference: Option<SpatialReference>,

        #[command(flatten)]
        settings: SettingsArgs,

        #[arg(long, help = "Hide the progress bar")]
        no_progress: bool,
    },

    /// Parse ARGOS data and report problems without writing output
    Validate {
        #[arg(help = "ARGOS data directory or file")]
        input: PathBuf,

        #[arg(long, value_parser = parse_spatial_reference)]
        spatial_reference: Option<SpatialReference>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Display information about a Parquet feature class
    Info {
        #[arg(help = "Parquet feature class")]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,

        #[arg(
            long,
            default_value = "0",
            help = "Maximum records to analyze (0 = all records)"
        )]
        analysis_limit: usize,
    },
}

/// Options layered over the settings file and environment
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    #[arg(short, long, help = "Settings file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, help = "Attributes extracted per fix")]
    pub attributes: Option<AttributeSet>,

    #[arg(long, help = "Only parse files whose name contains this text (e.g. '2003')")]
    pub file_pattern: Option<String>,

    #[arg(long, help = "Parquet compression (snappy, gzip, lz4, zstd, none)")]
    pub compression: Option<String>,

    #[arg(long, help = "Rows per Parquet row group")]
    pub row_group_size: Option<usize>,
}

impl SettingsArgs {
    /// Load the layered settings and apply command-line overrides on top
    pub fn resolve(&self, spatial_reference: Option<SpatialReference>) -> Result<ImportSettings> {
        use validator::Validate;

        let mut settings = ImportSettings::load(self.config.as_deref())?;

        if let Some(sr) = spatial_reference {
            settings.spatial_reference = sr;
        }
        if let Some(attributes) = self.attributes {
            settings.attributes = attributes;
        }
        if let Some(pattern) = &self.file_pattern {
            settings.file_pattern = pattern.clone();
        }
        if let Some(compression) = &self.compression {
            settings.compression = compression.clone();
        }
        if let Some(size) = self.row_group_size {
            settings.row_group_size = size;
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn parse_spatial_reference(value: &str) -> std::result::Result<SpatialReference, String> {
    value.parse::<SpatialReference>().map_err(|e| e.to_string())
}
