use crate::error::Result;
use crate::models::SpatialReference;
use crate::utils::constants::{
    COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE, COMPRESSION_SNAPPY, COMPRESSION_ZSTD,
    DEFAULT_ROW_GROUP_SIZE, HEADER_TOKEN, README_FILE,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::{Validate, ValidationError};

/// Prefix for environment overrides, e.g. `ARGOS_IMPORT__SPATIAL_REFERENCE=3857`
pub const ENV_PREFIX: &str = "ARGOS_IMPORT";

/// Which header attributes are extracted for every fix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AttributeSet {
    /// TagID, LC and Date
    #[default]
    Full,
    /// TagID only; LC and Date are written as nulls
    Minimal,
}

impl AttributeSet {
    pub fn includes_details(&self) -> bool {
        matches!(self, AttributeSet::Full)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ImportSettings {
    pub spatial_reference: SpatialReference,

    pub attributes: AttributeSet,

    pub skip_files: Vec<String>,

    pub file_pattern: String,

    #[validate(length(min = 1))]
    pub header_token: String,

    #[validate(custom(function = "validate_compression"))]
    pub compression: String,

    #[validate(range(min = 1))]
    pub row_group_size: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            spatial_reference: SpatialReference::default(),
            attributes: AttributeSet::default(),
            skip_files: vec![README_FILE.to_string()],
            file_pattern: String::new(),
            header_token: HEADER_TOKEN.to_string(),
            compression: COMPRESSION_SNAPPY.to_string(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

impl ImportSettings {
    /// Layer defaults, an optional settings file and `ARGOS_IMPORT__*`
    /// environment variables
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_file, None)
    }

    /// Same as [`ImportSettings::load`], reading the environment layer from
    /// `env` instead of the process environment when given
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&ImportSettings::default())?);

        if let Some(path) = config_file {
            debug!("Loading settings from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: ImportSettings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("skip_files")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn should_skip(&self, file_name: &str) -> bool {
        self.skip_files.iter().any(|skip| skip == file_name)
            || (!self.file_pattern.is_empty() && !file_name.contains(&self.file_pattern))
    }
}

fn validate_compression(compression: &str) -> std::result::Result<(), ValidationError> {
    match compression.to_lowercase().as_str() {
        COMPRESSION_SNAPPY | COMPRESSION_GZIP | COMPRESSION_LZ4 | COMPRESSION_ZSTD
        | COMPRESSION_NONE => Ok(()),
        _ => Err(ValidationError::new("unsupported_compression")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = ImportSettings::default();
        assert_eq!(settings.spatial_reference, SpatialReference::Wgs84);
        assert_eq!(settings.attributes, AttributeSet::Full);
        assert_eq!(settings.skip_files, vec!["README.txt".to_string()]);
        assert_eq!(settings.header_token, "Date :");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_should_skip() {
        let mut settings = ImportSettings::default();
        assert!(settings.should_skip("README.txt"));
        assert!(!settings.should_skip("1997dg.txt"));

        settings.file_pattern = "2003".to_string();
        assert!(settings.should_skip("1997dg.txt"));
        assert!(!settings.should_skip("2003dg.txt"));
    }

    #[test]
    fn test_invalid_settings() {
        let mut settings = ImportSettings::default();
        settings.row_group_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = ImportSettings::default();
        settings.compression = "brotli".to_string();
        assert!(settings.validate().is_err());

        let mut settings = ImportSettings::default();
        settings.header_token.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "spatial_reference = 3857")?;
        writeln!(file, "attributes = \"minimal\"")?;
        writeln!(file, "row_group_size = 50")?;

        let settings = ImportSettings::load(Some(file.path()))?;
        assert_eq!(settings.spatial_reference, SpatialReference::WebMercator);
        assert_eq!(settings.attributes, AttributeSet::Minimal);
        assert_eq!(settings.row_group_size, 50);
        assert_eq!(settings.compression, "snappy");

        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "spatial_reference = 3857")?;
        writeln!(file, "attributes = \"minimal\"")?;

        let env: config::Map<String, String> = [
            ("ARGOS_IMPORT__SPATIAL_REFERENCE", "54002"),
            ("ARGOS_IMPORT__SKIP_FILES", "a.txt,b.txt"),
            ("ARGOS_IMPORT__ROW_GROUP_SIZE", "25"),
            ("UNRELATED__ROW_GROUP_SIZE", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let settings = ImportSettings::load_with_env(Some(file.path()), Some(env))?;
        assert_eq!(settings.spatial_reference, SpatialReference::WorldEquidistantCylindrical);
        assert_eq!(settings.attributes, AttributeSet::Minimal);
        assert_eq!(settings.skip_files, vec!["a.txt".to_string(), "b.txt".to_string()]);
        assert_eq!(settings.row_group_size, 25);
        assert!(settings.should_skip("a.txt"));
        assert!(!settings.should_skip("README.txt"));
        Ok(())
    }

    #[test]
    fn test_environment_value_is_validated() {
        let env: config::Map<String, String> =
            [("ARGOS_IMPORT__ROW_GROUP_SIZE".to_string(), "0".to_string())].into_iter().collect();
        assert!(ImportSettings::load_with_env(None, Some(env)).is_err());
    }

    #[test]
    fn test_load_rejects_unknown_spatial_reference() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "spatial_reference = 32617")?;

        assert!(ImportSettings::load(Some(file.path())).is_err());
        Ok(())
    }
}
