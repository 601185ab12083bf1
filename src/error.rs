use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid tag ID: '{0}'")]
    InvalidTagId(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Unsupported spatial reference: {0}")]
    UnsupportedSpatialReference(u32),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ImportError {
    /// True for errors that only invalidate a single record and leave the
    /// surrounding file scan intact.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            ImportError::InvalidCoordinate(_)
                | ImportError::InvalidTagId(_)
                | ImportError::MissingField(_)
                | ImportError::Projection(_)
                | ImportError::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_level_classification() {
        assert!(ImportError::InvalidCoordinate("x".into()).is_record_level());
        assert!(ImportError::MissingField("latitude".into()).is_record_level());
        assert!(!ImportError::Config("bad".into()).is_record_level());
        assert!(!ImportError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")).is_record_level());
    }
}
