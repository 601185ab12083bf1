use crate::error::Result;
use crate::models::Feature;
use crate::utils::constants::{FIELD_DATE, FIELD_LOCATION_CLASS, FIELD_TAG_ID, FIELD_X, FIELD_Y};
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

pub struct CsvFeatureWriter {
    writer: csv::Writer<File>,
    rows_written: u64,
}

impl CsvFeatureWriter {
    /// Header is written up front so an empty import still carries the schema
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record([FIELD_TAG_ID, FIELD_LOCATION_CLASS, FIELD_DATE, FIELD_X, FIELD_Y])?;

        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn append(&mut self, feature: &Feature) -> Result<()> {
        self.writer.serialize(feature)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_output() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let mut writer = CsvFeatureWriter::create(temp_file.path())?;
        writer.append(&Feature {
            tag_id: 20616,
            location_class: Some("3".into()),
            date: Some("07/03/03 13:52:36".into()),
            x: -120.25,
            y: 34.5,
        })?;
        writer.append(&Feature {
            tag_id: 20617,
            location_class: None,
            date: None,
            x: 1.0,
            y: 2.0,
        })?;
        assert_eq!(writer.finish()?, 2);

        let text = std::fs::read_to_string(temp_file.path())?;
        assert_eq!(
            text,
            "TagID,LC,Date,X,Y\n20616,3,07/03/03 13:52:36,-120.25,34.5\n20617,,,1.0,2.0\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_csv_has_header() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        CsvFeatureWriter::create(temp_file.path())?.finish()?;

        assert_eq!(std::fs::read_to_string(temp_file.path())?, "TagID,LC,Date,X,Y\n");
        Ok(())
    }
}
