use crate::error::{ImportError, Result};
use crate::models::{Feature, SpatialReference};
use crate::utils::constants::{
    DEFAULT_ROW_GROUP_SIZE, FIELD_DATE, FIELD_LOCATION_CLASS, FIELD_TAG_ID, FIELD_X, FIELD_Y,
    GEOMETRY_POINT, META_GEOMETRY_TYPE, META_SPATIAL_REFERENCE,
};
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(ImportError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size.max(1);
        self
    }

    /// Create an empty point feature class and return its open write handle
    pub fn create(&self, path: &Path, sr: SpatialReference) -> Result<ParquetFeatureWriter> {
        let schema = create_schema(sr);
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        Ok(ParquetFeatureWriter {
            writer,
            schema,
            buffer: Vec::with_capacity(self.row_group_size.min(DEFAULT_ROW_GROUP_SIZE)),
            row_group_size: self.row_group_size,
            rows_written: 0,
        })
    }

    /// Write a complete feature class in one go
    pub fn write_features(&self, features: &[Feature], path: &Path, sr: SpatialReference) -> Result<()> {
        let mut writer = self.create(path, sr)?;
        for feature in features {
            writer.append(feature)?;
        }
        writer.finish()?;
        Ok(())
    }

    /// Read all features and the spatial reference recorded in the schema
    pub fn read_features(&self, path: &Path) -> Result<(Option<SpatialReference>, Vec<Feature>)> {
        self.read_features_with_limit(path, 0)
    }

    /// Read up to `limit` features (0 = all)
    pub fn read_features_with_limit(
        &self,
        path: &Path,
        limit: usize,
    ) -> Result<(Option<SpatialReference>, Vec<Feature>)> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

        let spatial_reference = builder
            .schema()
            .metadata()
            .get(META_SPATIAL_REFERENCE)
            .and_then(|sr| sr.parse::<SpatialReference>().ok());

        let batch_size = if limit == 0 { 8192 } else { limit.min(8192) };
        let reader = builder.with_batch_size(batch_size).build()?;

        let mut features = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;
            batch_to_features(&batch, &mut features)?;

            if limit > 0 && features.len() >= limit {
                features.truncate(limit);
                break;
            }
        }

        Ok((spatial_reference, features))
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let row_groups = metadata.num_row_groups();
        let total_rows = file_metadata.num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let mut row_group_sizes = Vec::new();
        let mut compression = None;
        for i in 0..row_groups {
            let rg_metadata = metadata.row_group(i);
            row_group_sizes.push(rg_metadata.num_rows());
            if compression.is_none() && rg_metadata.num_columns() > 0 {
                compression = Some(rg_metadata.column(0).compression());
            }
        }

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression: compression.unwrap_or(self.compression),
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Open Parquet write handle; rows are buffered and flushed one row group at
/// a time
pub struct ParquetFeatureWriter {
    writer: ArrowWriter<File>,
    schema: Arc<Schema>,
    buffer: Vec<Feature>,
    row_group_size: usize,
    rows_written: u64,
}

impl ParquetFeatureWriter {
    pub fn append(&mut self, feature: &Feature) -> Result<()> {
        self.buffer.push(feature.clone());
        if self.buffer.len() >= self.row_group_size {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let batch = features_to_batch(&self.buffer, self.schema.clone())?;
        self.writer.write(&batch)?;
        self.rows_written += self.buffer.len() as u64;
        self.buffer.clear();
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written + self.buffer.len() as u64
    }

    /// Flush pending rows and close the file
    pub fn finish(mut self) -> Result<u64> {
        self.flush()?;
        self.writer.close()?;
        Ok(self.rows_written)
    }
}

/// Arrow schema for the ARGOS point feature class
fn create_schema(sr: SpatialReference) -> Arc<Schema> {
    let fields = vec![
        Field::new(FIELD_TAG_ID, DataType::Int64, false),
        Field::new(FIELD_LOCATION_CLASS, DataType::Utf8, true),
        Field::new(FIELD_DATE, DataType::Utf8, true),
        Field::new(FIELD_X, DataType::Float64, false),
        Field::new(FIELD_Y, DataType::Float64, false),
    ];

    let metadata = HashMap::from([
        (META_SPATIAL_REFERENCE.to_string(), sr.to_string()),
        (META_GEOMETRY_TYPE.to_string(), GEOMETRY_POINT.to_string()),
    ]);

    Arc::new(Schema::new_with_metadata(fields, metadata))
}

fn features_to_batch(features: &[Feature], schema: Arc<Schema>) -> Result<RecordBatch> {
    let tag_ids: Vec<i64> = features.iter().map(|f| f.tag_id).collect();
    let location_classes: Vec<Option<String>> =
        features.iter().map(|f| f.location_class.clone()).collect();
    let dates: Vec<Option<String>> = features.iter().map(|f| f.date.clone()).collect();
    let xs: Vec<f64> = features.iter().map(|f| f.x).collect();
    let ys: Vec<f64> = features.iter().map(|f| f.y).collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(tag_ids)),
            Arc::new(StringArray::from(location_classes)),
            Arc::new(StringArray::from(dates)),
            Arc::new(Float64Array::from(xs)),
            Arc::new(Float64Array::from(ys)),
        ],
    )?;

    Ok(batch)
}

fn column<'a, T: 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| ImportError::InvalidFormat(format!("Missing or mistyped column '{}'", name)))
}

fn optional_string(array: &StringArray, row: usize) -> Option<String> {
    if array.is_null(row) {
        None
    } else {
        Some(array.value(row).to_string())
    }
}

fn batch_to_features(batch: &RecordBatch, features: &mut Vec<Feature>) -> Result<()> {
    let tag_ids = column::<Int64Array>(batch, FIELD_TAG_ID)?;
    let location_classes = column::<StringArray>(batch, FIELD_LOCATION_CLASS)?;
    let dates = column::<StringArray>(batch, FIELD_DATE)?;
    let xs = column::<Float64Array>(batch, FIELD_X)?;
    let ys = column::<Float64Array>(batch, FIELD_Y)?;

    for row in 0..batch.num_rows() {
        features.push(Feature {
            tag_id: tag_ids.value(row),
            location_class: optional_string(location_classes, row),
            date: optional_string(dates, row),
            x: xs.value(row),
            y: ys.value(row),
        });
    }

    Ok(())
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        let avg_rows = if self.row_groups > 0 {
            self.total_rows as f64 / self.row_groups as f64
        } else {
            0.0
        };

        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} KB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1024.0,
            self.compression,
            avg_rows
        )
    }
}
