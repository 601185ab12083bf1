use crate::config::ImportSettings;
use crate::error::Result;
use crate::models::{Feature, SpatialReference};
use crate::readers::{discover_input_files, ArgosReader, RecordOutcome, SkippedRecord};
use crate::utils::progress::ProgressReporter;
use crate::writers::FeatureClassWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub records_written: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl FileReport {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            records_written: 0,
            skipped: Vec::new(),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug)]
pub struct ImportReport {
    pub spatial_reference: SpatialReference,
    pub output: Option<PathBuf>,
    pub files: Vec<FileReport>,
}

impl ImportReport {
    pub fn records_written(&self) -> usize {
        self.files.iter().map(|f| f.records_written).sum()
    }

    pub fn records_skipped(&self) -> usize {
        self.files.iter().map(|f| f.skipped.len()).sum()
    }

    pub fn skipped_records(&self) -> impl Iterator<Item = (&FileReport, &SkippedRecord)> {
        self.files
            .iter()
            .flat_map(|file| file.skipped.iter().map(move |skipped| (file, skipped)))
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== ARGOS Import Report ===\n");
        if let Some(output) = &self.output {
            summary.push_str(&format!("Output: {}\n", output.display()));
        }
        summary.push_str(&format!("Spatial reference: {}\n", self.spatial_reference));
        summary.push_str(&format!("Files processed: {}\n", self.files.len()));
        summary.push_str(&format!("Records written: {}\n", self.records_written()));
        summary.push_str(&format!("Records skipped: {}\n", self.records_skipped()));

        for file in &self.files {
            summary.push_str(&format!(
                "  {}: {} written, {} skipped\n",
                file.file_name(),
                file.records_written,
                file.skipped.len()
            ));
        }

        if self.records_skipped() > 0 {
            summary.push_str("\nFirst 10 skipped records:\n");
            for (i, (file, skipped)) in self.skipped_records().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. {} line {} (tag {}): {}\n",
                    i + 1,
                    file.file_name(),
                    skipped.line_number,
                    skipped.tag_id.as_deref().unwrap_or("?"),
                    skipped.reason
                ));
            }
        }

        summary
    }
}

/// Drives the scan-convert-append loop over every input file
pub struct ArgosImporter {
    settings: ImportSettings,
}

impl ArgosImporter {
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    fn reader(&self) -> ArgosReader {
        ArgosReader::new()
            .with_attributes(self.settings.attributes)
            .with_header_token(&self.settings.header_token)
    }

    /// Import every ARGOS file under `input` into a new feature class at `output`
    pub fn import(
        &self,
        input: &Path,
        output: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<ImportReport> {
        let files = discover_input_files(input, &self.settings)?;
        self.import_files(&files, output, progress)
    }

    /// Import an already discovered list of files, in order.
    ///
    /// A fatal error ends the run but still releases the write handle, so
    /// every fix appended before the failure stays readable in `output`.
    pub fn import_files(
        &self,
        files: &[PathBuf],
        output: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<ImportReport> {
        let mut writer = FeatureClassWriter::create(output, &self.settings)?;

        let mut report = match self.process_files(files, Some(&mut writer), progress) {
            Ok(report) => report,
            Err(e) => {
                match writer.finish() {
                    Ok(rows) => warn!(
                        "Import stopped early; kept {} rows in {}",
                        rows,
                        output.display()
                    ),
                    Err(close_err) => warn!("Failed to close {}: {}", output.display(), close_err),
                }
                return Err(e);
            }
        };

        let rows = writer.finish()?;
        debug!("Released write handle on {} after {} rows", output.display(), rows);

        report.output = Some(output.to_path_buf());
        info!("All Done!");
        Ok(report)
    }

    /// Scan and convert without writing anything
    pub fn validate(&self, input: &Path, progress: Option<&ProgressReporter>) -> Result<ImportReport> {
        let files = discover_input_files(input, &self.settings)?;
        self.process_files(&files, None, progress)
    }

    /// Process `files` in order, appending each converted fix to `writer`
    pub fn process_files(
        &self,
        files: &[PathBuf],
        mut writer: Option<&mut FeatureClassWriter>,
        progress: Option<&ProgressReporter>,
    ) -> Result<ImportReport> {
        let reader = self.reader();
        let mut reports = Vec::with_capacity(files.len());

        for path in files {
            let file_report = self.process_file(&reader, path, writer.as_deref_mut())?;

            if let Some(progress) = progress {
                progress.increment(1);
            }
            reports.push(file_report);
        }

        Ok(ImportReport {
            spatial_reference: self.settings.spatial_reference,
            output: None,
            files: reports,
        })
    }

    fn process_file(
        &self,
        reader: &ArgosReader,
        path: &Path,
        mut writer: Option<&mut FeatureClassWriter>,
    ) -> Result<FileReport> {
        let mut report = FileReport::new(path);
        info!("Working on file {}", report.file_name());

        for outcome in reader.open(path)? {
            let (line_number, observation) = match outcome? {
                RecordOutcome::Parsed {
                    line_number,
                    observation,
                } => (line_number, observation),
                RecordOutcome::Skipped(skipped) => {
                    warn!(
                        "Error adding record {} to the output: {}",
                        skipped.tag_id.as_deref().unwrap_or("?"),
                        skipped.reason
                    );
                    report.skipped.push(skipped);
                    continue;
                }
            };

            match Feature::from_observation(&observation, self.settings.spatial_reference) {
                Ok(feature) => {
                    debug!(
                        "{} Lat:{} Long:{}",
                        observation.tag_id, observation.latitude, observation.longitude
                    );
                    if let Some(writer) = writer.as_deref_mut() {
                        writer.append(&feature)?;
                    }
                    report.records_written += 1;
                }
                Err(reason) => {
                    warn!(
                        "Error adding record {} to the output: {}",
                        observation.tag_id, reason
                    );
                    report.skipped.push(SkippedRecord {
                        line_number,
                        tag_id: Some(observation.tag_id.to_string()),
                        reason,
                    });
                }
            }
        }

        Ok(report)
    }
}
