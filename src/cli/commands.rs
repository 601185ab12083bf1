use crate::analyzers::TrackAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{ImportError, Result};
use crate::processors::ArgosImporter;
use crate::readers::discover_input_files;
use crate::utils::filename::generate_default_output_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{OutputFormat, ParquetWriter};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Import {
            input,
            output,
            spatial_reference,
            settings,
            no_progress,
        } => {
            let settings = settings.resolve(spatial_reference)?;
            let output = output.unwrap_or_else(generate_default_output_filename);

            println!("Importing ARGOS data...");
            println!("Input: {}", input.display());
            println!("Output feature class: {}", output.display());
            println!("Spatial reference: {}", settings.spatial_reference);

            let files = discover_input_files(&input, &settings)?;
            let progress = ProgressReporter::new(files.len() as u64, "Importing ARGOS files...", no_progress);

            let importer = ArgosImporter::new(settings);
            let report = importer.import_files(&files, &output, Some(&progress))?;

            progress.finish_with_message(&format!(
                "Wrote {} records from {} files",
                report.records_written(),
                report.files.len()
            ));

            println!("\n{}", report.summary());

            if OutputFormat::from_path(&output)? == OutputFormat::Parquet {
                let file_info = ParquetWriter::new().get_file_info(&output)?;
                println!("{}", file_info.summary());
            }

            println!("Import complete!");
        }

        Commands::Validate {
            input,
            spatial_reference,
            settings,
        } => {
            let settings = settings.resolve(spatial_reference)?;

            println!("Validating ARGOS data...");
            println!("Input: {}", input.display());

            let importer = ArgosImporter::new(settings);
            let report = importer.validate(&input, None)?;

            println!("\n{}", report.summary());

            if report.records_skipped() == 0 {
                println!("✅ All records converted cleanly");
            } else {
                println!("⚠️  {} records would be skipped", report.records_skipped());
            }
        }

        Commands::Info {
            file,
            sample,
            analysis_limit,
        } => {
            if OutputFormat::from_path(&file)? != OutputFormat::Parquet {
                return Err(ImportError::Config(format!(
                    "Info only reads Parquet feature classes: {}",
                    file.display()
                )));
            }

            println!("Analyzing feature class: {}", file.display());

            let writer = ParquetWriter::new();
            let file_info = writer.get_file_info(&file)?;

            let stats = TrackAnalyzer::new().analyze_parquet_with_limit(&file, analysis_limit)?;
            println!("\n{}", stats.detailed_summary());

            println!("File Details:");
            println!("{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Records (showing up to {} records):", sample);
                match writer.read_features_with_limit(&file, sample) {
                    Ok((_, features)) => {
                        for (i, feature) in features.iter().enumerate() {
                            println!(
                                "{}. Tag {} at ({:.5}, {:.5}) LC={} Date={}",
                                i + 1,
                                feature.tag_id,
                                feature.x,
                                feature.y,
                                feature.location_class.as_deref().unwrap_or("-"),
                                feature.date.as_deref().unwrap_or("-")
                            );
                        }
                    }
                    Err(e) => println!("Error reading sample data: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the level
/// chosen by `--verbose`.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| ImportError::Config(format!("Failed to initialise logging: {}", e)))?;
    debug!("Logging initialised");
    Ok(())
}
