use argos_import::config::{AttributeSet, ImportSettings};
use argos_import::models::SpatialReference;
use argos_import::processors::ArgosImporter;
use argos_import::writers::ParquetWriter;
use argos_import::analyzers::TrackAnalyzer;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const HEADER: &str = "20616 Date : 07.03.03 13:52:36 LC : 3 IQ : 66";
const COORDS: &str = "      Lat1 : 34.500N Lon1 : 120.250W Lat2 : 34.512N Lon2 : 120.301W";

#[test]
fn test_two_line_file_yields_one_record() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let input = dir.path().join("argos");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("1997dg.txt"), format!("{}\n{}\n", HEADER, COORDS)).unwrap();

    let output = dir.path().join("scratch").join("ARGOStrack.parquet");
    let report = ArgosImporter::new(ImportSettings::default())
        .import(&input, &output, None)
        .unwrap();

    assert_eq!(report.records_written(), 1);
    assert_eq!(report.records_skipped(), 0);

    let (sr, features) = ParquetWriter::new().read_features(&output).unwrap();
    assert_eq!(sr, Some(SpatialReference::Wgs84));
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].tag_id, 20616);
    assert_eq!(features[0].location_class.as_deref(), Some("3"));
    assert_eq!(features[0].date.as_deref(), Some("07/03/03 13:52:36"));
    assert_eq!(features[0].x, -120.25);
    assert_eq!(features[0].y, 34.5);
}

#[test]
fn test_readme_is_never_parsed() {
    let dir = TempDir::new().unwrap();
    // a README laid out like ARGOS data would produce a record if it were read
    fs::write(dir.path().join("README.txt"), format!("{}\n{}\n", HEADER, COORDS)).unwrap();

    let report = ArgosImporter::new(ImportSettings::default())
        .validate(dir.path(), None)
        .unwrap();

    assert!(report.files.is_empty());
    assert_eq!(report.records_written(), 0);
}

#[test]
fn test_bad_record_does_not_stop_the_file() {
    let dir = TempDir::new().unwrap();
    let data = format!(
        "20616 Date : 07.03.03 10:00:00 LC : B IQ : 00\n      Lat1 : 3x.5N Lon1 : 120.250W\n{}\n{}\n",
        HEADER, COORDS
    );
    fs::write(dir.path().join("2003dg.txt"), data).unwrap();
    let output = dir.path().join("tracks.geojson");

    let report = ArgosImporter::new(ImportSettings::default())
        .import(dir.path(), &output, None)
        .unwrap();

    assert_eq!(report.records_written(), 1);
    assert_eq!(report.records_skipped(), 1);

    let geojson: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(geojson["features"].as_array().unwrap().len(), 1);
    assert_eq!(geojson["features"][0]["properties"]["Date"], "07/03/03 13:52:36");
}

#[test]
fn test_single_file_minimal_attributes_projected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("1997dg.txt");
    fs::write(&input, format!("{}\n{}\n", HEADER, COORDS)).unwrap();
    let output = dir.path().join("tracks.parquet");

    let settings = ImportSettings {
        attributes: AttributeSet::Minimal,
        spatial_reference: SpatialReference::WorldEquidistantCylindrical,
        ..ImportSettings::default()
    };
    ArgosImporter::new(settings).import(&input, &output, None).unwrap();

    let stats = TrackAnalyzer::new().analyze_parquet(&output).unwrap();
    assert_eq!(stats.total_records, 1);
    assert_eq!(stats.spatial_reference, Some(SpatialReference::WorldEquidistantCylindrical));
    assert!(stats.location_classes.is_empty());
    assert!(stats.time_span.is_none());

    let bounds = stats.bounds.unwrap();
    assert!((bounds.min_x - -13_371_189.929).abs() < 0.01);
    assert!((bounds.min_y - 3_836_224.969).abs() < 0.01);
}

#[test]
fn test_existing_output_is_replaced() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("argos");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a.txt"), format!("{}\n{}\n", HEADER, COORDS)).unwrap();
    let output = dir.path().join("tracks.csv");
    fs::write(&output, "stale contents\n").unwrap();

    ArgosImporter::new(ImportSettings::default())
        .import(&input, &output, None)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "TagID,LC,Date,X,Y\n20616,3,07/03/03 13:52:36,-120.25,34.5\n"
    );
}
