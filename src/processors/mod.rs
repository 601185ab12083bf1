pub mod importer;

pub use importer::{ArgosImporter, FileReport, ImportReport};
