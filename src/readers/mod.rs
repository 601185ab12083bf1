pub mod argos_reader;
pub mod input_files;

pub use argos_reader::{ArgosReader, ArgosRecords, HeaderFields, RecordOutcome, SkippedRecord};
pub use input_files::discover_input_files;
