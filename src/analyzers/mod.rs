pub mod track_analyzer;

pub use track_analyzer::{GeographicBounds, TrackAnalyzer, TrackStatistics};
