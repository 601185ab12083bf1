pub mod feature;
pub mod observation;
pub mod spatial_reference;

pub use feature::Feature;
pub use observation::Observation;
pub use spatial_reference::SpatialReference;
