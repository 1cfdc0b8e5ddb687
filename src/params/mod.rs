pub mod descriptors;
pub mod model;
