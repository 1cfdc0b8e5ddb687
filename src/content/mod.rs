pub mod field;
pub mod sampler;
