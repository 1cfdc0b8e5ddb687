pub mod fresnel;
pub mod geometry;
pub mod kernel;
pub mod shading;
