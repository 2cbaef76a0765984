#![deny(warnings)]

pub mod errors;
pub mod hillshading;
pub mod raster;
pub mod testing;
pub mod trig;
pub mod vector;

pub use errors::ReliefError;
pub use hillshading::light::{resolve_light_direction, ResolvedLight};
pub use hillshading::parameters::{HillshadingParameters, LightNormalization};
pub use hillshading::shading::{hillshade, Hillshade};
pub use raster::Raster;
pub use vector::Vec3;
