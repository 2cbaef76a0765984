pub mod light;
pub mod normals;
pub mod parameters;
pub mod shading;
