pub mod color;
pub mod decode;
pub mod svg_raster;
