//! # galvokit CAM Tools
//!
//! Waypoint sources for the galvo pipeline: a binary raster adapter over the
//! `image` crate, a scanline raster engraver and a contour vector engraver.

pub mod error;
pub mod raster;
pub mod raster_engraver;
pub mod vector_engraver;

pub use error::{CamToolError, CamToolResult};
pub use raster::BinaryRaster;
pub use raster_engraver::{generate_raster, RasterEngraver, RasterParameters};
pub use vector_engraver::{generate_vector, VectorEngraver, VectorParameters};
