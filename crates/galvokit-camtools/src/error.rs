//! Error types for the CAM tools crate.
//!
//! Waypoint generation failures are `WaypointError`s from the core crate;
//! this module covers loading a raster from disk.

use thiserror::Error;

/// Errors that can occur while preparing waypoint sources.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The image file could not be decoded.
    #[error("Failed to load image {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
