//! Toolpath text codec
//!
//! This module provides:
//! - Encoding waypoints as `raster`/`vector` toolpath text
//! - Line-oriented decoding into motion commands with recoverable diagnostics

pub mod encoder;
pub mod parser;

pub use encoder::encode;
pub use parser::{decode, DecodedToolpath, ToolpathDecoder};
