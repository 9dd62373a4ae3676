//! # galvokit Toolpath
//!
//! Textual toolpath encoding/decoding and the lookahead motion planner that
//! turns decoded commands into timed segments.

pub mod file_io;
pub mod gcode;
pub mod planner;

pub use file_io::{read_toolpath, write_toolpath};
pub use gcode::{decode, encode, DecodedToolpath, ToolpathDecoder};
pub use planner::MotionPlanner;
