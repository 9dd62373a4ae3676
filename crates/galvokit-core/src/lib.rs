//! # galvokit Core
//!
//! Core types and error taxonomy for galvokit.
//! Provides the data model shared by waypoint generation, the toolpath
//! codec, the motion planner and the optical mapper.

pub mod constants;
pub mod data;
pub mod error;

pub use data::{
    ActuatorSample, AngleSample, Command, Opcode, ParamKey, RasterDirection, ScaleMode, Segment,
    SegmentKind, ToolpathMode, Waypoint,
};

pub use error::{CodecError, Error, MapperError, PlannerError, Result, Stage, WaypointError};
