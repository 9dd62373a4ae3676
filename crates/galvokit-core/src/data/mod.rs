//! Data models flowing between pipeline stages
//!
//! This module provides:
//! - Waypoints produced by raster/vector generation
//! - Motion commands decoded from toolpath text
//! - Planned segments with duration and laser state
//! - Mirror angle and DAC actuator samples

pub mod command;

pub use command::{Command, Opcode, ParamKey};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single planned point along a toolpath, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub laser_on: bool,
}

impl Waypoint {
    /// Create a new waypoint
    pub fn new(x: f64, y: f64, laser_on: bool) -> Self {
        Self { x, y, laser_on }
    }

    /// Waypoint with the laser firing
    pub fn on(x: f64, y: f64) -> Self {
        Self::new(x, y, true)
    }

    /// Waypoint with the laser de-energised
    pub fn off(x: f64, y: f64) -> Self {
        Self::new(x, y, false)
    }

    /// Position as a tuple
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}) laser {}",
            self.x,
            self.y,
            if self.laser_on { "ON" } else { "OFF" }
        )
    }
}

/// Toolpath flavour, written as the header line of the toolpath text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolpathMode {
    /// Scanline traversal with explicit laser markers per line
    Raster,
    /// Contour traversal with the laser on throughout
    Vector,
}

impl ToolpathMode {
    /// Parse a header line (case-insensitive, surrounding whitespace ignored)
    pub fn from_header(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "raster" => Some(ToolpathMode::Raster),
            "vector" => Some(ToolpathMode::Vector),
            _ => None,
        }
    }

    /// Header keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolpathMode::Raster => "raster",
            ToolpathMode::Vector => "vector",
        }
    }
}

impl fmt::Display for ToolpathMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scanline ordering for raster toolpaths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterDirection {
    /// Every row left to right, with a laser-off return between rows
    #[default]
    Uni,
    /// Serpentine: even rows left to right, odd rows right to left
    Bi,
}

/// How source pixel coordinates become millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// `coord * scale_factor`
    #[default]
    Absolute,
    /// `coord / source_dimension * scale_factor`, per axis
    Normalized { width: f64, height: f64 },
}

/// Planned segment geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Linear,
    Arc,
}

/// Time-parameterised motion between two positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub kind: SegmentKind,
    /// Always >= 0; zero for zero-length segments
    pub duration_s: f64,
    pub laser_on: bool,
}

impl Segment {
    /// Planar length of the chord between start and end
    pub fn chord_length(&self) -> f64 {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when start and end coincide
    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} ({:.3}, {:.3}) -> ({:.3}, {:.3}) in {:.4}s with laser {}",
            self.kind,
            self.start.0,
            self.start.1,
            self.end.0,
            self.end.1,
            self.duration_s,
            if self.laser_on { "ON" } else { "OFF" }
        )
    }
}

/// Mirror angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngleSample {
    pub theta_x: f64,
    pub theta_y: f64,
}

/// Fixed-point actuator codes, each within `[0, dac_resolution - 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActuatorSample {
    pub dac_x: i32,
    pub dac_y: i32,
}

impl ActuatorSample {
    pub fn new(dac_x: i32, dac_y: i32) -> Self {
        Self { dac_x, dac_y }
    }
}
