//! Error handling for galvokit
//!
//! Provides error types for every stage of the pipeline:
//! - Waypoint errors (raster/vector toolpath generation)
//! - Codec errors (toolpath text encoding and decoding)
//! - Planner errors (lookahead motion planning)
//! - Mapper errors (optical projection and DAC mapping)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::fmt;
use thiserror::Error;

/// Pipeline stage that raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Waypoint generation from a raster or polygon loops
    Source,
    /// Toolpath text encoding/decoding
    Codec,
    /// Lookahead motion planning
    Planner,
    /// Optical projection and actuator mapping
    Mapper,
    /// Configuration validation
    Config,
    /// File system access
    Io,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Source => write!(f, "source"),
            Stage::Codec => write!(f, "codec"),
            Stage::Planner => write!(f, "planner"),
            Stage::Mapper => write!(f, "mapper"),
            Stage::Config => write!(f, "config"),
            Stage::Io => write!(f, "io"),
        }
    }
}

/// Waypoint generation error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaypointError {
    /// Scale factor or downsample factor is not usable
    #[error("source: invalid scale for '{name}': {value}")]
    InvalidScale {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Nothing to generate a toolpath from
    #[error("source: empty input: {what}")]
    EmptyInput {
        /// Which input was empty.
        what: String,
    },

    /// Raster pixel buffer does not match its dimensions
    #[error("source: invalid raster at row {row}: {reason}")]
    InvalidRaster {
        /// The offending row index.
        row: usize,
        /// The reason the raster was rejected.
        reason: String,
    },
}

impl WaypointError {
    /// Shorthand for an [`WaypointError::InvalidScale`]
    pub fn invalid_scale(name: impl Into<String>, value: f64) -> Self {
        WaypointError::InvalidScale {
            name: name.into(),
            value,
        }
    }

    /// Shorthand for an [`WaypointError::EmptyInput`]
    pub fn empty(what: impl Into<String>) -> Self {
        WaypointError::EmptyInput { what: what.into() }
    }
}

/// Toolpath codec error type
///
/// `MalformedLine` is recoverable: the decoder skips the line and keeps it as
/// a diagnostic. `UnsupportedMode` aborts decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A coordinate token did not carry a parsable number
    #[error("codec: malformed line {line_number}: cannot parse '{token}'")]
    MalformedLine {
        /// The 1-based line number.
        line_number: usize,
        /// The token that failed to parse.
        token: String,
    },

    /// Header line is neither `raster` nor `vector`
    #[error("codec: unsupported mode '{found}' at line {line_number}")]
    UnsupportedMode {
        /// The 1-based line number of the header (0 for empty input).
        line_number: usize,
        /// What was found instead of a mode header.
        found: String,
    },

    /// Reading or writing a toolpath file failed
    #[error("codec: I/O error on {path}: {reason}")]
    Io {
        /// The file path.
        path: String,
        /// The underlying failure.
        reason: String,
    },
}

impl CodecError {
    /// Check whether decoding may continue past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CodecError::MalformedLine { .. })
    }
}

/// Motion planner error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// Command pair cannot be fused into a segment (strict mode only)
    #[error("planner: unsupported transition {from} -> {to} at line {line_number}")]
    UnsupportedTransition {
        /// The 1-based line number of the second command.
        line_number: usize,
        /// The opcode of the buffered command.
        from: String,
        /// The opcode of the incoming command.
        to: String,
    },

    /// Planner configuration is not usable
    #[error("planner: invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration was rejected.
        reason: String,
    },
}

/// Optical mapper error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    /// Interpolation needs more input samples
    #[error("mapper: insufficient points for {method} interpolation: need {required}, got {found}")]
    InsufficientPoints {
        /// Interpolation method name.
        method: String,
        /// Minimum number of samples.
        required: usize,
        /// Number of samples supplied.
        found: usize,
    },

    /// A coordinate was NaN or infinite
    #[error("mapper: non-finite coordinate at input index {index}")]
    NonFiniteCoordinate {
        /// The index of the offending waypoint.
        index: usize,
    },

    /// The requested trajectory is longer than the configured limit
    #[error("mapper: {requested:.0} output samples requested, limit is {limit}")]
    TooManySamples {
        /// Samples implied by the duration or oversampling factor.
        requested: f64,
        /// The configured maximum.
        limit: usize,
    },

    /// Optical configuration violates its invariants
    #[error("mapper: invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration was rejected.
        reason: String,
    },
}

/// Main error type for galvokit
///
/// A unified error type that can represent any error from all stages.
#[derive(Error, Debug)]
pub enum Error {
    /// Waypoint generation error
    #[error(transparent)]
    Waypoint(#[from] WaypointError),

    /// Codec error
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Planner error
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// Mapper error
    #[error(transparent)]
    Mapper(#[from] MapperError),
}

impl Error {
    /// Pipeline stage that produced this error
    pub fn stage(&self) -> Stage {
        match self {
            Error::Waypoint(_) => Stage::Source,
            Error::Codec(CodecError::Io { .. }) => Stage::Io,
            Error::Codec(_) => Stage::Codec,
            Error::Planner(PlannerError::InvalidConfig { .. })
            | Error::Mapper(MapperError::InvalidConfig { .. }) => Stage::Config,
            Error::Planner(_) => Stage::Planner,
            Error::Mapper(_) => Stage::Mapper,
        }
    }

    /// Check if this is a codec error
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Error::Codec(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
