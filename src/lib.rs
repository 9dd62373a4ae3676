//! # galvokit
//!
//! Toolpath generation, motion planning and DAC mapping for galvanometer
//! laser scanners.
//!
//! ## Architecture
//!
//! galvokit is organized as a workspace with multiple crates:
//!
//! 1. **galvokit-core** - Waypoints, commands, segments, error taxonomy
//! 2. **galvokit-settings** - Planner/optical/generation configuration and persistence
//! 3. **galvokit-camtools** - Raster and vector waypoint generation
//! 4. **galvokit-toolpath** - Toolpath text codec and lookahead motion planner
//! 5. **galvokit-optics** - Mirror projection, DAC mapping, trajectory resampling
//! 6. **galvokit** - Re-exports, logging setup and the end-to-end [`Pipeline`]

pub use galvokit_core::{
    ActuatorSample, AngleSample, CodecError, Command, Error, MapperError, Opcode, ParamKey,
    PlannerError, RasterDirection, Result, ScaleMode, Segment, SegmentKind, Stage, ToolpathMode,
    Waypoint, WaypointError,
};

pub use galvokit_settings::{
    ArcCenterMode, Config, GenerationSettings, Interpolation, OpticalConfig, PlannerConfig,
    SettingsError,
};

pub use galvokit_camtools::{
    generate_raster, generate_vector, BinaryRaster, RasterEngraver, RasterParameters,
    VectorEngraver, VectorParameters,
};

pub use galvokit_toolpath::{
    decode, encode, read_toolpath, write_toolpath, DecodedToolpath, MotionPlanner,
};

pub use galvokit_optics::{OpticalMapper, Trajectory};

pub mod pipeline;

pub use pipeline::{Pipeline, PipelineOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("galvokit {} (built {})", VERSION, BUILD_DATE);
    Ok(())
}
