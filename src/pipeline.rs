//! End-to-end pipeline
//!
//! Wires the stages together: waypoint generation and toolpath encoding on
//! one side, toolpath decoding, planning and optical mapping on the other.
//! Each stage is built once from a validated [`Config`] and reused.

use galvokit_camtools::{
    BinaryRaster, RasterEngraver, RasterParameters, VectorEngraver, VectorParameters,
};
use galvokit_core::{Result, Segment, ToolpathMode, Waypoint};
use galvokit_optics::{OpticalMapper, Trajectory};
use galvokit_settings::{Config, GenerationSettings};
use galvokit_toolpath::{decode, encode, read_toolpath, DecodedToolpath, MotionPlanner};
use std::path::Path;

/// Everything produced while running a toolpath through the back half
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub toolpath: DecodedToolpath,
    pub segments: Vec<Segment>,
    /// Planned move time in seconds
    pub duration_s: f64,
    pub trajectory: Trajectory,
}

/// Configured pipeline stages
#[derive(Debug, Clone)]
pub struct Pipeline {
    generation: GenerationSettings,
    planner: MotionPlanner,
    mapper: OpticalMapper,
}

impl Pipeline {
    /// Build the stages, validating their configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            generation: config.generation,
            planner: MotionPlanner::new(config.planner)?,
            mapper: OpticalMapper::new(config.optics)?,
        })
    }

    pub fn planner(&self) -> &MotionPlanner {
        &self.planner
    }

    pub fn mapper(&self) -> &OpticalMapper {
        &self.mapper
    }

    /// Downsample a full-resolution raster and scan it into waypoints
    pub fn raster_waypoints(&self, raster: &BinaryRaster) -> Result<Vec<Waypoint>> {
        let factor = self.generation.downsample_factor;
        let reduced = raster.downsample(factor)?;
        let engraver = RasterEngraver::new(RasterParameters {
            downsample_factor: factor,
            direction: self.generation.direction,
            scale_mode: self
                .generation
                .scale_mode(raster.width() as f64, raster.height() as f64),
            scale_factor: self.generation.scale_factor,
        });
        Ok(engraver.generate(&reduced)?)
    }

    /// Trace contours given in source pixel coordinates
    pub fn vector_waypoints(
        &self,
        loops: &[Vec<(f64, f64)>],
        source_size: (f64, f64),
    ) -> Result<Vec<Waypoint>> {
        let engraver = VectorEngraver::new(VectorParameters {
            downsample_factor: 1,
            scale_mode: self.generation.scale_mode(source_size.0, source_size.1),
            scale_factor: self.generation.scale_factor,
        });
        Ok(engraver.generate(loops)?)
    }

    /// Raster toolpath text for a full-resolution raster
    pub fn raster_toolpath(&self, raster: &BinaryRaster) -> Result<String> {
        Ok(encode(&self.raster_waypoints(raster)?, ToolpathMode::Raster))
    }

    /// Decode, plan and map toolpath text
    pub fn run(&self, text: &str) -> Result<PipelineOutput> {
        self.process(decode(text)?)
    }

    /// Decode, plan and map a toolpath file
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<PipelineOutput> {
        self.process(read_toolpath(path)?)
    }

    fn process(&self, toolpath: DecodedToolpath) -> Result<PipelineOutput> {
        let segments = self.planner.plan(&toolpath.commands)?;
        let duration_s = MotionPlanner::total_duration(&segments);
        let trajectory = self.mapper.trajectory_from_segments(&segments)?;

        tracing::debug!(
            "Pipeline: {} commands, {} segments, {} samples over {:.4}s ({} diagnostics)",
            toolpath.commands.len(),
            segments.len(),
            trajectory.len(),
            duration_s,
            toolpath.diagnostics.len()
        );

        Ok(PipelineOutput {
            toolpath,
            segments,
            duration_s,
            trajectory,
        })
    }
}
