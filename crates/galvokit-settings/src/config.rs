//! Configuration and settings management for galvokit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Planner settings (default feed, arc centre convention)
//! - Optical settings (galvo geometry, DAC resolution, output rate)
//! - Generation settings (raster direction, downsampling, scaling)
//!
//! Every section is an immutable value handed to its stage at construction;
//! nothing here is process-wide state.

use crate::error::{SettingsError, SettingsResult};
use galvokit_core::constants;
use galvokit_core::{MapperError, PlannerError, RasterDirection, ScaleMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// How the I/J words of an arc are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcCenterMode {
    /// I/J is the absolute arc centre
    #[default]
    Absolute,
    /// I/J is an offset from the arc start point (conventional G-code)
    Relative,
}

/// Motion planner settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Feed used when a move has no F word (mm/s)
    pub default_feed_mm_s: f64,
    /// Arc centre convention
    #[serde(default)]
    pub arc_center: ArcCenterMode,
    /// Fail on command pairs that cannot be planned instead of dropping them
    #[serde(default)]
    pub strict_transitions: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_feed_mm_s: constants::DEFAULT_FEED_MM_S,
            arc_center: ArcCenterMode::default(),
            strict_transitions: false,
        }
    }
}

impl PlannerConfig {
    /// Planner config with a given default feed and default everything else
    pub fn with_feed(default_feed_mm_s: f64) -> Self {
        Self {
            default_feed_mm_s,
            ..Self::default()
        }
    }

    /// Validate planner settings
    pub fn validate(&self) -> Result<(), PlannerError> {
        if !(self.default_feed_mm_s.is_finite() && self.default_feed_mm_s > 0.0) {
            return Err(PlannerError::InvalidConfig {
                reason: format!(
                    "default feed must be > 0, got {}",
                    self.default_feed_mm_s
                ),
            });
        }
        Ok(())
    }
}

/// Trajectory interpolation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Linear,
    /// Natural cubic spline, needs at least four samples
    Cubic,
    /// Sample-and-hold; required for discrete signals such as laser state
    Nearest,
}

impl Interpolation {
    /// Minimum number of input samples the method needs
    pub fn min_points(&self) -> usize {
        match self {
            Interpolation::Cubic => 4,
            Interpolation::Linear | Interpolation::Nearest => 2,
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Cubic => write!(f, "cubic"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}

/// Galvo head geometry and output stage settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalConfig {
    /// Mirror pivot to work plane distance (mm)
    pub laser_distance_mm: f64,
    /// Lower mechanical mirror limit (degrees)
    pub angle_min_deg: f64,
    /// Upper mechanical mirror limit (degrees)
    pub angle_max_deg: f64,
    /// Number of DAC codes
    pub dac_resolution: u32,
    /// Output samples per second
    pub output_rate_sps: f64,
    /// Position interpolation method
    pub interpolation: Interpolation,
    /// Samples per input point when no duration is known
    #[serde(default = "default_oversample")]
    pub oversample: u32,
    /// Longest trajectory the mapper will produce
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

fn default_oversample() -> u32 {
    1
}

fn default_max_samples() -> usize {
    constants::DEFAULT_MAX_OUTPUT_SAMPLES
}

impl Default for OpticalConfig {
    fn default() -> Self {
        Self {
            laser_distance_mm: constants::DEFAULT_LASER_DISTANCE_MM,
            angle_min_deg: constants::DEFAULT_ANGLE_MIN_DEG,
            angle_max_deg: constants::DEFAULT_ANGLE_MAX_DEG,
            dac_resolution: constants::DEFAULT_DAC_RESOLUTION,
            output_rate_sps: constants::DEFAULT_OUTPUT_RATE_SPS,
            interpolation: Interpolation::default(),
            oversample: default_oversample(),
            max_samples: default_max_samples(),
        }
    }
}

impl OpticalConfig {
    /// Validate optical settings
    pub fn validate(&self) -> Result<(), MapperError> {
        let invalid = |reason: String| Err(MapperError::InvalidConfig { reason });

        if !(self.laser_distance_mm.is_finite() && self.laser_distance_mm > 0.0) {
            return invalid(format!(
                "laser distance must be > 0, got {}",
                self.laser_distance_mm
            ));
        }
        if !(self.angle_min_deg.is_finite() && self.angle_max_deg.is_finite())
            || self.angle_min_deg >= self.angle_max_deg
        {
            return invalid(format!(
                "angle range must satisfy min < max, got [{}, {}]",
                self.angle_min_deg, self.angle_max_deg
            ));
        }
        if self.dac_resolution < 2 {
            return invalid(format!(
                "dac resolution must be >= 2, got {}",
                self.dac_resolution
            ));
        }
        if self.dac_resolution > i32::MAX as u32 {
            return invalid(format!(
                "dac resolution {} does not fit an i32 code",
                self.dac_resolution
            ));
        }
        if !(self.output_rate_sps.is_finite() && self.output_rate_sps > 0.0) {
            return invalid(format!(
                "output rate must be > 0, got {}",
                self.output_rate_sps
            ));
        }
        if self.oversample == 0 {
            return invalid("oversample must be >= 1".to_string());
        }
        if self.max_samples < 2 {
            return invalid(format!("max samples must be >= 2, got {}", self.max_samples));
        }
        Ok(())
    }
}

/// Raster/vector waypoint generation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Integer downsample factor applied before scanning
    pub downsample_factor: u32,
    /// Raster scan ordering
    pub direction: RasterDirection,
    /// Multiplier applied to source coordinates
    pub scale_factor: f64,
    /// Normalise coordinates against the source image size before scaling
    pub normalize: bool,
    /// Binarisation threshold (0-255)
    pub threshold: u8,
    /// Swap foreground and background after thresholding
    pub invert: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            downsample_factor: 1,
            direction: RasterDirection::Uni,
            scale_factor: 1.0,
            normalize: false,
            threshold: 128,
            invert: false,
        }
    }
}

impl GenerationSettings {
    /// Scale mode for a source image of the given size
    pub fn scale_mode(&self, source_width: f64, source_height: f64) -> ScaleMode {
        if self.normalize {
            ScaleMode::Normalized {
                width: source_width,
                height: source_height,
            }
        } else {
            ScaleMode::Absolute
        }
    }

    /// Validate generation settings
    pub fn validate(&self) -> SettingsResult<()> {
        if self.downsample_factor == 0 {
            return Err(SettingsError::invalid(
                "generation.downsample_factor",
                "must be >= 1",
            ));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(SettingsError::invalid(
                "generation.scale_factor",
                format!("must be > 0, got {}", self.scale_factor),
            ));
        }
        Ok(())
    }
}

/// Complete galvokit configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Motion planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Galvo head settings
    #[serde(default)]
    pub optics: OpticalConfig,
    /// Waypoint generation settings
    #[serde(default)]
    pub generation: GenerationSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/galvokit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("galvokit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.planner
            .validate()
            .map_err(|e| SettingsError::invalid("planner", e.to_string()))?;
        self.optics
            .validate()
            .map_err(|e| SettingsError::invalid("optics", e.to_string()))?;
        self.generation.validate()
    }
}

#[derive(Debug, Clone, Copy)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.optics.dac_resolution, 4096);
        assert_eq!(config.optics.laser_distance_mm, 225.64);
        assert_eq!(config.planner.default_feed_mm_s, 1500.0);
    }

    #[test]
    fn test_optical_invariants() {
        let mut optics = OpticalConfig::default();
        optics.angle_min_deg = 10.0;
        optics.angle_max_deg = 10.0;
        assert!(optics.validate().is_err());

        let mut optics = OpticalConfig::default();
        optics.dac_resolution = 1;
        assert!(optics.validate().is_err());

        let mut optics = OpticalConfig::default();
        optics.laser_distance_mm = 0.0;
        assert!(optics.validate().is_err());

        let mut optics = OpticalConfig::default();
        optics.oversample = 0;
        assert!(optics.validate().is_err());

        let mut optics = OpticalConfig::default();
        optics.max_samples = 1;
        assert!(optics.validate().is_err());
    }

    #[test]
    fn test_planner_invariants() {
        assert!(PlannerConfig::with_feed(0.0).validate().is_err());
        assert!(PlannerConfig::with_feed(f64::NAN).validate().is_err());
        assert!(PlannerConfig::with_feed(1000.0).validate().is_ok());
    }

    #[test]
    fn test_interpolation_min_points() {
        assert_eq!(Interpolation::Linear.min_points(), 2);
        assert_eq!(Interpolation::Nearest.min_points(), 2);
        assert_eq!(Interpolation::Cubic.min_points(), 4);
    }

    #[test]
    fn test_generation_scale_mode() {
        let mut generation = GenerationSettings::default();
        assert_eq!(generation.scale_mode(10.0, 20.0), ScaleMode::Absolute);
        generation.normalize = true;
        assert_eq!(
            generation.scale_mode(10.0, 20.0),
            ScaleMode::Normalized {
                width: 10.0,
                height: 20.0
            }
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::default()
            .save_to_file(Path::new("config.yaml"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
    }
}
