//! Shared defaults for the galvo head and toolpath generation

/// Mirror pivot to work plane distance (mm)
pub const DEFAULT_LASER_DISTANCE_MM: f64 = 225.64;

/// Mechanical mirror range (degrees)
pub const DEFAULT_ANGLE_MIN_DEG: f64 = -12.5;
pub const DEFAULT_ANGLE_MAX_DEG: f64 = 12.5;

/// 12-bit DAC
pub const DEFAULT_DAC_RESOLUTION: u32 = 4096;

/// Galvo output rate (points per second)
pub const DEFAULT_OUTPUT_RATE_SPS: f64 = 20_000.0;

/// Upper bound on one resampled trajectory (500 s at the default rate)
pub const DEFAULT_MAX_OUTPUT_SAMPLES: usize = 10_000_000;

/// Feed used when a move carries no F word (mm/s)
pub const DEFAULT_FEED_MM_S: f64 = 1500.0;

/// Power word written on raster lines with the laser on
pub const LASER_POWER_ON: u32 = 255;

/// Decimal places for coordinates in toolpath text
pub const COORDINATE_PRECISION: usize = 6;

/// Angle domain remapped onto the mechanical range (degrees)
pub const FULL_ANGLE_DOMAIN_DEG: (f64, f64) = (-180.0, 180.0);
