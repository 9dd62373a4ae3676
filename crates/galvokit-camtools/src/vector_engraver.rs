//! Vector Waypoint Engraving
//!
//! Traces ordered polygon loops (contours extracted by an external
//! collaborator) point by point with the laser on throughout.

use galvokit_core::{ScaleMode, Waypoint, WaypointError};

/// Vector engraving parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorParameters {
    /// Factor the contour source was downsampled by
    pub downsample_factor: u32,
    /// Absolute or normalised to the source image size
    pub scale_mode: ScaleMode,
    /// Output multiplier
    pub scale_factor: f64,
}

impl Default for VectorParameters {
    fn default() -> Self {
        Self {
            downsample_factor: 1,
            scale_mode: ScaleMode::Absolute,
            scale_factor: 1.0,
        }
    }
}

/// Contour tracing tool
#[derive(Debug, Clone, Default)]
pub struct VectorEngraver {
    params: VectorParameters,
}

impl VectorEngraver {
    pub fn new(params: VectorParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &VectorParameters {
        &self.params
    }

    /// Generate one laser-on waypoint per contour point, loops in order
    pub fn generate(&self, loops: &[Vec<(f64, f64)>]) -> Result<Vec<Waypoint>, WaypointError> {
        let params = &self.params;
        if params.downsample_factor == 0 {
            return Err(WaypointError::invalid_scale("downsample_factor", 0.0));
        }
        if !(params.scale_factor.is_finite() && params.scale_factor > 0.0) {
            return Err(WaypointError::invalid_scale(
                "scale_factor",
                params.scale_factor,
            ));
        }

        let factor = params.downsample_factor as f64;
        let (sx, sy) = match params.scale_mode {
            ScaleMode::Absolute => (factor * params.scale_factor, factor * params.scale_factor),
            ScaleMode::Normalized { width, height } => {
                if !(width.is_finite() && width > 0.0) {
                    return Err(WaypointError::invalid_scale("width", width));
                }
                if !(height.is_finite() && height > 0.0) {
                    return Err(WaypointError::invalid_scale("height", height));
                }
                (
                    factor / width * params.scale_factor,
                    factor / height * params.scale_factor,
                )
            }
        };

        let waypoints: Vec<Waypoint> = loops
            .iter()
            .flatten()
            .map(|&(x, y)| Waypoint::on(x * sx, y * sy))
            .collect();

        if waypoints.is_empty() {
            return Err(WaypointError::empty(format!(
                "{} polygon loop(s) without points",
                loops.len()
            )));
        }

        tracing::debug!(
            "Generated {} vector waypoints from {} loop(s)",
            waypoints.len(),
            loops.len()
        );

        Ok(waypoints)
    }
}

/// Generate vector waypoints from contours at full source resolution
pub fn generate_vector(
    loops: &[Vec<(f64, f64)>],
    scale_mode: ScaleMode,
    scale_factor: f64,
) -> Result<Vec<Waypoint>, WaypointError> {
    VectorEngraver::new(VectorParameters {
        scale_mode,
        scale_factor,
        ..VectorParameters::default()
    })
    .generate(loops)
}
