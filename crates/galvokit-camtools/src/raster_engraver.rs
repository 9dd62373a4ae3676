//! Raster Waypoint Engraving
//!
//! Scans a binary raster row by row and emits one waypoint per pixel, with
//! the laser state taken from the pixel. Unidirectional scans return to the
//! left edge between rows; bidirectional scans run serpentine.
//!
//! A scan always ends with a laser-off waypoint so the head never rests on
//! an energised beam.

use crate::raster::BinaryRaster;
use galvokit_core::{RasterDirection, ScaleMode, Waypoint, WaypointError};

/// Raster engraving parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterParameters {
    /// Factor the raster was downsampled by; pixel coordinates are scaled
    /// back up by it
    pub downsample_factor: u32,
    /// Scanline ordering
    pub direction: RasterDirection,
    /// Absolute or normalised to the source image size
    pub scale_mode: ScaleMode,
    /// Output multiplier
    pub scale_factor: f64,
}

impl Default for RasterParameters {
    fn default() -> Self {
        Self {
            downsample_factor: 1,
            direction: RasterDirection::Uni,
            scale_mode: ScaleMode::Absolute,
            scale_factor: 1.0,
        }
    }
}

impl RasterParameters {
    fn validate(&self) -> Result<(), WaypointError> {
        if self.downsample_factor == 0 {
            return Err(WaypointError::invalid_scale("downsample_factor", 0.0));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(WaypointError::invalid_scale(
                "scale_factor",
                self.scale_factor,
            ));
        }
        if let ScaleMode::Normalized { width, height } = self.scale_mode {
            for (name, value) in [("width", width), ("height", height)] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(WaypointError::invalid_scale(name, value));
                }
            }
        }
        Ok(())
    }

    /// Millimetre position of a pixel
    fn position(&self, col: usize, row: usize) -> (f64, f64) {
        let factor = self.downsample_factor as f64;
        let (sx, sy) = match self.scale_mode {
            ScaleMode::Absolute => (self.scale_factor, self.scale_factor),
            ScaleMode::Normalized { width, height } => {
                (self.scale_factor / width, self.scale_factor / height)
            }
        };
        (col as f64 * factor * sx, row as f64 * factor * sy)
    }
}

/// Raster engraving tool for binary images
#[derive(Debug, Clone, Default)]
pub struct RasterEngraver {
    params: RasterParameters,
}

impl RasterEngraver {
    pub fn new(params: RasterParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RasterParameters {
        &self.params
    }

    /// Generate waypoints for a raster that is already downsampled
    pub fn generate(&self, raster: &BinaryRaster) -> Result<Vec<Waypoint>, WaypointError> {
        self.generate_with_progress(raster, |_| {})
    }

    /// Generate waypoints with a progress callback receiving 0.0 to 1.0
    pub fn generate_with_progress<F>(
        &self,
        raster: &BinaryRaster,
        mut progress_callback: F,
    ) -> Result<Vec<Waypoint>, WaypointError>
    where
        F: FnMut(f32),
    {
        self.params.validate()?;
        if raster.is_empty() {
            return Err(WaypointError::empty(format!(
                "raster of {}x{} pixels",
                raster.width(),
                raster.height()
            )));
        }

        let width = raster.width();
        let height = raster.height();
        let mut waypoints = Vec::with_capacity(width * height + height + 1);

        progress_callback(0.0);

        for row in 0..height {
            if row % 10 == 0 || row == height - 1 {
                progress_callback(row as f32 / height as f32);
            }

            let reversed = self.params.direction == RasterDirection::Bi && row % 2 == 1;
            let cols: Box<dyn Iterator<Item = usize>> = if reversed {
                Box::new((0..width).rev())
            } else {
                Box::new(0..width)
            };

            let previous_lit = waypoints.last().map(|w: &Waypoint| w.laser_on);
            if self.params.direction == RasterDirection::Uni
                && previous_lit.is_some_and(|lit| lit || raster.get(0, row))
            {
                // Return to the row start with the beam off, whatever the
                // next pixel holds
                let (x, y) = self.params.position(0, row);
                waypoints.push(Waypoint::off(x, y));
            }

            for col in cols {
                let (x, y) = self.params.position(col, row);
                waypoints.push(Waypoint::new(x, y, raster.get(col, row)));
            }
        }

        if let Some(&last) = waypoints.last() {
            waypoints.push(Waypoint::off(last.x, last.y));
        }

        progress_callback(1.0);

        tracing::debug!(
            "Generated {} raster waypoints from {}x{} pixels ({:?})",
            waypoints.len(),
            width,
            height,
            self.params.direction
        );

        Ok(waypoints)
    }
}

/// Generate unscaled raster waypoints for an already downsampled raster
pub fn generate_raster(
    raster: &BinaryRaster,
    downsample_factor: u32,
    direction: RasterDirection,
) -> Result<Vec<Waypoint>, WaypointError> {
    RasterEngraver::new(RasterParameters {
        downsample_factor,
        direction,
        ..RasterParameters::default()
    })
    .generate(raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bidirectional_row_order() {
        let raster = BinaryRaster::from_rows(&[[1u8, 1, 1], [1, 1, 1]]).unwrap();
        let waypoints = generate_raster(&raster, 1, RasterDirection::Bi).unwrap();

        let xs: Vec<f64> = waypoints.iter().map(|w| w.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 2.0, 1.0, 0.0, 0.0]);
        assert!(!waypoints.last().unwrap().laser_on);
        assert_eq!(waypoints.len(), 7);
    }

    #[test]
    fn test_uni_transition_after_lit_row() {
        let raster = BinaryRaster::from_rows(&[[0u8, 1], [0, 0]]).unwrap();
        let waypoints = generate_raster(&raster, 1, RasterDirection::Uni).unwrap();

        assert_eq!(waypoints.len(), 6);
        assert_eq!(waypoints[2], Waypoint::off(0.0, 1.0));
    }

    #[test]
    fn test_uni_transition_before_lit_row_start() {
        let raster = BinaryRaster::from_rows(&[[0u8, 0, 0], [255, 0, 0]]).unwrap();
        let waypoints = generate_raster(&raster, 1, RasterDirection::Uni).unwrap();

        assert_eq!(waypoints.len(), 8);
        assert_eq!(waypoints[2], Waypoint::off(2.0, 0.0));
        assert_eq!(waypoints[3], Waypoint::off(0.0, 1.0));
        assert_eq!(waypoints[4], Waypoint::on(0.0, 1.0));
    }

    #[test]
    fn test_factor_and_normalized_scaling() {
        let raster = BinaryRaster::from_rows(&[[1u8, 1]]).unwrap();
        let engraver = RasterEngraver::new(RasterParameters {
            downsample_factor: 4,
            scale_mode: ScaleMode::Normalized {
                width: 8.0,
                height: 8.0,
            },
            scale_factor: 100.0,
            ..RasterParameters::default()
        });
        let waypoints = engraver.generate(&raster).unwrap();
        assert_eq!(waypoints[1].position(), (50.0, 0.0));
    }

    #[test]
    fn test_progress_reaches_completion() {
        let raster = BinaryRaster::from_rows(&[[1u8]; 25]).unwrap();
        let mut reported = Vec::new();
        RasterEngraver::default()
            .generate_with_progress(&raster, |p| reported.push(p))
            .unwrap();
        assert_eq!(reported.first(), Some(&0.0));
        assert_eq!(reported.last(), Some(&1.0));
        assert!(reported.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_invalid_parameters() {
        let raster = BinaryRaster::from_rows(&[[1u8]]).unwrap();
        assert!(generate_raster(&raster, 0, RasterDirection::Uni).is_err());

        let engraver = RasterEngraver::new(RasterParameters {
            scale_factor: -1.0,
            ..RasterParameters::default()
        });
        assert!(matches!(
            engraver.generate(&raster),
            Err(WaypointError::InvalidScale { .. })
        ));
    }
}
