//! Optical mapper
//!
//! Turns waypoints or planned segments into a stream of actuator codes at
//! the configured output rate, with the laser state carried alongside each
//! sample.

use crate::dac;
use crate::projection;
use crate::resample::{resample, resample_flags};
use galvokit_core::{ActuatorSample, AngleSample, MapperError, Segment, Waypoint};
use galvokit_settings::OpticalConfig;
use serde::{Deserialize, Serialize};

/// Minimum length of a resampled trajectory
const MIN_OUTPUT_SAMPLES: usize = 2;

/// Resampled actuator stream
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    pub samples: Vec<ActuatorSample>,
    /// Laser state per sample, same length as `samples`
    pub laser: Vec<bool>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate samples with their laser state
    pub fn iter(&self) -> impl Iterator<Item = (ActuatorSample, bool)> + '_ {
        self.samples.iter().copied().zip(self.laser.iter().copied())
    }
}

/// Maps work-plane positions to galvo actuator codes
#[derive(Debug, Clone)]
pub struct OpticalMapper {
    config: OpticalConfig,
}

impl OpticalMapper {
    /// Create a mapper, validating the optical configuration
    pub fn new(config: OpticalConfig) -> Result<Self, MapperError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OpticalConfig {
        &self.config
    }

    /// Mirror angles for a work-plane position
    pub fn project(&self, x: f64, y: f64) -> AngleSample {
        projection::project(x, y, self.config.laser_distance_mm)
    }

    /// Continuous DAC value for a mirror angle in radians
    pub fn angle_to_dac(&self, theta: f64) -> f64 {
        dac::angle_to_dac(
            theta,
            (self.config.angle_min_deg, self.config.angle_max_deg),
            self.config.dac_resolution,
        )
    }

    /// Final rounding and clamping of a continuous DAC value
    pub fn quantize(&self, value: f64) -> i32 {
        dac::quantize(value, self.config.dac_resolution)
    }

    /// Quantised actuator codes for a pair of mirror angles
    pub fn to_actuator(&self, angles: AngleSample) -> ActuatorSample {
        ActuatorSample::new(
            self.quantize(self.angle_to_dac(angles.theta_x)),
            self.quantize(self.angle_to_dac(angles.theta_y)),
        )
    }

    /// One actuator sample per waypoint, without resampling
    pub fn map_points(&self, waypoints: &[Waypoint]) -> Result<Vec<ActuatorSample>, MapperError> {
        check_finite(waypoints)?;
        Ok(waypoints
            .iter()
            .map(|w| self.to_actuator(self.project(w.x, w.y)))
            .collect())
    }

    /// Number of output samples for `input_len` inputs.
    ///
    /// With a known duration this is `round(output_rate * duration)`,
    /// otherwise `oversample * input_len`; never below two. Counts above
    /// `max_samples` are rejected.
    pub fn sample_count(
        &self,
        input_len: usize,
        duration_s: Option<f64>,
    ) -> Result<usize, MapperError> {
        // NaN and negative durations fall back to oversampling; an infinite
        // one is simply too long
        let requested = match duration_s.filter(|d| *d >= 0.0) {
            Some(d) => (self.config.output_rate_sps * d).round(),
            None => self.config.oversample as f64 * input_len as f64,
        };
        let limit = self.config.max_samples;
        if requested > limit as f64 {
            return Err(MapperError::TooManySamples { requested, limit });
        }
        Ok((requested as usize).max(MIN_OUTPUT_SAMPLES))
    }

    /// Resample a continuous channel with the configured interpolation
    pub fn resample(&self, values: &[f64], count: usize) -> Result<Vec<f64>, MapperError> {
        resample(values, count, self.config.interpolation)
    }

    /// Map waypoints to a resampled trajectory.
    ///
    /// `duration_s` is the total move time when known (for example from the
    /// planner); without it the output is oversampled by the configured
    /// integer factor.
    pub fn trajectory(
        &self,
        waypoints: &[Waypoint],
        duration_s: Option<f64>,
    ) -> Result<Trajectory, MapperError> {
        check_finite(waypoints)?;

        let (dac_x, dac_y): (Vec<f64>, Vec<f64>) = waypoints
            .iter()
            .map(|w| {
                let angles = self.project(w.x, w.y);
                (
                    self.angle_to_dac(angles.theta_x),
                    self.angle_to_dac(angles.theta_y),
                )
            })
            .unzip();
        let flags: Vec<bool> = waypoints.iter().map(|w| w.laser_on).collect();

        let count = self.sample_count(waypoints.len(), duration_s)?;
        let xs = self.resample(&dac_x, count)?;
        let ys = self.resample(&dac_y, count)?;
        let laser = resample_flags(&flags, count)?;

        let samples = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| ActuatorSample::new(self.quantize(x), self.quantize(y)))
            .collect();

        tracing::debug!(
            "Mapped {} waypoints to {} samples ({} interpolation)",
            waypoints.len(),
            count,
            self.config.interpolation
        );

        Ok(Trajectory { samples, laser })
    }

    /// Map planned segments to a resampled trajectory.
    ///
    /// The segment chain becomes a point list: the first start point is
    /// de-energised, each end point carries its segment's laser state, and a
    /// start that does not meet the previous end is inserted as a
    /// de-energised jump. The summed segment duration sets the sample count.
    pub fn trajectory_from_segments(
        &self,
        segments: &[Segment],
    ) -> Result<Trajectory, MapperError> {
        let mut points: Vec<Waypoint> = Vec::with_capacity(segments.len() + 1);
        for segment in segments {
            let (sx, sy) = segment.start;
            if points.last().map(|p| p.position()) != Some(segment.start) {
                points.push(Waypoint::off(sx, sy));
            }
            let (ex, ey) = segment.end;
            points.push(Waypoint::new(ex, ey, segment.laser_on));
        }

        let duration: f64 = segments.iter().map(|s| s.duration_s).sum();
        self.trajectory(&points, Some(duration))
    }
}

fn check_finite(waypoints: &[Waypoint]) -> Result<(), MapperError> {
    match waypoints
        .iter()
        .position(|w| !(w.x.is_finite() && w.y.is_finite()))
    {
        Some(index) => Err(MapperError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> OpticalMapper {
        OpticalMapper::new(OpticalConfig::default()).unwrap()
    }

    #[test]
    fn test_origin_maps_to_center_code() {
        let samples = mapper().map_points(&[Waypoint::on(0.0, 0.0)]).unwrap();
        assert_eq!(samples, vec![ActuatorSample::new(2048, 2048)]);
    }

    #[test]
    fn test_sample_count() {
        let mapper = mapper();
        assert_eq!(mapper.sample_count(10, Some(0.01)), Ok(200));
        assert_eq!(mapper.sample_count(10, None), Ok(10));
        assert_eq!(mapper.sample_count(10, Some(0.0)), Ok(2));
        assert_eq!(mapper.sample_count(1, None), Ok(2));
        assert_eq!(mapper.sample_count(10, Some(f64::NAN)), Ok(10));
    }

    #[test]
    fn test_sample_count_limit() {
        let mapper = OpticalMapper::new(OpticalConfig {
            max_samples: 1000,
            ..OpticalConfig::default()
        })
        .unwrap();
        assert_eq!(mapper.sample_count(10, Some(0.05)), Ok(1000));
        assert_eq!(
            mapper.sample_count(10, Some(0.1)),
            Err(MapperError::TooManySamples {
                requested: 2000.0,
                limit: 1000,
            })
        );
        assert!(matches!(
            mapper.sample_count(10, Some(f64::INFINITY)),
            Err(MapperError::TooManySamples { limit: 1000, .. })
        ));
        assert!(matches!(
            mapper.sample_count(10, Some(1e300)),
            Err(MapperError::TooManySamples { limit: 1000, .. })
        ));
    }

    #[test]
    fn test_non_finite_input() {
        let err = mapper()
            .map_points(&[Waypoint::on(0.0, 0.0), Waypoint::on(f64::INFINITY, 0.0)])
            .unwrap_err();
        assert_eq!(err, MapperError::NonFiniteCoordinate { index: 1 });
    }

    #[test]
    fn test_invalid_config() {
        let config = OpticalConfig {
            dac_resolution: 1,
            ..OpticalConfig::default()
        };
        assert!(matches!(
            OpticalMapper::new(config),
            Err(MapperError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_segment_chain_with_gap() {
        let segments = [
            Segment {
                start: (0.0, 0.0),
                end: (10.0, 0.0),
                kind: galvokit_core::SegmentKind::Linear,
                duration_s: 0.001,
                laser_on: true,
            },
            Segment {
                start: (20.0, 0.0),
                end: (30.0, 0.0),
                kind: galvokit_core::SegmentKind::Linear,
                duration_s: 0.001,
                laser_on: true,
            },
        ];
        let trajectory = mapper().trajectory_from_segments(&segments).unwrap();
        assert_eq!(trajectory.len(), 40);
        assert_eq!(trajectory.laser.len(), 40);
        assert!(!trajectory.laser[0]);
        assert!(trajectory.laser[39]);
    }
}
