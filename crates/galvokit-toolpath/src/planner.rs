//! Lookahead motion planner
//!
//! Consumes decoded commands one at a time, keeping the last two motion
//! commands in a lookahead buffer. Whenever a new motion arrives the pair in
//! the buffer is fused into a timed segment:
//!
//! - linear then linear gives a `Linear` segment
//! - linear then arc gives an `Arc` segment
//! - a pair starting with an arc yields nothing
//!
//! Positions are modal: an axis a command omits keeps its last value, and
//! every command (including non-motion ones) updates the modal axes.

use galvokit_core::{Command, Opcode, ParamKey, PlannerError, Segment, SegmentKind};
use galvokit_settings::{ArcCenterMode, PlannerConfig};
use std::collections::VecDeque;
use std::f64::consts::PI;

const LOOKAHEAD: usize = 2;

/// A motion command with its modal position resolved
#[derive(Debug, Clone)]
struct BufferedMove {
    opcode: Opcode,
    position: [f64; 3],
    feed: Option<f64>,
    /// Raw I/J words
    arc_ij: (f64, f64),
    line_number: usize,
}

/// Per-run planner state, reset for every `plan` call
struct PlanState {
    buffer: VecDeque<BufferedMove>,
    laser_on: bool,
    position: [f64; 3],
}

impl PlanState {
    fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(LOOKAHEAD + 1),
            laser_on: false,
            position: [0.0; 3],
        }
    }

    fn update_axes(&mut self, command: &Command) {
        for (axis, key) in ParamKey::AXES.iter().enumerate() {
            if let Some(value) = command.param(*key) {
                self.position[axis] = value;
            }
        }
    }

    fn push(&mut self, entry: BufferedMove) {
        self.buffer.push_back(entry);
        while self.buffer.len() > LOOKAHEAD {
            self.buffer.pop_front();
        }
    }
}

/// Converts command streams into timed segments
#[derive(Debug, Clone)]
pub struct MotionPlanner {
    config: PlannerConfig,
}

impl MotionPlanner {
    /// Create a planner, validating its configuration
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a command stream into segments.
    ///
    /// Fails only in strict mode, on a transition that cannot be planned.
    pub fn plan(&self, commands: &[Command]) -> Result<Vec<Segment>, PlannerError> {
        let mut state = PlanState::new();
        let mut segments = Vec::new();

        for command in commands {
            tracing::trace!("plan line {}: {}", command.line_number, command);

            match &command.opcode {
                Opcode::LaserOn => state.laser_on = true,
                Opcode::LaserOff => state.laser_on = false,
                op if op.is_motion() => {
                    state.update_axes(command);
                    state.push(BufferedMove {
                        opcode: op.clone(),
                        position: state.position,
                        feed: command.param(ParamKey::F).filter(|f| *f > 0.0),
                        arc_ij: (
                            command.param(ParamKey::I).unwrap_or(0.0),
                            command.param(ParamKey::J).unwrap_or(0.0),
                        ),
                        line_number: command.line_number,
                    });

                    if let Some(segment) = self.fuse(&state)? {
                        tracing::trace!("segment {}", segment);
                        segments.push(segment);
                    }
                }
                _ => state.update_axes(command),
            }
        }

        tracing::debug!(
            "Planned {} segments from {} commands ({:.4}s)",
            segments.len(),
            commands.len(),
            Self::total_duration(&segments)
        );

        Ok(segments)
    }

    /// Sum of segment durations in seconds
    pub fn total_duration(segments: &[Segment]) -> f64 {
        segments.iter().map(|s| s.duration_s).sum()
    }

    fn arc_center(&self, (i, j): (f64, f64), start: (f64, f64)) -> (f64, f64) {
        match self.config.arc_center {
            ArcCenterMode::Absolute => (i, j),
            ArcCenterMode::Relative => (start.0 + i, start.1 + j),
        }
    }

    /// Fuse the two buffered moves into a segment, if the pair is plannable
    fn fuse(&self, state: &PlanState) -> Result<Option<Segment>, PlannerError> {
        let (Some(prev), Some(cur)) = (state.buffer.front(), state.buffer.get(1)) else {
            return Ok(None);
        };

        let feed = cur.feed.unwrap_or(self.config.default_feed_mm_s);
        let start = (prev.position[0], prev.position[1]);
        let end = (cur.position[0], cur.position[1]);

        if !prev.opcode.is_linear() {
            if self.config.strict_transitions {
                return Err(PlannerError::UnsupportedTransition {
                    line_number: cur.line_number,
                    from: prev.opcode.to_string(),
                    to: cur.opcode.to_string(),
                });
            }
            tracing::debug!(
                "Dropping {} -> {} transition at line {}",
                prev.opcode,
                cur.opcode,
                cur.line_number
            );
            return Ok(None);
        }

        let segment = if cur.opcode.is_linear() {
            let distance = prev
                .position
                .iter()
                .zip(cur.position.iter())
                .map(|(a, b)| (b - a) * (b - a))
                .sum::<f64>()
                .sqrt();
            Segment {
                start,
                end,
                kind: SegmentKind::Linear,
                duration_s: distance / feed,
                laser_on: state.laser_on,
            }
        } else {
            let center = self.arc_center(cur.arc_ij, start);
            let sweep = arc_sweep(start, end, center, cur.opcode == Opcode::MoveArcCW);
            // Length of the I/J vector: centre to origin for absolute centres,
            // centre to start for relative ones
            let radius = cur.arc_ij.0.hypot(cur.arc_ij.1);
            Segment {
                start,
                end,
                kind: SegmentKind::Arc,
                duration_s: sweep.abs() * radius / feed,
                laser_on: state.laser_on,
            }
        };

        Ok(Some(segment))
    }
}

/// Signed angle swept from `start` to `end` around `center`.
///
/// Clockwise sweeps are negative and counter-clockwise sweeps positive.
fn arc_sweep(start: (f64, f64), end: (f64, f64), center: (f64, f64), clockwise: bool) -> f64 {
    let start_angle = (start.1 - center.1).atan2(start.0 - center.0);
    let end_angle = (end.1 - center.1).atan2(end.0 - center.0);
    let mut delta = end_angle - start_angle;

    if clockwise && delta > 0.0 {
        delta -= 2.0 * PI;
    } else if !clockwise && delta < 0.0 {
        delta += 2.0 * PI;
    }
    delta
}
