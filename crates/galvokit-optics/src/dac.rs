//! Angle to DAC code mapping
//!
//! The angle in degrees is first remapped from the full `[-180, 180]`
//! domain onto the mechanical mirror range, then from the mechanical range
//! onto `[0, dac_resolution]`. Both stages stay in floating point; only
//! [`quantize`] rounds.

use galvokit_core::constants::FULL_ANGLE_DOMAIN_DEG;

/// Linear remap of `value` from `[from.0, from.1]` onto `[to.0, to.1]`,
/// clamped at the ends of the source domain
fn remap(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let t = ((value - from.0) / (from.1 - from.0)).clamp(0.0, 1.0);
    to.0 + t * (to.1 - to.0)
}

/// Continuous DAC value for a mirror angle in radians
pub fn angle_to_dac(theta: f64, angle_range_deg: (f64, f64), dac_resolution: u32) -> f64 {
    let mechanical = remap(theta.to_degrees(), FULL_ANGLE_DOMAIN_DEG, angle_range_deg);
    remap(mechanical, angle_range_deg, (0.0, dac_resolution as f64))
}

/// Round to the nearest code within `[0, dac_resolution - 1]`
pub fn quantize(value: f64, dac_resolution: u32) -> i32 {
    let max = dac_resolution.saturating_sub(1) as f64;
    value.round().clamp(0.0, max) as i32
}
