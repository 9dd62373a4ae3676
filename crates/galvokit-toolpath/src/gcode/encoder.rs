//! Toolpath text encoder

use galvokit_core::constants::{COORDINATE_PRECISION, LASER_POWER_ON};
use galvokit_core::{ToolpathMode, Waypoint};
use std::fmt::Write;

/// Encode waypoints as toolpath text.
///
/// The first line is the mode header. Each waypoint becomes one `G01` line;
/// raster lines also carry the laser word for that point. Output contains no
/// timestamps, so equal input always encodes to equal text.
pub fn encode(waypoints: &[Waypoint], mode: ToolpathMode) -> String {
    // "G01 X-000.000000 Y-000.000000 M5 S00\n"
    let mut text = String::with_capacity(8 + waypoints.len() * 40);
    text.push_str(mode.as_str());
    text.push('\n');

    for w in waypoints {
        let _ = write!(
            text,
            "G01 X{:.prec$} Y{:.prec$}",
            w.x,
            w.y,
            prec = COORDINATE_PRECISION
        );
        if mode == ToolpathMode::Raster {
            if w.laser_on {
                let _ = write!(text, " M3 S{}", LASER_POWER_ON);
            } else {
                text.push_str(" M5 S00");
            }
        }
        text.push('\n');
    }

    tracing::debug!("Encoded {} waypoints as {} toolpath", waypoints.len(), mode);
    text
}
