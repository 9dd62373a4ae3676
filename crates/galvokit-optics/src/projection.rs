//! Flat-field projection model
//!
//! Each mirror is treated independently: a point `coord` millimetres off
//! axis on a work plane `distance` millimetres away needs a deflection of
//! `atan2(coord, distance)`.

use galvokit_core::AngleSample;

/// Mirror angles (radians) that place the beam at (x, y)
pub fn project(x: f64, y: f64, laser_distance_mm: f64) -> AngleSample {
    AngleSample {
        theta_x: x.atan2(laser_distance_mm),
        theta_y: y.atan2(laser_distance_mm),
    }
}
