//! # galvokit Optics
//!
//! Converts work-plane positions into galvo drive signals:
//! - arctangent projection onto mirror angles
//! - two-stage linear remap of angles onto DAC codes
//! - resampling to a fixed output rate

pub mod dac;
pub mod mapper;
pub mod projection;
pub mod resample;

pub use mapper::{OpticalMapper, Trajectory};
pub use resample::{resample, resample_flags};
