//! galvokit Settings Crate
//!
//! Handles pipeline configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{
    ArcCenterMode, Config, GenerationSettings, Interpolation, OpticalConfig, PlannerConfig,
};
pub use error::{SettingsError, SettingsResult};
