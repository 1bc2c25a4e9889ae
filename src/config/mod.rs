//! Configuration loading and theme resolution.

pub mod config;

pub use config::{BehaviorConfig, GridConfig, ThemeConfig};
