// src/config/mod.rs

//! Configuration loading and validation for xtatus.
//!
//! Responsibilities:
//! - Define the raw and validated data model (`model.rs`).
//! - Load a config file from disk in either format (`loader.rs`).
//! - Validate intervals, paths and settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, parse_line_config};
pub use model::{
    ConfigFile, ConfigSection, RawConfigFile, RawConfigSection, RawInterval, RawTask,
    TaskDescriptor,
};
