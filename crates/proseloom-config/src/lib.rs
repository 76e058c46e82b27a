// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for proseloom.
//!
//! Layered TOML configuration (defaults < XDG file < local file < env),
//! the per-tier/per-model token ceiling table, and the sampling preset
//! registry.

pub mod ceilings;
pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod presets;

pub use ceilings::token_ceiling;
pub use diagnostic::{figment_to_config_errors, render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AccountConfig, ContextConfig, GenerationConfig, LorebookConfig, ProseloomConfig,
    SamplingConfig, StoryConfig, TokenizerConfig,
};
pub use presets::{preset, Preset, PRESETS};

/// Load the configuration hierarchy and convert failures into diagnostics.
pub fn load_and_validate() -> Result<ProseloomConfig, Vec<ConfigError>> {
    load_config().map_err(figment_to_config_errors)
}

/// Load configuration from a TOML string and convert failures into diagnostics.
pub fn load_and_validate_str(toml_content: &str) -> Result<ProseloomConfig, Vec<ConfigError>> {
    load_config_from_str(toml_content).map_err(figment_to_config_errors)
}
