// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order: compiled defaults < `~/.config/proseloom/proseloom.toml`
//! < `./proseloom.toml` < `PROSELOOM_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ProseloomConfig;

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<ProseloomConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ProseloomConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ProseloomConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ProseloomConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ProseloomConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ProseloomConfig::default()))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("proseloom/proseloom.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("proseloom.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PROSELOOM_GENERATION_MAX_LENGTH` must
/// map to `generation.max_length`, not `generation.max.length`.
fn env_provider() -> Env {
    Env::prefixed("PROSELOOM_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("account_", "account.", 1)
            .replacen("generation_", "generation.", 1)
            .replacen("story_", "story.", 1)
            .replacen("lorebook_", "lorebook.", 1)
            .replacen("tokenizer_", "tokenizer.", 1)
            .replacen("context_", "context.", 1)
            .replacen("sampling_", "sampling.", 1);
        mapped.into()
    })
}
