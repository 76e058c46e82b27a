// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for proseloom.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use proseloom_core::Tier;
use serde::{Deserialize, Serialize};

/// Top-level proseloom configuration.
///
/// Loaded from `proseloom.toml` (local directory, then XDG config dir),
/// with `PROSELOOM_` environment variable overrides. All sections are
/// optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProseloomConfig {
    /// Account and endpoint settings.
    #[serde(default)]
    pub account: AccountConfig,

    /// Generation request settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Story metadata and persistent memory.
    #[serde(default)]
    pub story: StoryConfig,

    /// Lorebook catalog settings.
    #[serde(default)]
    pub lorebook: LorebookConfig,

    /// Tokenizer profile settings.
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Context assembly settings.
    #[serde(default)]
    pub context: ContextConfig,

    /// Sampling parameters sent with each generation request.
    #[serde(default)]
    pub sampling: SamplingConfig,
}

/// Account and endpoint configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Access token for the generation service. `None` requires `login`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Account email, used by the `login` command.
    #[serde(default)]
    pub email: Option<String>,

    /// Overrides the per-model generation endpoint when non-empty.
    #[serde(default)]
    pub endpoint_override: String,
}

/// Generation request configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Model identifier, resolved against the model profile table.
    #[serde(default = "default_model")]
    pub model: String,

    /// Subscription tier, resolved against the ceiling table.
    #[serde(default = "default_tier")]
    pub tier: Tier,

    /// Tokens to generate per request. Reserved out of the context budget.
    #[serde(default = "default_max_length")]
    pub max_length: u32,

    /// Trim the response at a sentence boundary.
    #[serde(default = "default_stop_at_sentence")]
    pub stop_at_sentence: bool,

    /// Module prefix. Empty means the vanilla sentinel.
    #[serde(default)]
    pub prefix: String,

    /// Named sampling preset. Empty uses the `[sampling]` section as-is.
    #[serde(default)]
    pub preset: String,

    /// Apply the per-model banned-sequence and logit-bias tables.
    #[serde(default = "default_use_model_defaults")]
    pub use_model_defaults: bool,

    /// Apply the per-model repetition penalty whitelist.
    #[serde(default)]
    pub whitelist: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            tier: default_tier(),
            max_length: default_max_length(),
            stop_at_sentence: default_stop_at_sentence(),
            prefix: String::new(),
            preset: String::new(),
            use_model_defaults: default_use_model_defaults(),
            whitelist: false,
        }
    }
}

fn default_model() -> String {
    "kayra-v1".to_string()
}

fn default_tier() -> Tier {
    Tier::Tablet
}

fn default_max_length() -> u32 {
    40
}

fn default_stop_at_sentence() -> bool {
    true
}

fn default_use_model_defaults() -> bool {
    true
}

/// Story metadata and persistent memory.
///
/// `title` falls back to the note file stem when empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoryConfig {
    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub genre: String,

    #[serde(default)]
    pub tags: String,

    #[serde(default)]
    pub title: String,

    /// Persistent memory, prepended before the story in every context.
    #[serde(default)]
    pub memory: String,
}

/// Lorebook catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LorebookConfig {
    /// Path to the lorebook JSON file.
    #[serde(default = "default_lorebook_path")]
    pub path: String,
}

impl Default for LorebookConfig {
    fn default() -> Self {
        Self {
            path: default_lorebook_path(),
        }
    }
}

fn default_lorebook_path() -> String {
    "lorebook.json".to_string()
}

/// Tokenizer profile configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenizerConfig {
    /// Directory holding the tokenizer definition files. Empty resolves to
    /// `<config dir>/proseloom/tokenizers`.
    #[serde(default)]
    pub dir: String,
}

/// Context assembly configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Token-ceiling overrides keyed `"<tier>/<model>"`, merged over the
    /// builtin ceiling table.
    #[serde(default)]
    pub ceiling_overrides: BTreeMap<String, u32>,

    /// Tokens held back from lore admission for story content.
    #[serde(default = "default_lore_margin")]
    pub lore_margin: u32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            ceiling_overrides: BTreeMap::new(),
            lore_margin: default_lore_margin(),
        }
    }
}

fn default_lore_margin() -> u32 {
    1000
}

/// Sampling parameters for the generation request.
///
/// Zero-valued optional samplers are omitted from the wire request (the
/// service treats absence as "disabled"); see proseloom-novelai for the
/// omission rule table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default)]
    pub top_p: f64,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_top_a")]
    pub top_a: f64,

    #[serde(default)]
    pub typical_p: f64,

    #[serde(default)]
    pub tail_free_sampling: f64,

    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: f64,

    #[serde(default = "default_repetition_penalty_range")]
    pub repetition_penalty_range: u32,

    #[serde(default = "default_repetition_penalty_slope")]
    pub repetition_penalty_slope: f64,

    #[serde(default)]
    pub repetition_penalty_frequency: f64,

    #[serde(default)]
    pub repetition_penalty_presence: f64,

    /// Phrase repetition penalty level name, omitted when `None`.
    #[serde(default)]
    pub phrase_repetition_penalty: Option<String>,

    /// Mirostat target surprise. Mirostat is sent only when positive.
    #[serde(default)]
    pub mirostat_tau: f64,

    /// Mirostat learning rate, sent alongside `mirostat_tau`.
    #[serde(default)]
    pub mirostat_lr: f64,

    /// Top-G sampling, sent only when positive.
    #[serde(default)]
    pub top_g: f64,

    /// Sampler order.
    #[serde(default = "default_order")]
    pub order: Vec<u32>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: 0.0,
            top_k: default_top_k(),
            top_a: default_top_a(),
            typical_p: 0.0,
            tail_free_sampling: 0.0,
            repetition_penalty: default_repetition_penalty(),
            repetition_penalty_range: default_repetition_penalty_range(),
            repetition_penalty_slope: default_repetition_penalty_slope(),
            repetition_penalty_frequency: 0.0,
            repetition_penalty_presence: 0.0,
            phrase_repetition_penalty: None,
            mirostat_tau: 0.0,
            mirostat_lr: 0.0,
            top_g: 0.0,
            order: default_order(),
        }
    }
}

fn default_temperature() -> f64 {
    2.0
}

fn default_top_k() -> u32 {
    4
}

fn default_top_a() -> f64 {
    0.71
}

fn default_repetition_penalty() -> f64 {
    2.3
}

fn default_repetition_penalty_range() -> u32 {
    8192
}

fn default_repetition_penalty_slope() -> f64 {
    0.09
}

fn default_order() -> Vec<u32> {
    vec![1, 0, 4]
}
