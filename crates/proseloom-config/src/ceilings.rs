// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-tier, per-model token ceiling table.
//!
//! The ceiling is the maximum context size the generation service accepts
//! for a given subscription tier and model. Unknown pairs are a hard
//! configuration error; they are never silently defaulted.

use proseloom_core::{ProseloomError, Tier};

use crate::model::ContextConfig;

/// Builtin ceiling table. Config `[context] ceiling_overrides` entries keyed
/// `"<tier>/<model>"` take precedence.
const CEILINGS: &[(Tier, &str, u32)] = &[
    (Tier::Tablet, "clio-v1", 4096),
    (Tier::Scroll, "clio-v1", 4096),
    (Tier::Opus, "clio-v1", 8192),
    (Tier::Tablet, "kayra-v1", 4096),
    (Tier::Scroll, "kayra-v1", 4096),
    (Tier::Opus, "kayra-v1", 8192),
    (Tier::Tablet, "llama-3-erato-v1", 8192),
    (Tier::Scroll, "llama-3-erato-v1", 8192),
    (Tier::Opus, "llama-3-erato-v1", 8192),
];

/// Resolves the token ceiling for a (tier, model) pair.
pub fn token_ceiling(
    config: &ContextConfig,
    tier: Tier,
    model: &str,
) -> Result<u32, ProseloomError> {
    let key = format!("{tier}/{model}");
    if let Some(ceiling) = config.ceiling_overrides.get(&key) {
        return Ok(*ceiling);
    }

    CEILINGS
        .iter()
        .find(|(t, m, _)| *t == tier && *m == model)
        .map(|(_, _, ceiling)| *ceiling)
        .ok_or_else(|| {
            ProseloomError::Config(format!("no token ceiling for tier/model pair: {key}"))
        })
}
