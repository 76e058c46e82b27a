// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data-driven sampling preset registry.
//!
//! Presets map a display name to a full [`SamplingConfig`], decoupled from
//! any UI wiring. Selecting an unknown preset is a configuration error that
//! lists the available names.

use proseloom_core::ProseloomError;

use crate::model::SamplingConfig;

/// A named sampling preset.
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    /// Model family the preset was tuned for, informational only.
    pub tuned_for: &'static str,
    pub sampling: fn() -> SamplingConfig,
}

/// Builtin presets.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "carefree",
        tuned_for: "kayra-v1",
        sampling: carefree,
    },
    Preset {
        name: "fresh-coffee",
        tuned_for: "clio-v1",
        sampling: fresh_coffee,
    },
    Preset {
        name: "golden-arrow",
        tuned_for: "llama-3-erato-v1",
        sampling: golden_arrow,
    },
];

/// Resolves a preset by name.
pub fn preset(name: &str) -> Result<SamplingConfig, ProseloomError> {
    PRESETS
        .iter()
        .find(|p| p.name == name)
        .map(|p| (p.sampling)())
        .ok_or_else(|| {
            let names: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
            ProseloomError::Config(format!(
                "unknown sampling preset: {name} (available: {})",
                names.join(", ")
            ))
        })
}

fn carefree() -> SamplingConfig {
    SamplingConfig {
        temperature: 1.35,
        top_p: 0.85,
        top_k: 15,
        top_a: 0.1,
        tail_free_sampling: 0.915,
        repetition_penalty: 2.8,
        repetition_penalty_range: 2048,
        repetition_penalty_slope: 0.02,
        repetition_penalty_frequency: 0.02,
        repetition_penalty_presence: 0.0,
        phrase_repetition_penalty: Some("aggressive".to_string()),
        order: vec![2, 3, 0, 4, 1],
        ..SamplingConfig::default()
    }
}

fn fresh_coffee() -> SamplingConfig {
    SamplingConfig {
        temperature: 1.0,
        top_p: 0.0,
        top_k: 25,
        top_a: 0.0,
        tail_free_sampling: 0.925,
        repetition_penalty: 1.9,
        repetition_penalty_range: 768,
        repetition_penalty_slope: 1.0,
        repetition_penalty_frequency: 0.0025,
        repetition_penalty_presence: 0.001,
        phrase_repetition_penalty: Some("light".to_string()),
        order: vec![3, 2, 1, 0, 4],
        ..SamplingConfig::default()
    }
}

fn golden_arrow() -> SamplingConfig {
    SamplingConfig {
        temperature: 1.0,
        top_p: 0.995,
        top_k: 0,
        top_a: 0.0,
        tail_free_sampling: 0.0,
        repetition_penalty: 1.5,
        repetition_penalty_range: 2240,
        repetition_penalty_slope: 1.0,
        repetition_penalty_frequency: 0.0,
        repetition_penalty_presence: 0.0,
        phrase_repetition_penalty: Some("very_aggressive".to_string()),
        mirostat_tau: 0.0,
        order: vec![0, 1],
        ..SamplingConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_presets_resolve() {
        let carefree = preset("carefree").unwrap();
        assert_eq!(carefree.temperature, 1.35);
        assert_eq!(carefree.order, vec![2, 3, 0, 4, 1]);

        let coffee = preset("fresh-coffee").unwrap();
        assert_eq!(coffee.top_k, 25);
    }

    #[test]
    fn unknown_preset_lists_available_names() {
        let err = preset("espresso").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("espresso"));
        assert!(msg.contains("carefree"));
        assert!(msg.contains("fresh-coffee"));
    }

    #[test]
    fn preset_names_are_unique() {
        let mut names: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PRESETS.len());
    }
}
