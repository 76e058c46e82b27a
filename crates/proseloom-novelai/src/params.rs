// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Statically-typed sampling parameters for the generation request.
//!
//! Optional samplers follow an omit-when-zero rule: a zero-valued
//! `max_length`, `top_p`, `top_k`, or `top_a` is left off the wire (the
//! service treats absence as "disabled"), while the always-present
//! samplers serialize their zero. Mirostat and top-G are sent only when
//! positive.

use proseloom_config::{GenerationConfig, SamplingConfig};
use serde::Serialize;

use crate::defaults::{model_defaults, LogitBias};

/// The `parameters` object of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_a: Option<f64>,
    pub typical_p: f64,
    pub tail_free_sampling: f64,
    pub repetition_penalty: f64,
    pub repetition_penalty_range: u32,
    pub repetition_penalty_slope: f64,
    pub repetition_penalty_frequency: f64,
    pub repetition_penalty_presence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_penalty_whitelist: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bad_words_ids: Option<Vec<Vec<u32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias_exp: Option<Vec<LogitBias>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase_rep_pen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirostat_tau: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirostat_lr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_g: Option<f64>,
    pub order: Vec<u32>,
    pub generate_until_sentence: bool,
    /// Module prefix sentinel, filled in by the generation client.
    pub prefix: String,
    pub min_length: u32,
    /// Token cropped off the context tail, filled in by the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cropped_token: Option<u32>,
}

impl GenerationParams {
    /// Builds wire parameters from the sampling and generation config,
    /// applying the per-model default tables where enabled.
    pub fn from_config(sampling: &SamplingConfig, generation: &GenerationConfig) -> Self {
        let defaults = model_defaults(&generation.model);

        let (bad_words_ids, logit_bias_exp) = match (&defaults, generation.use_model_defaults) {
            (Some(d), true) => (d.bans.clone(), d.bias.clone()),
            _ => (None, None),
        };
        let repetition_penalty_whitelist = match (&defaults, generation.whitelist) {
            (Some(d), true) => Some(d.whitelist.clone()),
            _ => None,
        };

        Self {
            max_length: non_zero_u32(generation.max_length),
            temperature: sampling.temperature,
            top_p: non_zero(sampling.top_p),
            top_k: non_zero_u32(sampling.top_k),
            top_a: non_zero(sampling.top_a),
            typical_p: sampling.typical_p,
            tail_free_sampling: sampling.tail_free_sampling,
            repetition_penalty: sampling.repetition_penalty,
            repetition_penalty_range: sampling.repetition_penalty_range,
            repetition_penalty_slope: sampling.repetition_penalty_slope,
            repetition_penalty_frequency: sampling.repetition_penalty_frequency,
            repetition_penalty_presence: sampling.repetition_penalty_presence,
            repetition_penalty_whitelist,
            bad_words_ids,
            logit_bias_exp,
            phrase_rep_pen: sampling.phrase_repetition_penalty.clone(),
            mirostat_tau: positive(sampling.mirostat_tau),
            mirostat_lr: if sampling.mirostat_tau > 0.0 {
                Some(sampling.mirostat_lr)
            } else {
                None
            },
            top_g: positive(sampling.top_g),
            order: sampling.order.clone(),
            generate_until_sentence: generation.stop_at_sentence,
            prefix: String::new(),
            min_length: 1,
            cropped_token: None,
        }
    }
}

fn non_zero(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

fn non_zero_u32(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> (SamplingConfig, GenerationConfig) {
        (SamplingConfig::default(), GenerationConfig::default())
    }

    #[test]
    fn zero_valued_optional_samplers_are_omitted() {
        let (mut sampling, generation) = base_config();
        sampling.top_p = 0.0;
        sampling.top_a = 0.0;
        let params = GenerationParams::from_config(&sampling, &generation);
        let json = serde_json::to_value(&params).unwrap();

        assert!(json.get("top_p").is_none());
        assert!(json.get("top_a").is_none());
        // Always-present samplers serialize their zero.
        assert_eq!(json["typical_p"], 0.0);
        assert_eq!(json["tail_free_sampling"], 0.0);
    }

    #[test]
    fn non_zero_samplers_are_present() {
        let (mut sampling, generation) = base_config();
        sampling.top_p = 0.9;
        let params = GenerationParams::from_config(&sampling, &generation);
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["top_p"], 0.9);
        assert_eq!(json["top_k"], 4);
        assert_eq!(json["max_length"], 40);
        assert_eq!(json["order"], serde_json::json!([1, 0, 4]));
    }

    #[test]
    fn model_defaults_apply_when_enabled() {
        let (sampling, mut generation) = base_config();
        generation.model = "kayra-v1".into();
        generation.use_model_defaults = true;
        let params = GenerationParams::from_config(&sampling, &generation);

        assert!(params.bad_words_ids.is_some());
        assert!(params.logit_bias_exp.is_some());
        assert!(params.repetition_penalty_whitelist.is_none());
    }

    #[test]
    fn model_defaults_skipped_when_disabled() {
        let (sampling, mut generation) = base_config();
        generation.use_model_defaults = false;
        let params = GenerationParams::from_config(&sampling, &generation);

        assert!(params.bad_words_ids.is_none());
        assert!(params.logit_bias_exp.is_none());
    }

    #[test]
    fn whitelist_follows_its_own_toggle() {
        let (sampling, mut generation) = base_config();
        generation.whitelist = true;
        let params = GenerationParams::from_config(&sampling, &generation);
        assert!(params.repetition_penalty_whitelist.is_some());
    }

    #[test]
    fn mirostat_sent_only_when_tau_positive() {
        let (mut sampling, generation) = base_config();
        sampling.mirostat_lr = 0.2;
        let params = GenerationParams::from_config(&sampling, &generation);
        assert!(params.mirostat_tau.is_none());
        assert!(params.mirostat_lr.is_none());

        sampling.mirostat_tau = 4.0;
        let params = GenerationParams::from_config(&sampling, &generation);
        assert_eq!(params.mirostat_tau, Some(4.0));
        assert_eq!(params.mirostat_lr, Some(0.2));
    }

    #[test]
    fn phrase_rep_pen_omitted_when_unset() {
        let (sampling, generation) = base_config();
        let params = GenerationParams::from_config(&sampling, &generation);
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("phrase_rep_pen").is_none());
    }
}
