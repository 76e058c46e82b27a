// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-model default tables: banned token sequences, logit biases, and
//! repetition penalty whitelists.
//!
//! The token ids are vocabulary-specific and differ per model family.
//! Bans suppress markup and bracket artifacts; the whitelist exempts
//! common function words and punctuation from repetition penalties.

use serde::Serialize;

/// One logit bias entry sent with the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogitBias {
    pub sequence: Vec<u32>,
    pub bias: f64,
    pub ensure_sequence_finish: bool,
    pub generate_once: bool,
}

/// Default tables for one model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelDefaults {
    pub bans: Option<Vec<Vec<u32>>>,
    pub bias: Option<Vec<LogitBias>>,
    pub whitelist: Vec<u32>,
}

/// Looks up the default tables for a model id.
pub fn model_defaults(model: &str) -> Option<ModelDefaults> {
    match model {
        "clio-v1" => Some(ModelDefaults {
            bans: Some(vec![
                vec![3],
                vec![49356],
                vec![1431],
                vec![31715],
                vec![34387],
                vec![20765],
                vec![30702],
                vec![10691],
                vec![49333],
                vec![1266],
                vec![19438],
                vec![43145],
                vec![26523],
                vec![41471],
                vec![2936],
                vec![23],
                vec![49522],
                vec![3695],
                vec![16967],
                vec![8353],
                vec![24],
            ]),
            bias: None,
            whitelist: nerdstash_whitelist(),
        }),
        "kayra-v1" => Some(ModelDefaults {
            bans: Some(vec![
                vec![3],
                vec![49356],
                vec![1431],
                vec![31715],
                vec![34387],
                vec![20765],
                vec![30702],
                vec![10691],
                vec![49333],
                vec![1266],
                vec![19438],
                vec![43145],
                vec![26523],
                vec![41471],
                vec![2936],
                vec![85, 85],
                vec![49332],
                vec![7286],
                vec![1115],
            ]),
            bias: Some(vec![
                LogitBias {
                    sequence: vec![23],
                    bias: -0.08,
                    ensure_sequence_finish: false,
                    generate_once: false,
                },
                LogitBias {
                    sequence: vec![21],
                    bias: -0.08,
                    ensure_sequence_finish: false,
                    generate_once: false,
                },
            ]),
            whitelist: nerdstash_whitelist(),
        }),
        "llama-3-erato-v1" => Some(ModelDefaults {
            bans: Some(vec![
                vec![16067],
                vec![933, 11144],
                vec![25106, 11144],
                vec![58, 106901, 16073, 33710, 25, 109933],
                vec![933, 58, 11144],
                vec![128030],
                vec![58, 30591, 33503, 17663, 100204, 25, 11144],
                vec![933, 34184, 11144],
                vec![933, 34184, 23249],
                vec![120582],
                vec![34184, 3597],
            ]),
            bias: None,
            whitelist: vec![
                6, 1, 11, 13, 25, 198, 12, 9, 8, 279, 264, 459, 323, 477, 539, 912, 374, 574,
                1051, 1550, 1587, 4536, 5828, 15058, 3287, 3250, 1461, 1077, 813, 11074, 872,
                1202, 1436, 7846, 1288, 13434, 1053, 8434, 617, 9167, 1047, 19117, 706, 12775,
                649, 4250, 527, 7784, 690, 2834, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 1210,
                1359, 608, 220, 596, 956, 3077, 44886, 4265, 3358, 2351, 2846, 311, 389, 315,
                304, 520, 505, 430,
            ],
        }),
        _ => None,
    }
}

/// Whitelist shared by the nerdstash vocabulary models.
fn nerdstash_whitelist() -> Vec<u32> {
    vec![
        49256, 49264, 49231, 49230, 49287, 85, 49255, 49399, 49262, 336, 333, 432, 363, 468,
        492, 745, 401, 426, 623, 794, 1096, 2919, 2072, 7379, 1259, 2110, 620, 526, 487, 16562,
        603, 805, 761, 2681, 942, 8917, 653, 3513, 506, 5301, 562, 5010, 614, 10942, 539, 2976,
        462, 5189, 567, 2032, 123, 124, 125, 126, 127, 128, 129, 130, 131, 132, 588, 803, 1040,
        49209, 4, 5, 6, 7, 8, 9, 10, 11, 12,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_models_have_defaults() {
        for model in ["clio-v1", "kayra-v1", "llama-3-erato-v1"] {
            let defaults = model_defaults(model).unwrap();
            assert!(defaults.bans.is_some(), "{model} should carry bans");
            assert!(!defaults.whitelist.is_empty(), "{model} should carry a whitelist");
        }
    }

    #[test]
    fn only_kayra_carries_logit_bias() {
        assert!(model_defaults("clio-v1").unwrap().bias.is_none());
        assert!(model_defaults("llama-3-erato-v1").unwrap().bias.is_none());
        let bias = model_defaults("kayra-v1").unwrap().bias.unwrap();
        assert_eq!(bias.len(), 2);
        assert_eq!(bias[0].bias, -0.08);
    }

    #[test]
    fn unknown_model_has_no_defaults() {
        assert!(model_defaults("krake-v2").is_none());
    }

    #[test]
    fn nerdstash_models_share_a_whitelist() {
        assert_eq!(
            model_defaults("clio-v1").unwrap().whitelist,
            model_defaults("kayra-v1").unwrap().whitelist
        );
    }
}
