// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tokenizer adapter for the proseloom continuation engine.
//!
//! Wraps model-specific subword tokenizers behind a registry keyed by
//! model identifier. Each resolved [`TokenizerProfile`] fully owns its
//! vocabulary, merge rules, and special tokens; switching models is a pure
//! configuration change with no shared mutable state between profiles.

pub mod registry;

pub use registry::{TokenizerProfile, TokenizerRegistry};
