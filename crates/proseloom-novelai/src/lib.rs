// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NovelAI provider for proseloom.
//!
//! Wire codec (fixed-width little-endian token packing with base64
//! framing), statically-typed sampling parameters with per-model default
//! tables, access-key derivation, and the HTTP generation client.

pub mod auth;
pub mod client;
pub mod codec;
pub mod defaults;
pub mod params;
pub mod types;

pub use auth::derive_access_key;
pub use client::GenerationClient;
pub use codec::{decode_tokens, encode_tokens};
pub use defaults::{model_defaults, LogitBias, ModelDefaults};
pub use params::GenerationParams;
