// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the proseloom continuation engine.

use thiserror::Error;

/// The primary error type used across all proseloom crates.
#[derive(Debug, Error)]
pub enum ProseloomError {
    /// Configuration errors (invalid TOML, unknown model, unknown
    /// tier/model ceiling pair). Never silently defaulted.
    #[error("configuration error: {0}")]
    Config(String),

    /// Tokenizer profile errors (missing tokenizer file, encode/decode
    /// failure inside the tokenizer library).
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Catalog or note file errors (read, write, JSON shape).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP 401 from the generation service.
    #[error("unauthorized ({status}): {message}")]
    Auth { status: u16, message: String },

    /// HTTP 402 or 429 from the generation service.
    #[error("quota exceeded ({status}): {message}")]
    Quota { status: u16, message: String },

    /// HTTP 5xx from the generation service. Transient, safe to retry.
    #[error("service unavailable ({status}): {message}")]
    ServiceUnavailable { status: u16, message: String },

    /// Success status but no `output` field in the response body.
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// Any other unexpected status from the generation service.
    #[error("unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },

    /// Transport-level failures before a status code exists (DNS, TLS,
    /// connection reset, body read).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Wire codec failures (malformed base64, truncated token buffer).
    #[error("wire codec error: {0}")]
    Codec(String),

    /// A generation is already in flight. Rejected without suspending.
    #[error("a generation is already in flight")]
    Busy,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
