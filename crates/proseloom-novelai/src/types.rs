// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire request/response types for the generation and login endpoints.

use serde::{Deserialize, Serialize};

use crate::params::GenerationParams;

/// Body of a generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Base64-packed context tokens.
    pub input: String,
    pub parameters: GenerationParams,
    pub model: String,
}

/// Body of a generation response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    /// Base64-packed generated tokens. Absence on a success status is an
    /// empty-result failure, not an empty string.
    #[serde(default)]
    pub output: Option<String>,
}

/// Error body shape returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a login request.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    /// Derived access key (see [`crate::auth::derive_access_key`]).
    pub key: String,
}

/// Body of a login response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
}
