// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote generation service.
//!
//! Builds the generation request around the packed context, maps response
//! statuses onto the error taxonomy, and decodes the returned token buffer
//! back into text. Each model family has its own endpoint and expected
//! success status.

use std::time::Duration;

use proseloom_core::{ModelProfile, ProseloomError};
use proseloom_tokenizer::TokenizerProfile;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::SecretString;
use tracing::debug;

use crate::auth;
use crate::codec::{decode_tokens, encode_tokens};
use crate::params::GenerationParams;
use crate::types::{
    ApiErrorResponse, GenerationRequest, GenerationResponse, LoginRequest, LoginResponse,
};

/// Login endpoint (account API, shared by all models).
const LOGIN_URL: &str = "https://api.novelai.net/user/login";

/// Prefix sentinel for instruct mode.
const INSTRUCT_PREFIX: &str = "special_instruct";

/// Prefix sentinel when no module prefix is configured.
const VANILLA_PREFIX: &str = "vanilla";

/// HTTP client for generation and login.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    endpoint_override: String,
    login_url: String,
}

impl GenerationClient {
    /// Creates a client. A non-empty `endpoint_override` replaces the
    /// per-model generation endpoint.
    pub fn new(endpoint_override: String) -> Result<Self, ProseloomError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| ProseloomError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint_override,
            login_url: LOGIN_URL.to_string(),
        })
    }

    /// Overrides the login URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_login_url(mut self, url: String) -> Self {
        self.login_url = url;
        self
    }

    /// Sends one generation request and returns the decoded continuation.
    ///
    /// The final context token is discarded and the one before it travels
    /// separately as `cropped_token`; the first generated token is dropped
    /// before decoding. Both are protocol requirements of the service.
    pub async fn generate(
        &self,
        context: Vec<u32>,
        mut params: GenerationParams,
        api_key: &str,
        tokenizer: &TokenizerProfile,
        prefix: &str,
        instruct_mode: bool,
    ) -> Result<String, ProseloomError> {
        let profile = ModelProfile::for_model(tokenizer.model())?;
        let endpoint = if self.endpoint_override.is_empty() {
            profile.endpoint
        } else {
            self.endpoint_override.as_str()
        };

        let (context, cropped) = crop_tail(context);
        let input = encode_tokens(&context, profile.width);

        params.prefix = if instruct_mode {
            INSTRUCT_PREFIX.to_string()
        } else if prefix.is_empty() {
            VANILLA_PREFIX.to_string()
        } else {
            prefix.to_string()
        };
        params.min_length = 1;
        params.cropped_token = cropped;

        let request = GenerationRequest {
            input,
            parameters: params,
            model: profile.id.to_string(),
        };

        debug!(model = profile.id, endpoint, "sending generation request");
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProseloomError::Transport {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status().as_u16();
        debug!(status, expected = profile.success_status, "generation response received");
        if status != profile.success_status {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        let body = response.text().await.map_err(|e| ProseloomError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let parsed: GenerationResponse =
            serde_json::from_str(&body).map_err(|e| ProseloomError::Unexpected {
                status,
                message: format!("failed to parse response: {e}"),
            })?;

        let Some(output) = parsed.output else {
            return Err(ProseloomError::EmptyResult(
                "no output received from the generation service".to_string(),
            ));
        };

        let ids = decode_tokens(&output, profile.width)?;
        let ids = strip_first(ids);
        tokenizer.decode(&ids)
    }

    /// Logs in with email and password, returning the access token.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<String, ProseloomError> {
        let key = auth::derive_access_key(email, password)?;

        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest { key })
            .send()
            .await
            .map_err(|e| ProseloomError::Transport {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), &body));
        }

        let parsed: LoginResponse =
            response.json().await.map_err(|e| ProseloomError::Transport {
                message: format!("failed to read login response: {e}"),
                source: Some(Box::new(e)),
            })?;
        parsed.access_token.ok_or_else(|| {
            ProseloomError::EmptyResult("no access token in login response".to_string())
        })
    }
}

/// Discards the final context token and extracts the one before it.
fn crop_tail(mut context: Vec<u32>) -> (Vec<u32>, Option<u32>) {
    context.pop();
    let cropped = context.pop();
    (context, cropped)
}

/// Drops the first generated token.
fn strip_first(mut ids: Vec<u32>) -> Vec<u32> {
    if !ids.is_empty() {
        ids.remove(0);
    }
    ids
}

/// Maps a non-success status onto the error taxonomy, preferring the
/// service's own message when the body carries one.
fn map_status_error(status: u16, body: &str) -> ProseloomError {
    let detail = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|e| e.message);

    match status {
        401 => ProseloomError::Auth {
            status,
            message: detail
                .unwrap_or_else(|| "invalid API key or unauthorized access".to_string()),
        },
        402 => ProseloomError::Quota {
            status,
            message: detail
                .unwrap_or_else(|| "payment required - check your subscription".to_string()),
        },
        429 => ProseloomError::Quota {
            status,
            message: detail
                .unwrap_or_else(|| "too many requests - please wait before trying again".to_string()),
        },
        500..=599 => ProseloomError::ServiceUnavailable {
            status,
            message: detail
                .unwrap_or_else(|| "service error - please try again later".to_string()),
        },
        _ => ProseloomError::Unexpected {
            status,
            message: detail.unwrap_or_else(|| "unexpected error occurred".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proseloom_config::{GenerationConfig, SamplingConfig};
    use proseloom_core::TokenWidth;
    use proseloom_tokenizer::TokenizerRegistry;
    use std::fs;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn write_tokenizer(dir: &std::path::Path, file: &str, words: &[&str]) {
        let mut vocab = serde_json::Map::new();
        vocab.insert("[UNK]".to_string(), serde_json::json!(0));
        for (i, word) in words.iter().enumerate() {
            vocab.insert((*word).to_string(), serde_json::json!(i as u32 + 1));
        }
        let tokenizer = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": {"type": "Whitespace"},
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });
        fs::write(dir.join(file), serde_json::to_vec(&tokenizer).unwrap()).unwrap();
    }

    fn fixture(model: &str) -> (tempfile::TempDir, TokenizerProfile) {
        let dir = tempfile::tempdir().unwrap();
        write_tokenizer(dir.path(), "nerdstash_tokenizer.json", &["alpha", "beta", "gamma"]);
        write_tokenizer(
            dir.path(),
            "nerdstash_tokenizer_v2.json",
            &["alpha", "beta", "gamma"],
        );
        let registry = TokenizerRegistry::new(dir.path());
        let profile = registry.resolve(model).unwrap();
        (dir, profile)
    }

    fn test_params() -> GenerationParams {
        GenerationParams::from_config(&SamplingConfig::default(), &GenerationConfig::default())
    }

    /// Response carrying one sentinel token followed by "gamma".
    fn output_body(width: TokenWidth) -> serde_json::Value {
        serde_json::json!({ "output": encode_tokens(&[0, 3], width) })
    }

    #[tokio::test]
    async fn generate_decodes_output_and_crops_protocol_tokens() {
        let server = MockServer::start().await;
        let (_dir, tokenizer) = fixture("kayra-v1");

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "kayra-v1",
                "input": encode_tokens(&[1], TokenWidth::Sixteen),
                "parameters": {
                    "prefix": "vanilla",
                    "min_length": 1,
                    "cropped_token": 2
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(output_body(TokenWidth::Sixteen)))
            .mount(&server)
            .await;

        let client = GenerationClient::new(server.uri()).unwrap();
        let text = client
            .generate(vec![1, 2, 3], test_params(), "test-key", &tokenizer, "", false)
            .await
            .unwrap();
        assert_eq!(text, "gamma");
    }

    #[tokio::test]
    async fn instruct_mode_sends_the_instruct_sentinel() {
        let server = MockServer::start().await;
        let (_dir, tokenizer) = fixture("kayra-v1");

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "parameters": {"prefix": "special_instruct"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(output_body(TokenWidth::Sixteen)))
            .mount(&server)
            .await;

        let client = GenerationClient::new(server.uri()).unwrap();
        // Instruct mode wins even when a custom prefix is configured.
        let result = client
            .generate(vec![1, 2, 3], test_params(), "k", &tokenizer, "theme_dark", true)
            .await;
        assert!(result.is_ok(), "got: {result:?}");
    }

    #[tokio::test]
    async fn custom_prefix_is_passed_through() {
        let server = MockServer::start().await;
        let (_dir, tokenizer) = fixture("kayra-v1");

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "parameters": {"prefix": "theme_dark"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(output_body(TokenWidth::Sixteen)))
            .mount(&server)
            .await;

        let client = GenerationClient::new(server.uri()).unwrap();
        let result = client
            .generate(vec![1, 2, 3], test_params(), "k", &tokenizer, "theme_dark", false)
            .await;
        assert!(result.is_ok(), "got: {result:?}");
    }

    #[tokio::test]
    async fn clio_expects_201() {
        let server = MockServer::start().await;
        let (_dir, tokenizer) = fixture("clio-v1");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(output_body(TokenWidth::Sixteen)))
            .mount(&server)
            .await;

        let client = GenerationClient::new(server.uri()).unwrap();
        let text = client
            .generate(vec![1, 2, 3], test_params(), "k", &tokenizer, "", false)
            .await
            .unwrap();
        assert_eq!(text, "gamma");
    }

    #[tokio::test]
    async fn status_mismatch_is_unexpected_even_when_2xx() {
        let server = MockServer::start().await;
        let (_dir, tokenizer) = fixture("clio-v1");

        // Clio's API family signals success with 201; a 200 is off-contract.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(output_body(TokenWidth::Sixteen)))
            .mount(&server)
            .await;

        let client = GenerationClient::new(server.uri()).unwrap();
        let err = client
            .generate(vec![1, 2, 3], test_params(), "k", &tokenizer, "", false)
            .await
            .unwrap_err();
        assert!(matches!(err, ProseloomError::Unexpected { status: 200, .. }));
    }

    #[tokio::test]
    async fn http_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        let (_dir, tokenizer) = fixture("kayra-v1");

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Invalid token"})),
            )
            .mount(&server)
            .await;

        let client = GenerationClient::new(server.uri()).unwrap();
        let err = client
            .generate(vec![1, 2, 3], test_params(), "bad-key", &tokenizer, "", false)
            .await
            .unwrap_err();
        match err {
            ProseloomError::Auth { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("Invalid token"));
            }
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_402_and_429_map_to_quota_errors() {
        for status in [402u16, 429] {
            let server = MockServer::start().await;
            let (_dir, tokenizer) = fixture("kayra-v1");

            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let client = GenerationClient::new(server.uri()).unwrap();
            let err = client
                .generate(vec![1, 2, 3], test_params(), "k", &tokenizer, "", false)
                .await
                .unwrap_err();
            assert!(
                matches!(err, ProseloomError::Quota { .. }),
                "status {status} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn http_5xx_maps_to_service_unavailable() {
        let server = MockServer::start().await;
        let (_dir, tokenizer) = fixture("kayra-v1");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = GenerationClient::new(server.uri()).unwrap();
        let err = client
            .generate(vec![1, 2, 3], test_params(), "k", &tokenizer, "", false)
            .await
            .unwrap_err();
        assert!(matches!(err, ProseloomError::ServiceUnavailable { status: 503, .. }));
    }

    #[tokio::test]
    async fn missing_output_on_success_is_empty_result() {
        let server = MockServer::start().await;
        let (_dir, tokenizer) = fixture("kayra-v1");

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = GenerationClient::new(server.uri()).unwrap();
        let err = client
            .generate(vec![1, 2, 3], test_params(), "k", &tokenizer, "", false)
            .await
            .unwrap_err();
        assert!(matches!(err, ProseloomError::EmptyResult(_)));
    }

    #[tokio::test]
    async fn login_returns_access_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/user/login"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"accessToken": "pst-abc"})),
            )
            .mount(&server)
            .await;

        let client = GenerationClient::new(String::new())
            .unwrap()
            .with_login_url(format!("{}/user/login", server.uri()));
        let password = SecretString::from("hunter2!");
        let token = client.login("writer@example.com", &password).await.unwrap();
        assert_eq!(token, "pst-abc");
    }

    #[tokio::test]
    async fn login_maps_401_to_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = GenerationClient::new(String::new())
            .unwrap()
            .with_login_url(server.uri());
        let password = SecretString::from("wrong");
        let err = client
            .login("writer@example.com", &password)
            .await
            .unwrap_err();
        assert!(matches!(err, ProseloomError::Auth { .. }));
    }

    #[test]
    fn crop_tail_discards_last_and_extracts_previous() {
        assert_eq!(crop_tail(vec![1, 2, 3]), (vec![1], Some(2)));
        assert_eq!(crop_tail(vec![7]), (vec![], None));
        assert_eq!(crop_tail(vec![]), (vec![], None));
    }

    #[test]
    fn strip_first_drops_the_leading_token() {
        assert_eq!(strip_first(vec![9, 1, 2]), vec![1, 2]);
        assert_eq!(strip_first(vec![]), Vec::<u32>::new());
    }
}
