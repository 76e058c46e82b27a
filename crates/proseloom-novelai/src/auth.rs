// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access-key derivation for the login endpoint.
//!
//! The service derives its access key client-side: Argon2id over the
//! password with a BLAKE2b-128 salt of `password[..6] + email + domain`,
//! base64-encoded with URL-safe substitutions and truncated to 64
//! characters. Parameters must match the service's reference client
//! byte-for-byte or login fails.

use argon2::{Algorithm, Argon2, Params, Version};
use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proseloom_core::ProseloomError;
use secrecy::{ExposeSecret, SecretString};

/// Domain string mixed into the access-key salt.
const ACCESS_KEY_DOMAIN: &str = "novelai_data_access_key";

/// Salt length, matching libsodium's `crypto_pwhash_SALTBYTES`.
const SALT_LEN: usize = 16;

/// Argon2id memory limit in KiB (reference client uses 2,000,000 bytes).
const MEMORY_KIB: u32 = 2_000_000 / 1024;

/// Argon2id iteration count.
const ITERATIONS: u32 = 2;

/// Raw hash output length before encoding.
const HASH_LEN: usize = 64;

/// Derives the account access key from email and password.
pub fn derive_access_key(
    email: &str,
    password: &SecretString,
) -> Result<String, ProseloomError> {
    let email = email.to_lowercase();
    let password = password.expose_secret();

    let password_head: String = password.chars().take(6).collect();
    let pre_salt = format!("{password_head}{email}{ACCESS_KEY_DOMAIN}");

    let mut hasher = Blake2bVar::new(SALT_LEN)
        .map_err(|e| ProseloomError::Internal(format!("salt digest init failed: {e}")))?;
    hasher.update(pre_salt.as_bytes());
    let mut salt = [0u8; SALT_LEN];
    hasher
        .finalize_variable(&mut salt)
        .map_err(|e| ProseloomError::Internal(format!("salt digest failed: {e}")))?;

    let params = Params::new(MEMORY_KIB, ITERATIONS, 1, Some(HASH_LEN))
        .map_err(|e| ProseloomError::Internal(format!("invalid KDF parameters: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut raw = [0u8; HASH_LEN];
    argon2
        .hash_password_into(password.as_bytes(), &salt, &mut raw)
        .map_err(|e| ProseloomError::Internal(format!("key derivation failed: {e}")))?;

    let encoded: String = STANDARD.encode(raw).chars().take(64).collect();
    Ok(encoded.replace('/', "_").replace('+', "-"))
}
