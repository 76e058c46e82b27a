// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire codec: fixed-width little-endian token packing with base64 framing.
//!
//! Legacy tokenizers use 16-bit ids, large-vocabulary tokenizers 32-bit;
//! the width comes from the model profile. Round-trip holds for any ids
//! that fit the chosen width.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proseloom_core::{ProseloomError, TokenWidth};

/// Packs token ids into a base64 string of little-endian fixed-width bytes.
///
/// Ids wider than the packing width are masked to its low bits.
pub fn encode_tokens(ids: &[u32], width: TokenWidth) -> String {
    let mut buf = Vec::with_capacity(ids.len() * width.bytes());
    for &id in ids {
        match width {
            TokenWidth::Sixteen => buf.extend_from_slice(&(id as u16).to_le_bytes()),
            TokenWidth::ThirtyTwo => buf.extend_from_slice(&id.to_le_bytes()),
        }
    }
    STANDARD.encode(buf)
}

/// Unpacks a base64 string of little-endian fixed-width bytes into token ids.
pub fn decode_tokens(encoded: &str, width: TokenWidth) -> Result<Vec<u32>, ProseloomError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| ProseloomError::Codec(format!("invalid base64 token buffer: {e}")))?;

    let step = width.bytes();
    if bytes.len() % step != 0 {
        return Err(ProseloomError::Codec(format!(
            "token buffer length {} is not a multiple of {step}",
            bytes.len()
        )));
    }

    let ids = bytes
        .chunks_exact(step)
        .map(|chunk| match width {
            TokenWidth::Sixteen => u32::from(u16::from_le_bytes([chunk[0], chunk[1]])),
            TokenWidth::ThirtyTwo => {
                u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
            }
        })
        .collect();
    Ok(ids)
}
