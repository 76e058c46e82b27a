// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tokenizer profile registry keyed by model identifier.
//!
//! Each model resolves to its own tokenizer definition file; resolved
//! profiles are cached and handed out as owned handles, so a profile is
//! bound to one request's lifetime and profile switches can never leak
//! vocabulary state between calls.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use proseloom_core::{ModelProfile, ProseloomError, TokenWidth};
use tokenizers::Tokenizer;
use tracing::debug;

/// A resolved tokenizer profile for one model.
///
/// Owns a shared handle to the loaded tokenizer; encode/decode are pure
/// computation with no registry access.
#[derive(Clone)]
pub struct TokenizerProfile {
    model: String,
    width: TokenWidth,
    tokenizer: Arc<Tokenizer>,
}

impl TokenizerProfile {
    /// Model id this profile was resolved for.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Wire token width for this model family.
    pub fn width(&self) -> TokenWidth {
        self.width
    }

    /// Encodes text into token ids.
    ///
    /// No special tokens are inserted; characters outside the vocabulary
    /// fall back to the tokenizer's own unknown-token handling.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>, ProseloomError> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| ProseloomError::Tokenizer(format!("encode failed: {e}")))?;
        Ok(encoding.get_ids().to_vec())
    }

    /// Decodes token ids back into text.
    pub fn decode(&self, ids: &[u32]) -> Result<String, ProseloomError> {
        self.tokenizer
            .decode(ids, false)
            .map_err(|e| ProseloomError::Tokenizer(format!("decode failed: {e}")))
    }
}

impl std::fmt::Debug for TokenizerProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenizerProfile")
            .field("model", &self.model)
            .field("width", &self.width)
            .finish()
    }
}

/// Registry of tokenizer profiles, loaded lazily from a directory of
/// tokenizer definition files.
pub struct TokenizerRegistry {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Arc<Tokenizer>>>,
}

impl TokenizerRegistry {
    /// Creates a registry rooted at the given tokenizer directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves the tokenizer profile for a model id, loading the
    /// definition file on first use.
    pub fn resolve(&self, model: &str) -> Result<TokenizerProfile, ProseloomError> {
        let profile = ModelProfile::for_model(model)?;

        if let Some(tokenizer) = self
            .cache
            .read()
            .map_err(|e| ProseloomError::Internal(format!("tokenizer cache poisoned: {e}")))?
            .get(profile.id)
        {
            return Ok(TokenizerProfile {
                model: profile.id.to_string(),
                width: profile.width,
                tokenizer: Arc::clone(tokenizer),
            });
        }

        let path = self.dir.join(profile.tokenizer_file);
        debug!(model = profile.id, path = %path.display(), "loading tokenizer profile");
        let tokenizer = Tokenizer::from_file(&path).map_err(|e| {
            ProseloomError::Tokenizer(format!(
                "failed to load tokenizer for {} from {}: {e}",
                profile.id,
                path.display()
            ))
        })?;
        let tokenizer = Arc::new(tokenizer);

        self.cache
            .write()
            .map_err(|e| ProseloomError::Internal(format!("tokenizer cache poisoned: {e}")))?
            .insert(profile.id.to_string(), Arc::clone(&tokenizer));

        Ok(TokenizerProfile {
            model: profile.id.to_string(),
            width: profile.width,
            tokenizer,
        })
    }
}

impl std::fmt::Debug for TokenizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenizerRegistry")
            .field("dir", &self.dir)
            .finish()
    }
}
