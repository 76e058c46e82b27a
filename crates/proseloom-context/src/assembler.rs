// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token-budget context assembler.
//!
//! Packs metadata header, memory, activated lore, and story text into one
//! token sequence bounded by the (tier, model) ceiling. Story text is
//! truncated from the front: generation continues forward from the cursor,
//! so the text nearest it is worth the most per token.

use proseloom_config::{token_ceiling, ContextConfig};
use proseloom_core::{ContextRequest, ProseloomError, StoryMetadata};
use proseloom_tokenizer::TokenizerRegistry;
use tracing::debug;

use crate::markdown::sanitize;

/// Headroom reserved when a module prefix is in play.
const PREFIX_RESERVE: u32 = 40;

/// Headroom reserved when the service trims at a sentence boundary.
const SENTENCE_RESERVE: u32 = 20;

/// Result of context assembly.
#[derive(Debug)]
pub struct AssembledContext {
    /// The packed token sequence, ready for the wire codec.
    pub tokens: Vec<u32>,
    /// Story tokens admitted after truncation.
    pub story_tokens: usize,
    /// Activated lore entries dropped by the admission budget.
    pub dropped_lore: usize,
}

/// The context assembler, resolving tokenizer profiles and ceilings per call.
#[derive(Debug)]
pub struct ContextAssembler<'a> {
    registry: &'a TokenizerRegistry,
    config: &'a ContextConfig,
}

impl<'a> ContextAssembler<'a> {
    pub fn new(registry: &'a TokenizerRegistry, config: &'a ContextConfig) -> Self {
        Self { registry, config }
    }

    /// Assembles the bounded context for one generation call.
    ///
    /// Segment order is fixed: metadata header, memory, lore, story.
    pub fn build(&self, request: &ContextRequest) -> Result<AssembledContext, ProseloomError> {
        let profile = self.registry.resolve(&request.model)?;
        let ceiling = token_ceiling(self.config, request.tier, &request.model)?;

        let prefix_reserve = if request.prefix.is_empty() {
            0
        } else {
            PREFIX_RESERVE
        };
        let sentence_reserve = if request.stop_at_sentence {
            SENTENCE_RESERVE
        } else {
            0
        };

        let memory_tokens = if request.memory.is_empty() {
            Vec::new()
        } else {
            profile.encode(&format!("{}\n", request.memory))?
        };

        let header = render_header(&request.metadata);
        let header_tokens = if header.is_empty() {
            Vec::new()
        } else {
            profile.encode(&header)?
        };

        // Lore admission: hold back a fixed margin of the ceiling for story
        // content and admit entries in placement order while they fit.
        // Admitted entries are never evicted for later ones.
        let lore_budget = ceiling.saturating_sub(self.config.lore_margin) as usize;
        let mut admitted: Vec<&str> = Vec::new();
        let mut running = 0usize;
        let mut dropped = 0usize;
        for entry in &request.activated_lore {
            let len = profile.encode(entry)?.len();
            if running + len < lore_budget {
                admitted.push(entry.as_str());
                running += len;
            } else {
                dropped += 1;
            }
        }
        let lore_tokens = if admitted.is_empty() {
            Vec::new()
        } else {
            profile.encode(&format!("{}\n", admitted.join("\n")))?
        };

        let fixed_cost = request.reserved_tokens as usize
            + prefix_reserve as usize
            + sentence_reserve as usize
            + memory_tokens.len()
            + header_tokens.len()
            + lore_tokens.len();
        let max_story = (ceiling as usize).saturating_sub(fixed_cost);

        let story_ids = profile.encode(&sanitize(&request.story_text))?;
        let start = story_ids.len().saturating_sub(max_story);
        let story_tail = &story_ids[start..];

        debug!(
            model = %request.model,
            tier = %request.tier,
            ceiling,
            header_len = header_tokens.len(),
            memory_len = memory_tokens.len(),
            lore_len = lore_tokens.len(),
            dropped_lore = dropped,
            story_len = story_tail.len(),
            story_truncated = start,
            "context assembled"
        );

        let mut tokens =
            Vec::with_capacity(header_tokens.len() + memory_tokens.len() + lore_tokens.len() + story_tail.len());
        tokens.extend_from_slice(&header_tokens);
        tokens.extend_from_slice(&memory_tokens);
        tokens.extend_from_slice(&lore_tokens);
        tokens.extend_from_slice(story_tail);

        Ok(AssembledContext {
            tokens,
            story_tokens: story_tail.len(),
            dropped_lore: dropped,
        })
    }
}

/// Renders the metadata header line, omitting empty fields.
///
/// All-empty metadata renders no header at all.
fn render_header(metadata: &StoryMetadata) -> String {
    if metadata.is_empty() {
        return String::new();
    }

    let mut fields = Vec::new();
    if !metadata.author.is_empty() {
        fields.push(format!("Author: {}", metadata.author));
    }
    if !metadata.title.is_empty() {
        fields.push(format!("Title: {}", metadata.title));
    }
    if !metadata.tags.is_empty() {
        fields.push(format!("Tags: {}", metadata.tags));
    }
    if !metadata.genre.is_empty() {
        fields.push(format!("Genre: {}", metadata.genre));
    }
    format!("[ {} ]\n", fields.join("; "))
}
