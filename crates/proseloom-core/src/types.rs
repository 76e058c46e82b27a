// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the proseloom workspace.

use serde::{Deserialize, Serialize};

/// Subscription tier of the remote generation service.
///
/// Each tier maps to a per-model token ceiling (see the ceiling table in
/// proseloom-config). Unknown tiers are rejected at config load.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    Tablet,
    Scroll,
    Opus,
}

/// Author/Title/Tags/Genre metadata rendered into the context header.
///
/// Empty fields are omitted from the rendered header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryMetadata {
    pub author: String,
    pub title: String,
    pub tags: String,
    pub genre: String,
}

impl StoryMetadata {
    /// True when every field is empty and no header should be rendered.
    pub fn is_empty(&self) -> bool {
        self.author.is_empty()
            && self.title.is_empty()
            && self.tags.is_empty()
            && self.genre.is_empty()
    }
}

/// Everything the context assembler needs for one generation call.
///
/// Ephemeral: constructed, consumed, and discarded within a single call.
#[derive(Debug, Clone)]
pub struct ContextRequest {
    /// Raw editor text before the cursor (unsanitized Markdown).
    pub story_text: String,
    /// Metadata header fields.
    pub metadata: StoryMetadata,
    /// Persistent memory, prepended before the story.
    pub memory: String,
    /// Module prefix. Non-empty reserves 40 tokens of headroom.
    pub prefix: String,
    /// Model identifier, resolved against the model profile table.
    pub model: String,
    /// Subscription tier, resolved against the ceiling table.
    pub tier: Tier,
    /// Tokens reserved for the response (the requested generation length).
    pub reserved_tokens: u32,
    /// Whether the service trims the response at a sentence boundary.
    /// Reserves 20 tokens of headroom.
    pub stop_at_sentence: bool,
    /// Activated lore contents in placement order.
    pub activated_lore: Vec<String>,
}
