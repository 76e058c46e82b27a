// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generate and retry commands: the full continuation pipeline.
//!
//! Insertion happens only after a fully successful round trip; any
//! failure leaves the note untouched and the gate open.

use std::path::Path;

use proseloom_config::{preset, ProseloomConfig};
use proseloom_context::ContextAssembler;
use proseloom_core::{ContextRequest, ProseloomError, StoryMetadata};
use proseloom_lore::{activate, Lorebook};
use proseloom_novelai::{GenerationClient, GenerationParams};
use proseloom_tokenizer::TokenizerRegistry;
use tracing::{debug, info};

use crate::gate::GenerationGate;
use crate::note::Note;
use crate::tokenizer_dir;

/// Options collected from the command line.
#[derive(Debug)]
pub struct GenerateOptions<'a> {
    pub note: &'a Path,
    pub cursor: Option<&'a str>,
    pub instruct: bool,
    pub preset: Option<&'a str>,
    /// Unwind the previous insertion and regenerate from its cursor.
    pub retry: bool,
}

pub async fn run(
    config: &ProseloomConfig,
    gate: &GenerationGate,
    opts: GenerateOptions<'_>,
) -> Result<(), ProseloomError> {
    let _permit = gate.try_begin()?;

    let api_key = config.account.api_key.clone().ok_or_else(|| {
        ProseloomError::Config("account.api_key is not set; run `proseloom login`".to_string())
    })?;

    let mut note = Note::load(opts.note)?;
    let cursor = if opts.retry {
        let last = note.load_state()?.ok_or_else(|| {
            ProseloomError::Config("nothing to retry for this note".to_string())
        })?;
        note.unsplice(last)?;
        last.offset
    } else {
        note.cursor_offset(opts.cursor)?
    };
    let before_cursor = note.text[..cursor].to_string();

    let lorebook = Lorebook::load(Path::new(&config.lorebook.path))?;
    let activated = activate(&lorebook.entries, &before_cursor);
    debug!(
        catalog = lorebook.entries.len(),
        activated = activated.len(),
        "lore activation"
    );

    let metadata = StoryMetadata {
        author: config.story.author.clone(),
        title: if config.story.title.is_empty() {
            note.title()
        } else {
            config.story.title.clone()
        },
        tags: config.story.tags.clone(),
        genre: config.story.genre.clone(),
    };

    let registry = TokenizerRegistry::new(tokenizer_dir(config));
    let request = ContextRequest {
        story_text: before_cursor,
        metadata,
        memory: config.story.memory.clone(),
        prefix: config.generation.prefix.clone(),
        model: config.generation.model.clone(),
        tier: config.generation.tier,
        reserved_tokens: config.generation.max_length,
        stop_at_sentence: config.generation.stop_at_sentence,
        activated_lore: activated,
    };
    let assembler = ContextAssembler::new(&registry, &config.context);
    let assembled = assembler.build(&request)?;

    let sampling = match selected_preset(config, opts.preset) {
        Some(name) => preset(name)?,
        None => config.sampling.clone(),
    };
    let params = GenerationParams::from_config(&sampling, &config.generation);

    let tokenizer = registry.resolve(&config.generation.model)?;
    let client = GenerationClient::new(config.account.endpoint_override.clone())?;
    let generated = client
        .generate(
            assembled.tokens,
            params,
            &api_key,
            &tokenizer,
            &config.generation.prefix,
            opts.instruct,
        )
        .await?;

    let span = note.splice(cursor, &generated);
    note.save()?;
    note.save_state(span)?;

    info!(
        chars = generated.len(),
        cursor_before = cursor,
        cursor_after = cursor + generated.len(),
        "continuation inserted"
    );
    println!("{generated}");
    Ok(())
}

/// Preset name in effect: the CLI flag wins over config, empty means none.
fn selected_preset<'a>(config: &'a ProseloomConfig, flag: Option<&'a str>) -> Option<&'a str> {
    flag.map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            let name = config.generation.preset.trim();
            (!name.is_empty()).then_some(name)
        })
}
