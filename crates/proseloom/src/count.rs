// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The count command: word and token counts for a note.

use std::path::Path;

use proseloom_config::ProseloomConfig;
use proseloom_core::ProseloomError;
use proseloom_tokenizer::TokenizerRegistry;

use crate::note::Note;
use crate::tokenizer_dir;

pub fn run(config: &ProseloomConfig, note_path: &Path) -> Result<(), ProseloomError> {
    let note = Note::load(note_path)?;
    let (words, tokens) = counts(config, &note.text)?;
    println!("Words: {words} | Tokens: {tokens}");
    Ok(())
}

fn counts(config: &ProseloomConfig, text: &str) -> Result<(usize, usize), ProseloomError> {
    let words = text.split_whitespace().count();
    let registry = TokenizerRegistry::new(tokenizer_dir(config));
    let tokens = registry
        .resolve(&config.generation.model)?
        .encode(text)?
        .len();
    Ok((words, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn counts_words_and_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let mut vocab = serde_json::Map::new();
        vocab.insert("[UNK]".to_string(), serde_json::json!(0));
        vocab.insert("one".to_string(), serde_json::json!(1));
        let tokenizer = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": {"type": "Whitespace"},
            "post_processor": null,
            "decoder": null,
            "model": {"type": "WordLevel", "vocab": vocab, "unk_token": "[UNK]"}
        });
        fs::write(
            dir.path().join("nerdstash_tokenizer_v2.json"),
            serde_json::to_vec(&tokenizer).unwrap(),
        )
        .unwrap();

        let mut config = ProseloomConfig::default();
        config.tokenizer.dir = dir.path().to_string_lossy().into_owned();

        let (words, tokens) = counts(&config, "one two three").unwrap();
        assert_eq!(words, 3);
        assert_eq!(tokens, 3);

        let (words, tokens) = counts(&config, "").unwrap();
        assert_eq!(words, 0);
        assert_eq!(tokens, 0);
    }
}
