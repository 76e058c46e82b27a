// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyed lore-activation engine.
//!
//! Decides which catalog entries are in scope for a cursor position:
//! enabled entries are sorted by priority and activate when a key matches
//! inside the entry's search window (the last `search_range` characters
//! before the cursor), or unconditionally for always-on entries.

use regex::RegexBuilder;
use tracing::warn;

use crate::catalog::LoreEntry;

/// Selects and orders the lore contents active for the given cursor text.
///
/// Returns the `content` of each activated entry, ordered by ascending
/// priority with catalog order breaking ties.
pub fn activate(catalog: &[LoreEntry], text_before_cursor: &str) -> Vec<String> {
    let mut enabled: Vec<&LoreEntry> = catalog.iter().filter(|e| e.on).collect();
    enabled.sort_by_key(|e| e.priority);

    let mut activated = Vec::new();
    for entry in enabled {
        let window = search_window(text_before_cursor, entry.search_range);
        let found = entry.always_on || entry.keys.iter().any(|key| matches_key(window, key));
        if found {
            activated.push(entry.content.clone());
        }
    }
    activated
}

/// The last `range` characters of `text`, or all of it when shorter.
/// Non-positive ranges yield an empty window.
fn search_window(text: &str, range: i64) -> &str {
    if range <= 0 {
        return "";
    }
    let range = range as usize;
    let count = text.chars().count();
    if count <= range {
        return text;
    }
    let (idx, _) = text
        .char_indices()
        .nth(count - range)
        .unwrap_or((text.len(), '\0'));
    &text[idx..]
}

/// Tests a single key against the search window.
///
/// Keys in `/pattern/flags` form are regexes; everything else is a
/// case-insensitive literal substring.
fn matches_key(window: &str, key: &str) -> bool {
    match parse_regex_key(key) {
        Some((pattern, flags)) => {
            let mut builder = RegexBuilder::new(pattern);
            for flag in flags.chars() {
                match flag {
                    'i' => {
                        builder.case_insensitive(true);
                    }
                    'm' => {
                        builder.multi_line(true);
                    }
                    's' => {
                        builder.dot_matches_new_line(true);
                    }
                    // g, y, u carry no meaning here.
                    _ => {}
                }
            }
            match builder.build() {
                Ok(re) => re.is_match(window),
                Err(e) => {
                    warn!(key, error = %e, "unparseable regex lore key, treating as no match");
                    false
                }
            }
        }
        None => window.to_lowercase().contains(&key.to_lowercase()),
    }
}

/// Splits a `/pattern/flags` key into pattern and flags.
///
/// Returns `None` for keys that are not in regex form, including keys with
/// unknown trailing flag letters, which fall back to literal matching.
fn parse_regex_key(key: &str) -> Option<(&str, &str)> {
    if !key.starts_with('/') || key.len() < 2 {
        return None;
    }
    let last_slash = key.rfind('/')?;
    if last_slash == 0 {
        return None;
    }
    let flags = &key[last_slash + 1..];
    if !flags.chars().all(|c| matches!(c, 'g' | 'm' | 'i' | 'y' | 'u' | 's')) {
        return None;
    }
    Some((&key[1..last_slash], flags))
}
