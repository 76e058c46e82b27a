// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markdown sanitizer for note text fed to the continuation model.
//!
//! Note-taking markup (tags, embeds, wiki-links) is noise for a prose
//! model, and collapsed whitespace keeps token cost proportional to
//! content rather than formatting.

use std::sync::LazyLock;

use regex::Regex;

/// Hashtag-style tags: `#word`, `#word-word`, `#word_word`.
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[A-Za-z0-9]+(?:[-_][A-Za-z0-9]+)*").unwrap());

/// Embed/transclusion markers: `![[...]]`.
static EMBED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[\[.*?\]\]").unwrap());

/// Runs of blank lines.
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Runs of spaces.
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Strips note markup and collapses whitespace.
///
/// Preserves whether the input ended with a newline: sanitized output ends
/// with exactly one trailing newline iff the input ended with one.
pub fn sanitize(text: &str) -> String {
    let ends_with_newline = text.ends_with('\n');

    let out = HASHTAG.replace_all(text, "");
    let out = EMBED.replace_all(&out, "");
    let out = out.replace("[[", "").replace("]]", "");
    let out = BLANK_LINES.replace_all(&out, "\n");
    let out = SPACES.replace_all(&out, " ");

    let mut out = out.trim().to_string();
    if ends_with_newline {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_hashtag_tags() {
        assert_eq!(sanitize("a #tag b"), "a b");
        assert_eq!(sanitize("a #multi-word-tag b"), "a b");
        assert_eq!(sanitize("a #snake_case b"), "a b");
    }

    #[test]
    fn strips_embeds_entirely() {
        assert_eq!(sanitize("before ![[image.png]] after"), "before after");
    }

    #[test]
    fn keeps_wiki_link_text() {
        assert_eq!(sanitize("see [[The Old Keep]] there"), "see The Old Keep there");
    }

    #[test]
    fn collapses_blank_lines_and_spaces() {
        assert_eq!(sanitize("a\n\n\nb"), "a\nb");
        assert_eq!(sanitize("a    b"), "a b");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize("  a b  "), "a b");
    }

    #[test]
    fn preserves_trailing_newline_state() {
        assert_eq!(sanitize("a b\n"), "a b\n");
        assert_eq!(sanitize("a b\n\n"), "a b\n");
        assert_eq!(sanitize("a b"), "a b");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn mixed_markup_document() {
        let input = "# heading is kept as text\n\nThe [[keep]] stood.  ![[map.png]]\n#todo\n";
        // "# " is not a tag (no alnum run), but "#todo" is.
        let expected = "# heading is kept as text\nThe keep stood.\n";
        assert_eq!(sanitize(input), expected);
    }

    /// Fragments of realistic note markup for the idempotence property.
    fn note_fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z]{1,8}",
            Just("#tag".to_string()),
            Just("#multi-word".to_string()),
            Just("![[embed.png]]".to_string()),
            Just("[[wiki link]]".to_string()),
            Just(" ".to_string()),
            Just("  ".to_string()),
            Just("\n".to_string()),
            Just("\n\n".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(parts in proptest::collection::vec(note_fragment(), 0..24)) {
            let input = parts.concat();
            let once = sanitize(&input);
            let twice = sanitize(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
