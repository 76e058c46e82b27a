// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The editor surface: note loading, cursor resolution, and splicing.
//!
//! A cursor is `LINE:COL` with a 1-based line and a 0-based character
//! column; omitted, it points at the end of the note. The last insertion
//! span is recorded in a sidecar file so `retry` can unwind it.

use std::path::{Path, PathBuf};

use proseloom_core::ProseloomError;
use serde::{Deserialize, Serialize};

/// A Markdown note held in memory.
#[derive(Debug, Clone)]
pub struct Note {
    pub path: PathBuf,
    pub text: String,
}

/// Span of the most recent insertion, recorded for `retry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastInsertion {
    /// Byte offset of the insertion point.
    pub offset: usize,
    /// Byte length of the inserted text.
    pub len: usize,
}

impl Note {
    pub fn load(path: &Path) -> Result<Self, ProseloomError> {
        let text = std::fs::read_to_string(path).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn save(&self) -> Result<(), ProseloomError> {
        std::fs::write(&self.path, &self.text).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })
    }

    /// The note's file stem, used as the metadata title fallback.
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Resolves an optional `LINE:COL` cursor to a byte offset.
    pub fn cursor_offset(&self, cursor: Option<&str>) -> Result<usize, ProseloomError> {
        match cursor {
            None => Ok(self.text.len()),
            Some(arg) => {
                let (line, col) = parse_cursor(arg)?;
                offset_at(&self.text, line, col)
            }
        }
    }

    /// Inserts text at the byte offset, returning the recorded span.
    pub fn splice(&mut self, offset: usize, insertion: &str) -> LastInsertion {
        self.text.insert_str(offset, insertion);
        LastInsertion {
            offset,
            len: insertion.len(),
        }
    }

    /// Removes a previously recorded insertion span.
    pub fn unsplice(&mut self, last: LastInsertion) -> Result<(), ProseloomError> {
        if last.offset + last.len > self.text.len()
            || !self.text.is_char_boundary(last.offset)
            || !self.text.is_char_boundary(last.offset + last.len)
        {
            return Err(ProseloomError::Internal(
                "recorded insertion span no longer matches the note".to_string(),
            ));
        }
        self.text.replace_range(last.offset..last.offset + last.len, "");
        Ok(())
    }

    /// Path of the sidecar recording the last insertion.
    pub fn state_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        name.push_str(".proseloom.json");
        self.path.with_file_name(name)
    }

    pub fn save_state(&self, last: LastInsertion) -> Result<(), ProseloomError> {
        let data = serde_json::to_string(&last).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })?;
        std::fs::write(self.state_path(), data).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })
    }

    pub fn load_state(&self) -> Result<Option<LastInsertion>, ProseloomError> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })?;
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| ProseloomError::Storage {
                source: Box::new(e),
            })
    }
}

/// Parses a `LINE:COL` cursor argument.
fn parse_cursor(arg: &str) -> Result<(usize, usize), ProseloomError> {
    let (line, col) = arg.split_once(':').ok_or_else(|| {
        ProseloomError::Config(format!("invalid cursor `{arg}`, expected LINE:COL"))
    })?;
    let line: usize = line
        .parse()
        .map_err(|_| ProseloomError::Config(format!("invalid cursor line in `{arg}`")))?;
    let col: usize = col
        .parse()
        .map_err(|_| ProseloomError::Config(format!("invalid cursor column in `{arg}`")))?;
    if line == 0 {
        return Err(ProseloomError::Config(
            "cursor lines are 1-based".to_string(),
        ));
    }
    Ok((line, col))
}

/// Byte offset of (1-based line, 0-based character column) in `text`.
fn offset_at(text: &str, line: usize, col: usize) -> Result<usize, ProseloomError> {
    let mut line_start = 0usize;
    let mut current = 1usize;
    for (idx, ch) in text.char_indices() {
        if current == line {
            break;
        }
        if ch == '\n' {
            current += 1;
            line_start = idx + 1;
        }
    }
    if current != line {
        return Err(ProseloomError::Config(format!(
            "cursor line {line} is past the end of the note"
        )));
    }

    let line_text = &text[line_start..];
    let line_end = line_text.find('\n').unwrap_or(line_text.len());
    let line_text = &line_text[..line_end];

    let mut chars = 0usize;
    for (idx, _) in line_text.char_indices() {
        if chars == col {
            return Ok(line_start + idx);
        }
        chars += 1;
    }
    if col > chars {
        return Err(ProseloomError::Config(format!(
            "cursor column {col} is past the end of line {line}"
        )));
    }
    Ok(line_start + line_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(text: &str) -> Note {
        Note {
            path: PathBuf::from("/tmp/The Old Keep.md"),
            text: text.to_string(),
        }
    }

    #[test]
    fn title_is_the_file_stem() {
        assert_eq!(note("x").title(), "The Old Keep");
    }

    #[test]
    fn default_cursor_is_end_of_note() {
        let n = note("one\ntwo");
        assert_eq!(n.cursor_offset(None).unwrap(), 7);
    }

    #[test]
    fn cursor_resolves_line_and_column() {
        let n = note("one\ntwo\nthree");
        assert_eq!(n.cursor_offset(Some("1:0")).unwrap(), 0);
        assert_eq!(n.cursor_offset(Some("2:1")).unwrap(), 5);
        assert_eq!(n.cursor_offset(Some("3:5")).unwrap(), 13);
    }

    #[test]
    fn cursor_column_counts_characters() {
        let n = note("café!\nx");
        // 'é' is two bytes; column 4 lands after it, before '!'.
        assert_eq!(n.cursor_offset(Some("1:4")).unwrap(), 5);
    }

    #[test]
    fn out_of_range_cursor_is_rejected() {
        let n = note("one");
        assert!(n.cursor_offset(Some("2:0")).is_err());
        assert!(n.cursor_offset(Some("1:9")).is_err());
        assert!(n.cursor_offset(Some("0:0")).is_err());
        assert!(n.cursor_offset(Some("nonsense")).is_err());
    }

    #[test]
    fn splice_and_unsplice_round_trip() {
        let mut n = note("before after");
        let span = n.splice(6, " middle");
        assert_eq!(n.text, "before middle after");
        n.unsplice(span).unwrap();
        assert_eq!(n.text, "before after");
    }

    #[test]
    fn unsplice_rejects_stale_spans() {
        let mut n = note("short");
        let stale = LastInsertion { offset: 2, len: 40 };
        assert!(n.unsplice(stale).is_err());
        assert_eq!(n.text, "short");
    }

    #[test]
    fn state_round_trips_through_the_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        std::fs::write(&path, "text").unwrap();

        let n = Note::load(&path).unwrap();
        assert_eq!(n.load_state().unwrap(), None);

        let span = LastInsertion { offset: 4, len: 9 };
        n.save_state(span).unwrap();
        assert_eq!(n.load_state().unwrap(), Some(span));
        assert!(n.state_path().to_string_lossy().ends_with("note.md.proseloom.json"));
    }
}
