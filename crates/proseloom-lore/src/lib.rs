// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lorebook catalog and keyed lore-activation engine.
//!
//! The catalog is an ordered collection of world-building snippets; the
//! activation engine selects which of them are in scope for a cursor
//! position by keyword or regex match against the text before it.

pub mod activation;
pub mod catalog;

pub use activation::activate;
pub use catalog::{LoreEntry, Lorebook};
