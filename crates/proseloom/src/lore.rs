// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The lore command: inspect and edit the lorebook catalog.

use std::path::Path;

use proseloom_config::ProseloomConfig;
use proseloom_core::ProseloomError;
use proseloom_lore::Lorebook;

pub fn list(config: &ProseloomConfig) -> Result<(), ProseloomError> {
    let book = Lorebook::load(Path::new(&config.lorebook.path))?;
    if book.entries.is_empty() {
        println!("lorebook is empty");
        return Ok(());
    }
    for entry in &book.entries {
        let state = match (entry.on, entry.always_on) {
            (false, _) => "off",
            (true, true) => "always",
            (true, false) => "keyed",
        };
        println!(
            "{}  [{}] p{} r{}  {}  keys: {}",
            entry.id,
            state,
            entry.priority,
            entry.search_range,
            entry.title,
            entry.keys.join(", ")
        );
    }
    Ok(())
}

pub fn add(config: &ProseloomConfig, title: &str) -> Result<(), ProseloomError> {
    let path = Path::new(&config.lorebook.path);
    let mut book = Lorebook::load(path)?;
    let id = book.add_entry();
    if let Some(entry) = book.entries.iter_mut().find(|e| e.id == id) {
        entry.title = title.to_string();
    }
    book.save(path)?;
    println!("{id}");
    Ok(())
}

pub fn remove(config: &ProseloomConfig, id: &str) -> Result<(), ProseloomError> {
    let path = Path::new(&config.lorebook.path);
    let mut book = Lorebook::load(path)?;
    if !book.remove_entry(id) {
        return Err(ProseloomError::Config(format!("no lore entry with id {id}")));
    }
    book.save(path)
}
