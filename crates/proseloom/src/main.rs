// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proseloom - AI-assisted prose continuation for Markdown notes.
//!
//! This is the binary entry point: command dispatch, the generation gate,
//! and the editor surface over note files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod count;
mod gate;
mod generate;
mod login;
mod lore;
mod note;

use gate::GenerationGate;
use proseloom_config::ProseloomConfig;

/// Proseloom - AI-assisted prose continuation for Markdown notes.
#[derive(Parser, Debug)]
#[command(name = "proseloom", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Continue the note at the cursor.
    Generate {
        /// Markdown note to continue.
        note: PathBuf,
        /// Cursor as LINE:COL (1-based line, 0-based column). Defaults to
        /// the end of the note.
        #[arg(long)]
        cursor: Option<String>,
        /// Request instruction-following output.
        #[arg(long)]
        instruct: bool,
        /// Sampling preset name, overriding the config.
        #[arg(long)]
        preset: Option<String>,
    },
    /// Discard the previous insertion and regenerate from its cursor.
    Retry {
        /// Markdown note to retry.
        note: PathBuf,
        /// Request instruction-following output.
        #[arg(long)]
        instruct: bool,
        /// Sampling preset name, overriding the config.
        #[arg(long)]
        preset: Option<String>,
    },
    /// Show word and token counts for a note.
    Count {
        /// Markdown note to count.
        note: PathBuf,
    },
    /// Log in and print an access token.
    Login {
        /// Account email. Defaults to account.email from the config.
        #[arg(long)]
        email: Option<String>,
    },
    /// Inspect and edit the lorebook catalog.
    Lore {
        #[command(subcommand)]
        action: LoreAction,
    },
}

#[derive(Subcommand, Debug)]
enum LoreAction {
    /// List catalog entries.
    List,
    /// Append a new entry with defaults and print its id.
    Add {
        /// Entry title.
        title: String,
    },
    /// Remove an entry by id.
    Remove {
        /// Entry id.
        id: String,
    },
}

/// Directory holding the tokenizer definition files.
pub(crate) fn tokenizer_dir(config: &ProseloomConfig) -> PathBuf {
    if config.tokenizer.dir.is_empty() {
        dirs::config_dir()
            .map(|d| d.join("proseloom/tokenizers"))
            .unwrap_or_else(|| PathBuf::from("tokenizers"))
    } else {
        PathBuf::from(&config.tokenizer.dir)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match proseloom_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            proseloom_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let gate = GenerationGate::new();

    let result = match cli.command {
        Commands::Generate {
            note,
            cursor,
            instruct,
            preset,
        } => {
            generate::run(
                &config,
                &gate,
                generate::GenerateOptions {
                    note: &note,
                    cursor: cursor.as_deref(),
                    instruct,
                    preset: preset.as_deref(),
                    retry: false,
                },
            )
            .await
        }
        Commands::Retry {
            note,
            instruct,
            preset,
        } => {
            generate::run(
                &config,
                &gate,
                generate::GenerateOptions {
                    note: &note,
                    cursor: None,
                    instruct,
                    preset: preset.as_deref(),
                    retry: true,
                },
            )
            .await
        }
        Commands::Count { note } => count::run(&config, &note),
        Commands::Login { email } => login::run(&config, email).await,
        Commands::Lore { action } => match action {
            LoreAction::List => lore::list(&config),
            LoreAction::Add { title } => lore::add(&config, &title),
            LoreAction::Remove { id } => lore::remove(&config, &id),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
