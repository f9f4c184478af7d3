//! The `inp` command-line interface.
//!
//! Each subcommand reads decks, hands every card to the library and reports
//! through [`output`]. Failures of individual cards are reported and counted; the
//! process exits with status 1 if any card or file failed.

use clap::Parser;
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fs, process};
use walkdir::WalkDir;

use crate::cards::{self, AnyCard};
use crate::cli::args::{Command, InpArgs};
use crate::config::FormatConfig;
use crate::deck::{self, Deck, RawCard};

pub mod args;
pub mod output;

type CliResult = Result<bool, Box<dyn Error>>;

/// The main entry point for the CLI.
pub fn run() {
    let args = InpArgs::parse();

    let result = cards::init().map_err(Box::<dyn Error>::from).and_then(|()| {
        match args.command {
            Command::Check { path } => handle_check(&path),
            Command::Format {
                file,
                check,
                config,
            } => handle_format(&file, check, config.as_deref()),
            Command::Ast { file } => handle_ast(&file),
            Command::Grammar { family } => handle_grammar(family.as_deref()),
        }
    });

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn location(path: &Path, card: &RawCard) -> String {
    format!("{}:{}", path.display(), card.line)
}

/// Deck files below `path`, or `path` itself if it is a file.
fn deck_files(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|file| {
            matches!(
                file.extension().and_then(|ext| ext.to_str()),
                Some("inp" | "i")
            )
        })
        .collect();
    files.sort();
    files
}

fn read_deck(path: &Path) -> Result<Deck, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(deck::split(&text))
}

fn handle_check(path: &Path) -> CliResult {
    let files = deck_files(path);
    if files.is_empty() {
        return Err(format!("no decks found under {}", path.display()).into());
    }
    let mut clean = true;
    for file in files {
        let deck = read_deck(&file)?;
        let mut total = 0;
        let mut failed = 0;
        for (section, card) in deck.cards() {
            total += 1;
            if let Err(error) = AnyCard::parse(section, &card.text) {
                failed += 1;
                output::print_card_error(&location(&file, card), error);
            }
        }
        info!("checked {} ({total} cards)", file.display());
        output::print_status(&file.display().to_string(), total, failed);
        clean &= failed == 0;
    }
    Ok(clean)
}

/// Formats every section of `deck`; cards that fail to parse are kept verbatim.
fn format_deck(path: &Path, deck: &Deck, config: &FormatConfig) -> (String, bool) {
    let mut clean = true;
    let mut blocks = vec![deck.title.clone()];
    let sections = [
        (deck::Section::Cells, &deck.cells),
        (deck::Section::Surfaces, &deck.surfaces),
        (deck::Section::Data, &deck.data),
    ];
    for (index, (section, cards)) in sections.into_iter().enumerate() {
        if index > 0 {
            blocks.push(String::new());
        }
        for card in cards {
            if card.is_comment {
                blocks.push(card.text.clone());
                continue;
            }
            match AnyCard::parse(section, &card.text) {
                Ok(parsed) => blocks.push(parsed.to_mcnp(config)),
                Err(error) => {
                    clean = false;
                    output::print_card_error(&location(path, card), error);
                    blocks.push(card.text.clone());
                }
            }
        }
    }
    let mut text = blocks.join("\n");
    text.push('\n');
    (text, clean)
}

fn handle_format(file: &Path, check: bool, config: Option<&Path>) -> CliResult {
    let config = match config {
        Some(path) => FormatConfig::load(path)?,
        None => FormatConfig::default(),
    };
    debug!("format config: {config:?}");
    let current = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let deck = deck::split(&current);
    let (formatted, clean) = format_deck(file, &deck, &config);

    if check {
        let changed = output::print_format_diff(&file.display().to_string(), &current, &formatted);
        return Ok(clean && !changed);
    }
    print!("{formatted}");
    Ok(clean)
}

#[derive(Serialize)]
struct AstEntry {
    line: usize,
    card: AnyCard,
}

#[derive(Serialize)]
struct AstDump {
    title: String,
    cards: Vec<AstEntry>,
}

fn handle_ast(file: &Path) -> CliResult {
    let deck = read_deck(file)?;
    let mut dump = AstDump {
        title: deck.title.clone(),
        cards: Vec::new(),
    };
    let mut clean = true;
    for (section, card) in deck.cards() {
        match AnyCard::parse(section, &card.text) {
            Ok(parsed) => dump.cards.push(AstEntry {
                line: card.line,
                card: parsed,
            }),
            Err(error) => {
                clean = false;
                output::print_card_error(&location(file, card), error);
            }
        }
    }
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(clean)
}

fn handle_grammar(family: Option<&str>) -> CliResult {
    let listings = match family {
        Some(name) => match cards::family(name)? {
            Some(listing) => vec![listing],
            None => {
                return Err(format!(
                    "unknown family '{name}' (expected one of: {})",
                    cards::family_names().join(", ")
                )
                .into())
            }
        },
        None => cards::catalog()?,
    };
    for listing in &listings {
        output::print_listing(listing);
    }
    Ok(true)
}
