//! Handles all user-facing output for the CLI.
//!
//! Status lines, diffs and diagnostics are written here so every command reports
//! the same way. Colour follows the terminal: none when stdout is not a tty.

use difference::{Changeset, Difference};
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::{print_error, InpError};
use crate::grammar::FamilyListing;

fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn stdout() -> StandardStream {
    StandardStream::stdout(color_choice())
}

/// `ok   deck.inp (12 cards)` / `FAIL deck.inp (2 of 12 cards)`.
pub fn print_status(label: &str, cards: usize, failed: usize) {
    let mut out = stdout();
    let (tag, color) = if failed == 0 {
        ("ok  ", Color::Green)
    } else {
        ("FAIL", Color::Red)
    };
    let _ = out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(out, "{tag}");
    let _ = out.reset();
    if failed == 0 {
        let _ = writeln!(out, " {label} ({cards} cards)");
    } else {
        let _ = writeln!(out, " {label} ({failed} of {cards} cards)");
    }
}

/// Reports one card failure, with the source named `file:line`.
pub fn print_card_error(location: &str, error: InpError) {
    print_error(error.renamed(location));
}

/// Line diff of the current and formatted text; returns whether they differ.
pub fn print_format_diff(label: &str, current: &str, formatted: &str) -> bool {
    let changeset = Changeset::new(current, formatted, "\n");
    if changeset.distance == 0 {
        return false;
    }
    let mut out = stdout();
    let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
    let _ = writeln!(out, "--- {label}");
    let _ = out.reset();
    print_diff(&mut out, &changeset.diffs);
    true
}

pub fn print_listing(listing: &FamilyListing) {
    let mut out = stdout();
    let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
    let _ = writeln!(out, "{}", listing.family);
    let _ = out.reset();
    for producer in &listing.producers {
        let keyword = if producer.keyword.is_empty() {
            "(positional)"
        } else {
            producer.keyword
        };
        let _ = writeln!(out, "  {keyword:<8} {}", producer.label);
        for field in &producer.fields {
            let _ = writeln!(out, "      {}: {}", field.name, field.description);
        }
        let _ = writeln!(out, "      pattern: {}", producer.pattern);
    }
}

fn print_diff(out: &mut StandardStream, diffs: &[Difference]) {
    for diff in diffs {
        let (marker, color, chunk) = match diff {
            Difference::Same(x) => (' ', None, x),
            Difference::Add(x) => ('+', Some(Color::Green), x),
            Difference::Rem(x) => ('-', Some(Color::Red), x),
        };
        let _ = out.set_color(ColorSpec::new().set_fg(color));
        for line in chunk.split('\n') {
            let _ = writeln!(out, "{marker}{line}");
        }
    }
    let _ = out.reset();
}
