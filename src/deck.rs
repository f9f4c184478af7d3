//! Splitting a whole input deck into raw card blocks.
//!
//! A deck is a title line, then the cell cards, a blank line, the surface
//! cards, a blank line and the data cards. Splitting never parses a card; it only
//! groups physical lines, so one bad card cannot hide the others.

use serde::Serialize;

use crate::syntax::preprocess;

/// One card's physical lines as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawCard {
    /// 1-based line number of the card's first physical line.
    pub line: usize,
    pub text: String,
    /// A full-line `c` comment.
    pub is_comment: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deck {
    pub title: String,
    pub cells: Vec<RawCard>,
    pub surfaces: Vec<RawCard>,
    pub data: Vec<RawCard>,
}

impl Deck {
    /// Non-comment blocks of every section, in deck order.
    pub fn cards(&self) -> impl Iterator<Item = (Section, &RawCard)> {
        let cells = self.cells.iter().map(|card| (Section::Cells, card));
        let surfaces = self.surfaces.iter().map(|card| (Section::Surfaces, card));
        let data = self.data.iter().map(|card| (Section::Data, card));
        cells
            .chain(surfaces)
            .chain(data)
            .filter(|(_, card)| !card.is_comment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Cells,
    Surfaces,
    Data,
}

/// `c` in columns 1-5 followed by a blank or the end of the line.
fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    if indent >= 5 {
        return false;
    }
    let mut chars = trimmed.chars();
    matches!(chars.next(), Some('c' | 'C')) && chars.next().map_or(true, char::is_whitespace)
}

fn is_indented(line: &str) -> bool {
    line.starts_with("     ")
}

pub fn split(text: &str) -> Deck {
    let mut deck = Deck::default();
    let mut lines = text.lines().enumerate();
    if let Some((_, title)) = lines.next() {
        deck.title = title.trim_end().to_string();
    }

    let mut section = 0usize;
    let mut current: Option<RawCard> = None;
    // Comment lines seen while a card is open; they follow the card once it closes.
    let mut pending: Vec<RawCard> = Vec::new();
    let mut continues = false;

    for (index, line) in lines {
        let sections = [&mut deck.cells, &mut deck.surfaces, &mut deck.data];
        let Some(target) = sections.into_iter().nth(section) else {
            break;
        };

        if line.trim().is_empty() {
            target.extend(current.take());
            target.append(&mut pending);
            continues = false;
            section += 1;
            continue;
        }

        if is_comment_line(line) {
            let comment = RawCard {
                line: index + 1,
                text: line.to_string(),
                is_comment: true,
            };
            if current.is_some() {
                pending.push(comment);
            } else {
                target.push(comment);
            }
            continue;
        }

        match current.as_mut() {
            Some(card) if continues || is_indented(line) => {
                card.text.push('\n');
                card.text.push_str(line);
            }
            _ => {
                target.extend(current.take());
                target.append(&mut pending);
                current = Some(RawCard {
                    line: index + 1,
                    text: line.to_string(),
                    is_comment: false,
                });
            }
        }
        continues = preprocess::strip_marker(line).1;
    }

    if let Some(target) = [&mut deck.cells, &mut deck.surfaces, &mut deck.data]
        .into_iter()
        .nth(section.min(2))
    {
        target.extend(current);
        target.append(&mut pending);
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = "\
sample problem
c cells
1 1 -2.7 -1 imp:n=1
2 0 1 &
  imp:n=0

1 so 5.0 $ sphere
2 px 1.0
     $ nothing here

m1 13027 1
nps 1000
";

    #[test]
    fn sections_and_continuations() {
        let deck = split(DECK);
        assert_eq!(deck.title, "sample problem");
        assert_eq!(deck.cells.len(), 3);
        assert!(deck.cells[0].is_comment);
        assert_eq!(deck.cells[2].line, 4);
        assert_eq!(deck.cells[2].text, "2 0 1 &\n  imp:n=0");
        assert_eq!(deck.surfaces.len(), 2);
        assert_eq!(deck.surfaces[1].text, "2 px 1.0\n     $ nothing here");
        assert_eq!(deck.data.len(), 2);
        assert_eq!(deck.cards().count(), 6);
    }

    #[test]
    fn comment_lines_do_not_end_a_card() {
        let deck = split("t\n1 0 -1\nc between\n     imp:n=1\nc after\n2 0 1 &\nC note\n  imp:n=0\n");
        assert_eq!(deck.cells.len(), 5);
        assert_eq!(deck.cells[0].text, "1 0 -1\n     imp:n=1");
        assert_eq!(deck.cells[1].text, "c between");
        assert_eq!(deck.cells[1].line, 3);
        assert!(deck.cells[2].is_comment);
        assert_eq!(deck.cells[3].text, "2 0 1 &\n  imp:n=0");
        assert_eq!(deck.cells[4].text, "C note");
        assert_eq!(deck.cards().count(), 2);
    }

    #[test]
    fn escaped_ampersand_does_not_continue() {
        let deck = split("t\n1 0 -1\n\nfc4 a \\&\nnps 1\n");
        assert_eq!(deck.data.len(), 2);
        assert_eq!(deck.data[1].text, "nps 1");
        let deck = split("t\n1 0 -1\n\nfc4 a \\$ x &\nnps 1\n");
        assert_eq!(deck.data.len(), 1);
    }

    #[test]
    fn comment_detection() {
        assert!(is_comment_line("c"));
        assert!(is_comment_line("  C note"));
        assert!(!is_comment_line("cx 1"));
        assert!(!is_comment_line("     c 1"));
    }

    #[test]
    fn text_after_the_data_block_is_ignored() {
        let deck = split("t\n1 0 -1\n\n1 so 1\n\nnps 1\n\nfree text\n");
        assert_eq!(deck.data.len(), 1);
        assert_eq!(deck.data[0].text, "nps 1");
    }
}
