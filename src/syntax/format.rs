//! Rendered logical line back to physical lines.

use crate::config::FormatConfig;
use crate::syntax::Trivia;
use crate::types::words;

/// Breaks `text` into physical lines and re-attaches `trivia`'s comments.
///
/// The original line breaks are reused when layout preservation is on, the card
/// still has the same number of words and every line, comment included, still
/// fits in `line_width`. Otherwise words are packed greedily, breaking only between
/// words, with room left on each line for the comment that goes back on it. A
/// comment goes on the line index it was read from, or after the last line if the
/// card got shorter.
pub fn layout(text: &str, trivia: &Trivia, config: &FormatConfig) -> String {
    let all: Vec<&str> = words(text).collect();
    let indent = " ".repeat(config.continuation_indent);
    let reserved = |line: usize| comment_width(trivia, line);

    let preserved = trivia
        .layout
        .as_ref()
        .filter(|counts| config.preserve_layout && counts.iter().sum::<usize>() == all.len())
        .map(|counts| regroup(&all, counts, &indent))
        .filter(|lines| {
            lines
                .iter()
                .enumerate()
                .all(|(i, line)| line.len() + reserved(i) <= config.line_width)
        });

    let mut lines = match preserved {
        Some(lines) => lines,
        None => wrap(&all, &indent, config.line_width, reserved),
    };

    for comment in &trivia.comments {
        match lines.get_mut(comment.line) {
            Some(line) if line.trim().is_empty() => {
                line.push('$');
                line.push_str(&comment.text);
            }
            Some(line) => {
                line.push_str(" $");
                line.push_str(&comment.text);
            }
            None => lines.push(format!("{indent}${}", comment.text)),
        }
    }

    lines.join("\n")
}

/// Columns taken by the comments that belong on physical line `line`.
fn comment_width(trivia: &Trivia, line: usize) -> usize {
    trivia
        .comments
        .iter()
        .filter(|comment| comment.line == line)
        .map(|comment| comment.text.len() + 2)
        .sum()
}

/// Words grouped by the per-line counts of the original layout.
fn regroup(words: &[&str], counts: &[usize], indent: &str) -> Vec<String> {
    let mut rest = words;
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let (head, tail) = rest.split_at(count);
            rest = tail;
            let prefix = if i == 0 { "" } else { indent };
            format!("{prefix}{}", head.join(" "))
        })
        .collect()
}

/// Greedy packing; line `i` leaves `reserved(i)` columns free. A line always takes
/// at least one word, so a single over-long word still gets a line of its own.
fn wrap(words: &[&str], indent: &str, width: usize, reserved: impl Fn(usize) -> usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut filled = false;
    for word in words {
        let budget = width.saturating_sub(reserved(lines.len()));
        if filled && current.len() + 1 + word.len() > budget {
            lines.push(std::mem::replace(&mut current, indent.to_string()));
            filled = false;
        }
        if filled {
            current.push(' ');
        }
        current.push_str(word);
        filled = true;
    }
    lines.push(current);
    lines
}
