//! Physical lines to one logical line.
//!
//! A card may span several physical lines: every line after the first is a
//! continuation (indented five or more blanks, or following a line that ended in
//! `&`). Each physical line may carry a `$` comment. Comments are lifted out of the
//! text and kept with the index of the line they came from so the serializer can
//! put them back.

use serde::Serialize;

use crate::types::words;

/// A `$` comment and the physical line (0-based, within its card) it was written on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub line: usize,
    /// Everything after the `$`, including its leading blank.
    pub text: String,
}

/// Text that rides along with a card without being part of its grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trivia {
    pub comments: Vec<Comment>,
    /// Words per physical line of the original layout; `None` for built cards.
    pub layout: Option<Vec<usize>>,
}

impl Trivia {
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.layout.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Joined card text, single-spaced, without comments or `&` markers.
    pub text: String,
    pub comments: Vec<Comment>,
    pub layout: Vec<usize>,
}

impl LogicalLine {
    /// Comment texts in physical-line order.
    pub fn comment_texts(&self) -> Vec<&str> {
        self.comments.iter().map(|c| c.text.as_str()).collect()
    }

    pub fn into_parts(self) -> (String, Trivia) {
        let trivia = Trivia {
            comments: self.comments,
            layout: Some(self.layout),
        };
        (self.text, trivia)
    }
}

/// Byte index of the first `$` not preceded by a backslash.
fn comment_start(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '$' if !escaped => return Some(i),
            '\\' => escaped = !escaped,
            _ => escaped = false,
        }
    }
    None
}

/// Content of a physical line without its `$` comment or trailing `&`, and
/// whether the `&` continuation marker was there. `\&` is text.
pub(crate) fn strip_marker(line: &str) -> (&str, bool) {
    let content = match comment_start(line) {
        Some(at) => &line[..at],
        None => line,
    };
    let content = content.trim_end();
    match content.strip_suffix('&') {
        Some(rest) if (rest.len() - rest.trim_end_matches('\\').len()) % 2 == 0 => (rest, true),
        _ => (content, false),
    }
}

pub fn preprocess(raw: &str) -> LogicalLine {
    let mut joined: Vec<&str> = Vec::new();
    let mut comments = Vec::new();
    let mut layout = Vec::new();

    for (index, physical) in raw.lines().enumerate() {
        let (content, comment) = match comment_start(physical) {
            Some(at) => (&physical[..at], Some(&physical[at + 1..])),
            None => (physical, None),
        };
        if let Some(comment) = comment {
            comments.push(Comment {
                line: index,
                text: comment.trim_end().to_string(),
            });
        }

        let (content, _) = strip_marker(content);
        let before = joined.len();
        joined.extend(words(content));
        layout.push(joined.len() - before);
    }

    LogicalLine {
        text: joined.join(" "),
        comments,
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_keep_their_lines() {
        let line = preprocess("kw a b $ note\n     c d $ note2");
        assert_eq!(line.text, "kw a b c d");
        assert_eq!(line.comment_texts(), vec![" note", " note2"]);
        assert_eq!(line.comments[1].line, 1);
        assert_eq!(line.layout, vec![3, 2]);
    }

    #[test]
    fn further_dollars_fold_into_one_comment() {
        let line = preprocess("px 1 $ a $ b");
        assert_eq!(line.text, "px 1");
        assert_eq!(line.comment_texts(), vec![" a $ b"]);
    }

    #[test]
    fn escaped_dollar_is_text() {
        let line = preprocess(r"nlib=a\$b $ real");
        assert_eq!(line.text, r"nlib=a\$b");
        assert_eq!(line.comment_texts(), vec![" real"]);
    }

    #[test]
    fn ampersand_marks_continuation() {
        let line = preprocess("sq 1 2 3 &\n4 5 6 7 8 9 10");
        assert_eq!(line.text, "sq 1 2 3 4 5 6 7 8 9 10");
        assert_eq!(line.layout, vec![4, 7]);
    }

    #[test]
    fn escaped_markers_are_text() {
        assert_eq!(strip_marker(r"fc1 a\& b \&"), (r"fc1 a\& b \&", false));
        assert_eq!(strip_marker(r"px 1 \$ &"), (r"px 1 \$ ", true));
        assert_eq!(strip_marker(r"px 1 \\&"), (r"px 1 \\", true));
        assert_eq!(strip_marker("px 1 $ see &"), ("px 1", false));
        assert_eq!(preprocess(r"fc1 tally \&").text, r"fc1 tally \&");
    }

    #[test]
    fn comment_only_continuation_line() {
        let line = preprocess("px 1\n     $ why");
        assert_eq!(line.text, "px 1");
        assert_eq!(line.layout, vec![2, 0]);
        assert_eq!(line.comments[0].line, 1);
    }
}
