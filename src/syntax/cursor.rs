//! Scanning position over one logical card line.
//!
//! Decoders are plain functions over a `&mut Cursor`: each one consumes what it
//! recognizes and leaves the cursor after it. Backtracking is explicit through
//! [`Cursor::checkpoint`] and [`Cursor::restore`].

use miette::SourceSpan;

use crate::errors::{ErrorKind, ErrorReporting, InpError, SourceContext};
use crate::types::{is_boundary, Primitive};

/// How a field is joined to what precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sep {
    /// Directly attached, as the `1` in `m1` or the `:n` in `imp:n`.
    Adjacent,
    /// One or more blanks.
    Space,
    /// `=` with optional blanks around it, or blanks alone.
    Assign,
}

impl Sep {
    pub const fn pattern(&self) -> &'static str {
        match self {
            Sep::Adjacent => "",
            Sep::Space => r"\s+",
            Sep::Assign => r"(?:\s*=\s*|\s+)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn checkpoint(&self) -> usize {
        self.pos
    }

    pub fn restore(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// True at end of input or before whitespace.
    pub fn at_word_end(&self) -> bool {
        self.peek_char().map_or(true, char::is_whitespace)
    }

    /// Skips whitespace; reports whether any was skipped.
    pub fn skip_ws(&mut self) -> bool {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
        rest.len() != trimmed.len()
    }

    pub fn eat_char(&mut self, expected: char) -> bool {
        match self.peek_char() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Consumes `keyword` if the input starts with it, ignoring ASCII case.
    pub fn keyword(&mut self, keyword: &str) -> bool {
        match self.rest().get(..keyword.len()) {
            Some(head) if head.eq_ignore_ascii_case(keyword) => {
                self.pos += keyword.len();
                true
            }
            _ => false,
        }
    }

    /// The next whitespace-delimited word, without consuming it.
    pub fn peek_word(&self) -> &'a str {
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Consumes and returns everything left.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.text.len();
        rest
    }

    pub fn separator(&mut self, sep: Sep) -> Result<(), InpError> {
        match sep {
            Sep::Adjacent => Ok(()),
            Sep::Space => {
                if self.skip_ws() {
                    Ok(())
                } else {
                    Err(self.unexpected_here("whitespace"))
                }
            }
            Sep::Assign => {
                let spaced = self.skip_ws();
                if self.eat_char('=') {
                    self.skip_ws();
                    Ok(())
                } else if spaced {
                    Ok(())
                } else {
                    Err(self.unexpected_here("'=' or whitespace"))
                }
            }
        }
    }

    /// Reads one `T` if the input starts with a complete token of that type.
    ///
    /// `Ok(None)` means the input does not look like a `T` at all; an error means
    /// it has the shape of one but the value is unusable (for example an integer
    /// that overflows).
    pub fn take<T: Primitive>(&mut self) -> Result<Option<T>, InpError> {
        let rest = self.rest();
        let Some(found) = T::leading().find(rest) else {
            return Ok(None);
        };
        if found.end() == 0 || !is_boundary(rest[found.end()..].chars().next()) {
            return Ok(None);
        }
        let span: SourceSpan = (self.pos..self.pos + found.end()).into();
        let value = T::from_text(found.as_str()).map_err(|e| self.report(e.kind, span))?;
        self.pos += found.end();
        Ok(Some(value))
    }

    /// Like [`take`](Self::take), but absence is a syntax error naming `what`.
    pub fn expect<T: Primitive>(&mut self, what: &str) -> Result<T, InpError> {
        if let Some(value) = self.take::<T>()? {
            return Ok(value);
        }
        let word = self.peek_word();
        let span: SourceSpan = (self.pos..self.pos + word.len()).into();
        if word.is_empty() {
            Err(self.missing_element(what, span))
        } else {
            Err(self.invalid_literal(T::NAME, word, span))
        }
    }

    /// Requires that only whitespace is left.
    pub fn finish(&mut self) -> Result<(), InpError> {
        self.skip_ws();
        if self.at_end() {
            return Ok(());
        }
        let span: SourceSpan = (self.pos..self.text.len()).into();
        Err(self.report(
            ErrorKind::TrailingInput {
                text: self.rest().to_string(),
            },
            span,
        ))
    }

    /// Span of the next word, or an empty span at the current position.
    pub fn word_span(&self) -> SourceSpan {
        (self.pos..self.pos + self.peek_word().len()).into()
    }

    fn unexpected_here(&self, expected: &str) -> InpError {
        let word = self.peek_word();
        if word.is_empty() {
            self.missing_element(expected, self.word_span())
        } else {
            self.unexpected_token(expected, word, self.word_span())
        }
    }
}

impl ErrorReporting for Cursor<'_> {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> InpError {
        InpError::located(kind, &SourceContext::card(self.text), span)
    }
}
