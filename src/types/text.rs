use serde::Serialize;
use std::fmt;

use crate::errors::{ErrorKind, InpError};
use crate::types::{lexeme_regexes, Primitive};

/// Unquoted run of non-whitespace characters, such as a library suffix `80c`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text(String);

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Primitive for Text {
    const NAME: &'static str = "text";

    fn pattern() -> &'static str {
        r"[^\s=]+"
    }

    fn from_text(text: &str) -> Result<Self, InpError> {
        if !Self::anchored().is_match(text) {
            return Err(InpError::new(ErrorKind::InvalidLiteral {
                literal_type: Self::NAME.into(),
                value: text.into(),
            })
            .with_source_if_absent(text));
        }
        Ok(Self(text.to_string()))
    }

    fn to_text(&self) -> String {
        self.0.clone()
    }

    lexeme_regexes!(Text);
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
