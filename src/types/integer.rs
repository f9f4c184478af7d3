use serde::Serialize;
use std::fmt;

use crate::errors::{ErrorKind, InpError};
use crate::types::{lexeme_regexes, Primitive};

/// Signed decimal integer. Keeps the text it was read from (`+5` stays `+5`).
#[derive(Debug, Clone, Serialize)]
pub struct Integer {
    value: i64,
    text: String,
}

impl Integer {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn canonical_text(&self) -> &str {
        &self.text
    }
}

impl Primitive for Integer {
    const NAME: &'static str = "integer";

    fn pattern() -> &'static str {
        r"[-+]?\d+"
    }

    fn from_text(text: &str) -> Result<Self, InpError> {
        let invalid = || {
            InpError::new(ErrorKind::InvalidLiteral {
                literal_type: Self::NAME.into(),
                value: text.into(),
            })
            .with_source_if_absent(text)
        };
        if !Self::anchored().is_match(text) {
            return Err(invalid());
        }
        let value = text.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self {
            value,
            text: text.to_string(),
        })
    }

    fn to_text(&self) -> String {
        self.text.clone()
    }

    lexeme_regexes!(Integer);
}

/// Integers compare by value; `+5` equals `5`.
impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Integer {}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
