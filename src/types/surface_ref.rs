use serde::Serialize;
use std::fmt;

use crate::errors::{ErrorKind, InpError};
use crate::types::{lexeme_regexes, Primitive};

/// Side of a surface a cell lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sense {
    Positive,
    Negative,
}

/// Signed surface reference in cell geometry: `-5`, `+12`, `3.2` (macrobody facet 2).
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceRef {
    sense: Sense,
    number: u64,
    facet: Option<u32>,
    text: String,
}

impl SurfaceRef {
    pub fn new(sense: Sense, number: u64, facet: Option<u32>) -> Self {
        let sign = match sense {
            Sense::Positive => "",
            Sense::Negative => "-",
        };
        let text = match facet {
            Some(facet) => format!("{sign}{number}.{facet}"),
            None => format!("{sign}{number}"),
        };
        Self {
            sense,
            number,
            facet,
            text,
        }
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn facet(&self) -> Option<u32> {
        self.facet
    }
}

impl Primitive for SurfaceRef {
    const NAME: &'static str = "surface reference";

    fn pattern() -> &'static str {
        r"[-+]?\d+(?:\.\d+)?"
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
        let (sense, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (Sense::Negative, rest),
            None => (Sense::Positive, text.strip_prefix('+').unwrap_or(text)),
        };
        let (number, facet) = match unsigned.split_once('.') {
            Some((number, facet)) => (number, Some(facet.parse().map_err(|_| invalid())?)),
            None => (unsigned, None),
        };
        let number: u64 = number.parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }
        Ok(Self {
            sense,
            number,
            facet,
            text: text.to_string(),
        })
    }

    fn to_text(&self) -> String {
        self.text.clone()
    }

    lexeme_regexes!(SurfaceRef);
}

impl PartialEq for SurfaceRef {
    fn eq(&self, other: &Self) -> bool {
        self.sense == other.sense && self.number == other.number && self.facet == other.facet
    }
}

impl fmt::Display for SurfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
