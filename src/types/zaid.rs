use serde::Serialize;
use std::fmt;

use crate::errors::{ErrorKind, InpError};
use crate::types::{lexeme_regexes, Primitive};

/// Nuclide identifier `ZZZAAA[.nnX]`, e.g. `92235.80c` or `1001`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zaid {
    z: u32,
    a: u32,
    library: Option<String>,
    text: String,
}

impl Zaid {
    /// Builds `ZZZAAA[.library]`; `z` and `a` must each fit in three digits.
    pub fn new(z: u32, a: u32, library: Option<&str>) -> Result<Self, InpError> {
        let id = z
            .checked_mul(1000)
            .and_then(|id| id.checked_add(a))
            .filter(|_| z <= 999 && a <= 999)
            .ok_or_else(|| {
                InpError::new(ErrorKind::InvalidLiteral {
                    literal_type: Self::NAME.into(),
                    value: format!("z={z} a={a}"),
                })
            })?;
        match library {
            Some(library) => Self::from_text(&format!("{id}.{library}")),
            None => Self::from_text(&id.to_string()),
        }
    }

    /// Atomic number.
    pub fn z(&self) -> u32 {
        self.z
    }

    /// Mass number; 0 for natural elements.
    pub fn a(&self) -> u32 {
        self.a
    }

    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }
}

impl Primitive for Zaid {
    const NAME: &'static str = "zaid";

    fn pattern() -> &'static str {
        r"\d{1,6}(?:\.\d{2,3}[a-z])?"
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
        let (id, library) = match text.split_once('.') {
            Some((id, library)) => (id, Some(library.to_ascii_lowercase())),
            None => (text, None),
        };
        let id: u32 = id.parse().map_err(|_| invalid())?;
        Ok(Self {
            z: id / 1000,
            a: id % 1000,
            library,
            text: text.to_string(),
        })
    }

    fn to_text(&self) -> String {
        self.text.clone()
    }

    lexeme_regexes!(Zaid);
}

impl fmt::Display for Zaid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
