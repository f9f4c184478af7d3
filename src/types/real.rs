use serde::Serialize;
use std::fmt;

use crate::errors::{ErrorKind, InpError};
use crate::types::{lexeme_regexes, Primitive};

/// Which of the three accepted notations a real was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notation {
    /// `1.5`, `-3`, `.25`
    Plain,
    /// `1.5e3`, `2E-4`
    Exponent,
    /// `1.5+3` meaning `1.5e3`: a sign after the mantissa with no `e` marker
    Shorthand,
}

/// Floating-point value in the deck's permissive numeric grammar.
///
/// The original text is kept so that `1.5+3` is written back as `1.5+3`, not `1500`.
#[derive(Debug, Clone, Serialize)]
pub struct Real {
    value: f64,
    text: String,
    notation: Notation,
}

impl Real {
    /// A real built from a value; rendered plainly unless very large or small.
    pub fn new(value: f64) -> Self {
        let magnitude = value.abs();
        if value == 0.0 || (1e-5..1e15).contains(&magnitude) {
            Self {
                value,
                text: format!("{value}"),
                notation: Notation::Plain,
            }
        } else {
            Self {
                value,
                text: format!("{value:e}"),
                notation: Notation::Exponent,
            }
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn canonical_text(&self) -> &str {
        &self.text
    }
}

/// Index of the sign that starts a shorthand exponent, if any.
fn shorthand_split(text: &str) -> Option<usize> {
    text.char_indices()
        .skip(1)
        .find(|&(_, c)| c == '+' || c == '-')
        .map(|(i, _)| i)
}

impl Primitive for Real {
    const NAME: &'static str = "real";

    fn pattern() -> &'static str {
        r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+|[-+]\d+)?"
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

        let (notation, value) = if text.contains(&['e', 'E'][..]) {
            (Notation::Exponent, text.parse::<f64>())
        } else if let Some(split) = shorthand_split(text) {
            let (mantissa, exponent) = text.split_at(split);
            (
                Notation::Shorthand,
                format!("{mantissa}e{exponent}").parse::<f64>(),
            )
        } else {
            (Notation::Plain, text.parse::<f64>())
        };

        let value = value.map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(Self {
            value,
            text: text.to_string(),
            notation,
        })
    }

    fn to_text(&self) -> String {
        self.text.clone()
    }

    lexeme_regexes!(Real);
}

/// Reals compare by value; `1.5+3` equals `1500`.
impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_exponent_is_preserved() {
        let real = Real::from_text("1.5+3").unwrap();
        assert_eq!(real.value(), 1500.0);
        assert_eq!(real.notation(), Notation::Shorthand);
        assert_eq!(real.to_text(), "1.5+3");

        let negative = Real::from_text("-2.5-2").unwrap();
        assert!((negative.value() + 0.025).abs() < 1e-12);
        assert_eq!(negative.to_text(), "-2.5-2");
    }

    #[test]
    fn e_notation_is_preserved() {
        let real = Real::from_text("1.5e3").unwrap();
        assert_eq!(real.value(), 1500.0);
        assert_eq!(real.notation(), Notation::Exponent);
        assert_eq!(real.to_text(), "1.5e3");
        assert_eq!(Real::from_text("2E-4").unwrap().to_text(), "2E-4");
    }

    #[test]
    fn plain_forms() {
        for (text, value) in [("1", 1.0), ("-3", -3.0), (".25", 0.25), ("2.", 2.0), ("+0.5", 0.5)] {
            let real = Real::from_text(text).unwrap();
            assert_eq!(real.value(), value, "{text}");
            assert_eq!(real.notation(), Notation::Plain);
            assert_eq!(real.to_text(), text);
        }
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "e3", "1.5e", "1..5", "abc", "1.5+", "- 1"] {
            assert!(Real::from_text(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn built_values_render_readably() {
        assert_eq!(Real::new(1.5).to_text(), "1.5");
        assert_eq!(Real::new(3.0).to_text(), "3");
        assert_eq!(Real::new(1e20).notation(), Notation::Exponent);
        let tiny = Real::new(1.5e-7);
        assert_eq!(Real::from_text(&tiny.to_text()).unwrap(), tiny);
    }
}
