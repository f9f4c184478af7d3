//! # Lexical Primitives
//!
//! Every value that appears in a card is one of these token types. Each type owns
//! three things:
//!
//! - **`pattern()`**: an unanchored regular-expression fragment for its textual form,
//!   embeddable in a larger production pattern
//! - **`from_text()`**: parse a whole string into the token, or fail with a syntax error
//! - **`to_text()`**: render the token back; for parsed tokens this is the exact text
//!   they were read from
//!
//! Range checks are not a primitive's job. `Integer::from_text("0")` succeeds even
//! where a field demands `1..=999`; the owning field's validator rejects it.
//!
//! ## Module Structure
//!
//! - **`integer`**, **`real`**, **`text`**: scalar tokens
//! - **`tuple`**: one-or-more whitespace-separated sequences of any field
//! - **`particle`**: particle symbols and `:n,p` designators
//! - **`zaid`**: nuclide identifiers
//! - **`surface_ref`**: signed surface references used in cell geometry

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::InpError;

pub mod integer;
pub mod particle;
pub mod real;
pub mod surface_ref;
pub mod text;
pub mod tuple;
pub mod zaid;

pub use integer::Integer;
pub use particle::{Designator, Particle};
pub use real::{Notation, Real};
pub use surface_ref::{Sense, SurfaceRef};
pub use text::Text;
pub use tuple::Tuple;
pub use zaid::Zaid;

/// A single lexeme with its own grammar.
pub trait Primitive: Sized + Clone + std::fmt::Debug {
    /// Name used in diagnostics and grammar listings.
    const NAME: &'static str;

    /// Unanchored pattern fragment for the token's textual form.
    fn pattern() -> &'static str;

    fn from_text(text: &str) -> Result<Self, InpError>;

    fn to_text(&self) -> String;

    /// `pattern()` anchored at both ends.
    #[doc(hidden)]
    fn anchored() -> &'static Regex;

    /// `pattern()` anchored at the start only, for scanning.
    #[doc(hidden)]
    fn leading() -> &'static Regex;
}

/// Implements the two compiled forms of a primitive's pattern, once per type.
macro_rules! lexeme_regexes {
    ($ty:ty) => {
        fn anchored() -> &'static regex::Regex {
            static ANCHORED: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
                $crate::types::compile_lexeme(&format!(
                    "(?i)^(?:{})$",
                    <$ty as $crate::types::Primitive>::pattern()
                ))
            });
            &ANCHORED
        }

        fn leading() -> &'static regex::Regex {
            static LEADING: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
                $crate::types::compile_lexeme(&format!(
                    "(?i)^(?:{})",
                    <$ty as $crate::types::Primitive>::pattern()
                ))
            });
            &LEADING
        }
    };
}
pub(crate) use lexeme_regexes;

/// Lexeme patterns are compile-time constants; a failure here is a bug in this crate.
pub(crate) fn compile_lexeme(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("lexeme pattern {pattern:?} does not compile: {e}"))
}

/// Characters that may directly follow a token without intervening whitespace.
pub(crate) fn is_boundary(next: Option<char>) -> bool {
    match next {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '=' | '(' | ')' | ':' | '#' | ','),
    }
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile_lexeme(r"\s+"));

/// Splits `text` into whitespace-separated words.
pub(crate) fn words(text: &str) -> impl Iterator<Item = &str> {
    WHITESPACE.split(text.trim()).filter(|w| !w.is_empty())
}
