//! Typed card fields.
//!
//! A [`Field`] knows four things about one slot of a production: its pattern
//! fragment (for the whole-production gate regex), how to decode itself from a
//! [`Cursor`], how to render itself into a [`Writer`], and how to normalize
//! builder input into a value. Primitives, optional fields, tuples and option
//! lists are all fields, so productions compose structurally.

use serde::Serialize;
use std::fmt;

use crate::builder::raw::{FromRaw, RawValue};
use crate::errors::{ErrorKind, ErrorReporting, InpError};
use crate::grammar::{dispatch, Grammar};
use crate::syntax::{Cursor, Sep, Writer};
use crate::types::{Designator, Integer, Particle, Primitive, Real, SurfaceRef, Text, Tuple, Zaid};

pub trait Field: Sized + Clone + fmt::Debug + Serialize {
    /// What the builder layer accepts for this field.
    type Raw: Clone + fmt::Debug;

    /// Short description for grammar listings and usage hints.
    fn describe() -> String;

    /// Pattern fragment, including the leading separator.
    fn pattern(sep: Sep) -> Result<String, InpError>;

    /// Decodes the separator and the value after it.
    fn parse(cursor: &mut Cursor<'_>, sep: Sep) -> Result<Self, InpError>;

    fn render(&self, out: &mut Writer, sep: Sep);

    fn normalize(raw: Self::Raw, keyword: &str, field: &str) -> Result<Self, InpError>;

    /// Value used when the field is left unset, if it may be.
    fn absent() -> Option<Self> {
        None
    }

    /// The builder input that reproduces this value; `None` if it is absent.
    fn unbuild(&self) -> Option<Self::Raw>;
}

macro_rules! primitive_field {
    ($($ty:ty),*) => {
        $(
            impl Field for $ty {
                type Raw = RawValue<$ty>;

                fn describe() -> String {
                    <$ty as Primitive>::NAME.to_string()
                }

                fn pattern(sep: Sep) -> Result<String, InpError> {
                    Ok(format!("{}(?:{})", sep.pattern(), <$ty as Primitive>::pattern()))
                }

                fn parse(cursor: &mut Cursor<'_>, sep: Sep) -> Result<Self, InpError> {
                    cursor.separator(sep)?;
                    cursor.expect::<$ty>(<$ty as Primitive>::NAME)
                }

                fn render(&self, out: &mut Writer, sep: Sep) {
                    out.push(sep, &Primitive::to_text(self));
                }

                fn normalize(raw: Self::Raw, keyword: &str, field: &str) -> Result<Self, InpError> {
                    <$ty as FromRaw>::from_raw(raw, keyword, field)
                }

                fn unbuild(&self) -> Option<Self::Raw> {
                    Some(RawValue::Typed(self.clone()))
                }
            }
        )*
    };
}

primitive_field!(Integer, Real, Text, Particle, Designator, Zaid, SurfaceRef);

impl<F: Field> Field for Option<F> {
    type Raw = F::Raw;

    fn describe() -> String {
        format!("[{}]", F::describe())
    }

    fn pattern(sep: Sep) -> Result<String, InpError> {
        Ok(format!("(?:{})?", F::pattern(sep)?))
    }

    fn parse(cursor: &mut Cursor<'_>, sep: Sep) -> Result<Self, InpError> {
        let checkpoint = cursor.checkpoint();
        match F::parse(cursor, sep) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_syntax() => {
                cursor.restore(checkpoint);
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    fn render(&self, out: &mut Writer, sep: Sep) {
        if let Some(value) = self {
            value.render(out, sep);
        }
    }

    fn normalize(raw: Self::Raw, keyword: &str, field: &str) -> Result<Self, InpError> {
        F::normalize(raw, keyword, field).map(Some)
    }

    fn absent() -> Option<Self> {
        Some(None)
    }

    fn unbuild(&self) -> Option<Self::Raw> {
        self.as_ref().and_then(F::unbuild)
    }
}

impl<T: Field> Field for Tuple<T> {
    type Raw = Vec<T::Raw>;

    fn describe() -> String {
        format!("{}...", T::describe())
    }

    fn pattern(sep: Sep) -> Result<String, InpError> {
        Ok(format!("{}(?:{})*", T::pattern(sep)?, T::pattern(Sep::Space)?))
    }

    fn parse(cursor: &mut Cursor<'_>, sep: Sep) -> Result<Self, InpError> {
        let mut items = vec![T::parse(cursor, sep)?];
        loop {
            let checkpoint = cursor.checkpoint();
            match T::parse(cursor, Sep::Space) {
                Ok(item) => items.push(item),
                Err(error) if error.is_syntax() => {
                    cursor.restore(checkpoint);
                    break;
                }
                Err(error) => return Err(error),
            }
        }
        Tuple::new(items)
    }

    fn render(&self, out: &mut Writer, sep: Sep) {
        for (i, item) in self.iter().enumerate() {
            item.render(out, if i == 0 { sep } else { Sep::Space });
        }
    }

    fn normalize(raw: Self::Raw, keyword: &str, field: &str) -> Result<Self, InpError> {
        if raw.is_empty() {
            return Err(InpError::new(ErrorKind::MissingField {
                keyword: keyword.into(),
                field: field.into(),
            }));
        }
        let items = raw
            .into_iter()
            .map(|item| T::normalize(item, keyword, field))
            .collect::<Result<Vec<_>, _>>()?;
        Tuple::new(items)
    }

    fn unbuild(&self) -> Option<Self::Raw> {
        Some(self.iter().filter_map(T::unbuild).collect())
    }
}

/// A trailing list of keyworded options from another grammar family.
impl<O: Grammar> Field for Vec<O> {
    type Raw = Vec<O>;

    fn describe() -> String {
        format!("[{}...]", O::FAMILY)
    }

    fn pattern(sep: Sep) -> Result<String, InpError> {
        Ok(format!(
            "(?:{}{})*",
            sep.pattern(),
            O::registry()?.alternation()
        ))
    }

    fn parse(cursor: &mut Cursor<'_>, sep: Sep) -> Result<Self, InpError> {
        let mut options = Vec::new();
        loop {
            let checkpoint = cursor.checkpoint();
            if cursor.separator(sep).is_err() || cursor.at_end() {
                cursor.restore(checkpoint);
                break;
            }
            match dispatch::parse_prefix::<O>(cursor)? {
                Some(option) => options.push(option),
                None => {
                    return Err(cursor.report(
                        ErrorKind::NoMatchingGrammar {
                            family: O::FAMILY.into(),
                            text: cursor.peek_word().into(),
                        },
                        cursor.word_span(),
                    ))
                }
            }
        }
        Ok(options)
    }

    fn render(&self, out: &mut Writer, sep: Sep) {
        for option in self {
            out.push(sep, &option.to_text());
        }
    }

    fn normalize(raw: Self::Raw, _keyword: &str, _field: &str) -> Result<Self, InpError> {
        Ok(raw)
    }

    fn absent() -> Option<Self> {
        Some(Vec::new())
    }

    fn unbuild(&self) -> Option<Self::Raw> {
        Some(self.clone())
    }
}

/// Separators for the fields of one production, in order.
///
/// The first value after a keyword may be written `kw=v` in option families; the
/// positional fields of a keywordless production start the text directly.
#[derive(Debug, Clone, Copy)]
pub struct SepSequence {
    next: Sep,
}

impl SepSequence {
    pub fn new(keyword: &str, assign: bool) -> Self {
        let next = if keyword.is_empty() {
            Sep::Adjacent
        } else if assign {
            Sep::Assign
        } else {
            Sep::Space
        };
        Self { next }
    }

    pub fn advance(&mut self) -> Sep {
        std::mem::replace(&mut self.next, Sep::Space)
    }
}

/// One named slot of a production, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: String,
}

impl FieldSpec {
    pub fn new(name: &'static str, description: String) -> Self {
        Self { name, description }
    }
}
