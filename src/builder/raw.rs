use crate::errors::{ErrorKind, InpError};
use crate::grammar::Field;
use crate::types::{Designator, Integer, Particle, Primitive, Real, SurfaceRef, Text, Zaid};

/// Loosely typed input for one primitive field.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<T> {
    Text(String),
    Int(i64),
    Float(f64),
    Typed(T),
}

impl<T> From<&str> for RawValue<T> {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl<T> From<String> for RawValue<T> {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl<T> From<i64> for RawValue<T> {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl<T> From<i32> for RawValue<T> {
    fn from(value: i32) -> Self {
        RawValue::Int(value.into())
    }
}

impl<T> From<u32> for RawValue<T> {
    fn from(value: u32) -> Self {
        RawValue::Int(value.into())
    }
}

impl<T> From<f64> for RawValue<T> {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

macro_rules! typed_raw {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawValue<$ty> {
                fn from(value: $ty) -> Self {
                    RawValue::Typed(value)
                }
            }
        )*
    };
}

typed_raw!(Integer, Real, Text, Particle, Designator, Zaid, SurfaceRef);

/// Normalizes a [`RawValue`] into the strict token type.
///
/// Builder input has no source text, so every failure here is a semantics error
/// naming the keyword and field it was meant for. Typed values go back through
/// the token grammar too: their public constructors accept anything.
pub trait FromRaw: Primitive {
    fn from_raw(raw: RawValue<Self>, keyword: &str, field: &str) -> Result<Self, InpError> {
        match raw {
            RawValue::Typed(value) => parse_as(&value.to_text(), keyword, field),
            RawValue::Text(text) => parse_as(&text, keyword, field),
            RawValue::Int(value) => Self::from_int(value, keyword, field),
            RawValue::Float(value) => Self::from_float(value, keyword, field),
        }
    }

    fn from_int(value: i64, keyword: &str, field: &str) -> Result<Self, InpError> {
        parse_as(&value.to_string(), keyword, field)
    }

    fn from_float(value: f64, keyword: &str, field: &str) -> Result<Self, InpError> {
        parse_as(&value.to_string(), keyword, field)
    }
}

/// Reads `text` as `T`, turning a syntax failure into a semantics error.
fn parse_as<T: Primitive>(text: &str, keyword: &str, field: &str) -> Result<T, InpError> {
    T::from_text(text.trim()).map_err(|_| {
        invalid_value(keyword, field, text, &format!("not a valid {}", T::NAME))
    })
}

pub(crate) fn invalid_value(keyword: &str, field: &str, value: &str, reason: &str) -> InpError {
    InpError::new(ErrorKind::InvalidValue {
        keyword: keyword.into(),
        field: field.into(),
        value: value.into(),
        reason: reason.into(),
    })
}

impl FromRaw for Integer {
    fn from_int(value: i64, _keyword: &str, _field: &str) -> Result<Self, InpError> {
        Ok(Integer::new(value))
    }

    fn from_float(value: f64, keyword: &str, field: &str) -> Result<Self, InpError> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Ok(Integer::new(value as i64))
        } else {
            Err(invalid_value(keyword, field, &value.to_string(), "not an integer"))
        }
    }
}

impl FromRaw for Real {
    fn from_int(value: i64, _keyword: &str, _field: &str) -> Result<Self, InpError> {
        Ok(Real::new(value as f64))
    }

    fn from_float(value: f64, keyword: &str, field: &str) -> Result<Self, InpError> {
        if value.is_finite() {
            Ok(Real::new(value))
        } else {
            Err(invalid_value(keyword, field, &value.to_string(), "not a finite number"))
        }
    }
}

impl FromRaw for Text {}
impl FromRaw for Particle {}
impl FromRaw for Designator {}
impl FromRaw for Zaid {}
impl FromRaw for SurfaceRef {}

/// Resolves an optional builder slot into a field value.
///
/// An empty slot is filled by the field's absent value (`None` for optional
/// fields, an empty list for option lists) or rejected as a missing field.
pub fn resolve<F: Field>(raw: Option<F::Raw>, keyword: &str, field: &str) -> Result<F, InpError> {
    match raw {
        Some(raw) => F::normalize(raw, keyword, field),
        None => F::absent().ok_or_else(|| {
            InpError::new(ErrorKind::MissingField {
                keyword: keyword.into(),
                field: field.into(),
            })
        }),
    }
}

/// Raw values for a tuple field: `list([1.0, 2.0, 3.0])`.
pub fn list<T, V, I>(values: I) -> Vec<RawValue<T>>
where
    V: Into<RawValue<T>>,
    I: IntoIterator<Item = V>,
{
    values.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sense;

    #[test]
    fn integral_floats_become_integers() {
        let integer = Integer::from_raw(RawValue::Float(3.0), "u", "number").unwrap();
        assert_eq!(integer.value(), 3);
        let error = Integer::from_raw(RawValue::Float(3.5), "u", "number").unwrap_err();
        assert!(error.is_semantics());
        assert_eq!(error.kind.field(), Some("number"));
    }

    #[test]
    fn text_is_parsed_with_the_token_grammar() {
        let real = Real::from_raw(RawValue::Text("1.5+3".into()), "px", "d").unwrap();
        assert_eq!(real.to_text(), "1.5+3");
        let error = Real::from_raw(RawValue::Text("abc".into()), "px", "d").unwrap_err();
        assert_eq!(error.code(), "inp::semantics::px::invalid_value");
    }

    #[test]
    fn ints_feed_other_tokens_through_text() {
        let zaid = Zaid::from_raw(RawValue::Int(1001), "m", "zaid").unwrap();
        assert_eq!((zaid.z(), zaid.a()), (1, 1));
    }

    #[test]
    fn typed_values_must_render_as_tokens() {
        let error = Text::from_raw(RawValue::Typed(Text::new("a b")), "nlib", "library")
            .unwrap_err();
        assert_eq!(error.code(), "inp::semantics::nlib::invalid_value");

        let error = Real::from_raw(RawValue::Typed(Real::new(f64::NAN)), "px", "d").unwrap_err();
        assert!(error.is_semantics());
        assert!(Real::from_raw(RawValue::Typed(Real::new(f64::INFINITY)), "px", "d").is_err());

        let surface = SurfaceRef::new(Sense::Positive, 0, None);
        let error = SurfaceRef::from_raw(RawValue::Typed(surface), "cell", "geometry").unwrap_err();
        assert_eq!(error.kind.field(), Some("geometry"));

        let real = Real::from_raw(RawValue::Typed(Real::new(2.5)), "px", "d").unwrap();
        assert_eq!(real.to_text(), "2.5");
    }

    #[test]
    fn list_converts_each_value() {
        let values: Vec<RawValue<Real>> = list([1.0, 2.0]);
        assert_eq!(values, vec![RawValue::Float(1.0), RawValue::Float(2.0)]);
    }
}
