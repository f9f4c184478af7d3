use serde::Serialize;

use crate::errors::{ErrorKind, InpError};
use crate::types::{words, Primitive};

/// One or more whitespace-separated values of the same type.
///
/// As a card field a tuple is greedy: it takes values until the next word no
/// longer parses as `T`. See the `Field` impl in `grammar::field`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tuple<T>(Vec<T>);

impl<T> Tuple<T> {
    pub fn new(items: Vec<T>) -> Result<Self, InpError> {
        if items.is_empty() {
            return Err(InpError::new(ErrorKind::MissingElement {
                element: "at least one value".into(),
            }));
        }
        Ok(Self(items))
    }

    pub fn items(&self) -> &[T] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: Primitive> Tuple<T> {
    /// Unanchored pattern for a run of `T` separated by whitespace.
    pub fn pattern() -> String {
        format!(r"(?:{p})(?:\s+(?:{p}))*", p = T::pattern())
    }

    pub fn from_text(text: &str) -> Result<Self, InpError> {
        let items = words(text)
            .map(T::from_text)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.with_source_if_absent(text))?;
        Self::new(items).map_err(|e| e.with_source_if_absent(text))
    }

    pub fn to_text(&self) -> String {
        let parts: Vec<String> = self.0.iter().map(T::to_text).collect();
        parts.join(" ")
    }
}

impl<'a, T> IntoIterator for &'a Tuple<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
