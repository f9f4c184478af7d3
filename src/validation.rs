//! Field validation policy.
//!
//! Every node runs its checks right after its fields are resolved, whether they
//! came from text or from a builder. Checks run in field order and the first
//! violation is returned; there is no partial recovery.

use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::errors::{ErrorKind, InpError};
use crate::types::{Integer, Real};

/// Largest card, cell, material and universe number MCNP accepts.
pub const MAX_NUMBER: i64 = 99_999_999;

/// Largest transformation number.
pub const MAX_TRANSFORM: i64 = 999;

/// Checks for the fields of one keyword.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'k> {
    keyword: &'k str,
}

impl<'k> Validator<'k> {
    pub fn new(keyword: &'k str) -> Self {
        Self { keyword }
    }

    pub fn keyword(&self) -> &'k str {
        self.keyword
    }

    pub fn positive(&self, field: &str, value: &Real) -> Result<(), InpError> {
        if value.value() > 0.0 {
            Ok(())
        } else {
            Err(self.out_of_range(field, value, "> 0"))
        }
    }

    pub fn non_negative(&self, field: &str, value: &Real) -> Result<(), InpError> {
        if value.value() >= 0.0 {
            Ok(())
        } else {
            Err(self.out_of_range(field, value, ">= 0"))
        }
    }

    pub fn nonzero(&self, field: &str, value: &Integer) -> Result<(), InpError> {
        if value.value() != 0 {
            Ok(())
        } else {
            Err(self.out_of_range(field, value, "!= 0"))
        }
    }

    pub fn at_least(&self, field: &str, value: &Integer, min: i64) -> Result<(), InpError> {
        if value.value() >= min {
            Ok(())
        } else {
            Err(self.out_of_range(field, value, &format!(">= {min}")))
        }
    }

    pub fn int_range(
        &self,
        field: &str,
        value: &Integer,
        range: RangeInclusive<i64>,
    ) -> Result<(), InpError> {
        if range.contains(&value.value()) {
            Ok(())
        } else {
            Err(self.out_of_range(
                field,
                value,
                &format!("{}..={}", range.start(), range.end()),
            ))
        }
    }

    pub fn real_range(
        &self,
        field: &str,
        value: &Real,
        range: RangeInclusive<f64>,
    ) -> Result<(), InpError> {
        if range.contains(&value.value()) {
            Ok(())
        } else {
            Err(self.out_of_range(
                field,
                value,
                &format!("{}..={}", range.start(), range.end()),
            ))
        }
    }

    pub fn one_of(&self, field: &str, value: &Integer, allowed: &[i64]) -> Result<(), InpError> {
        if allowed.contains(&value.value()) {
            return Ok(());
        }
        let allowed: Vec<String> = allowed.iter().map(i64::to_string).collect();
        Err(InpError::new(ErrorKind::NotInSet {
            keyword: self.keyword.into(),
            field: field.into(),
            value: value.to_string(),
            allowed: format!("{{{}}}", allowed.join(", ")),
        }))
    }

    /// Number of values in a list field.
    pub fn count(&self, field: &str, count: usize, allowed: &[usize]) -> Result<(), InpError> {
        if allowed.contains(&count) {
            return Ok(());
        }
        let allowed: Vec<String> = allowed.iter().map(usize::to_string).collect();
        Err(self.invalid(
            field,
            count,
            &format!("expected {} values", allowed.join(" or ")),
        ))
    }

    pub fn required<T>(&self, field: &str, value: Option<T>) -> Result<T, InpError> {
        value.ok_or_else(|| {
            InpError::new(ErrorKind::MissingField {
                keyword: self.keyword.into(),
                field: field.into(),
            })
        })
    }

    /// `field` must be present whenever `condition` holds.
    pub fn required_when(
        &self,
        field: &str,
        present: bool,
        condition: bool,
        reason: &str,
    ) -> Result<(), InpError> {
        if condition && !present {
            Err(self.conditional(field, &format!("is required {reason}")))
        } else {
            Ok(())
        }
    }

    /// `field` must be absent whenever `condition` holds.
    pub fn forbidden_when(
        &self,
        field: &str,
        present: bool,
        condition: bool,
        reason: &str,
    ) -> Result<(), InpError> {
        if condition && present {
            Err(self.conditional(field, &format!("is not allowed {reason}")))
        } else {
            Ok(())
        }
    }

    pub fn invalid(&self, field: &str, value: impl Display, reason: &str) -> InpError {
        InpError::new(ErrorKind::InvalidValue {
            keyword: self.keyword.into(),
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        })
    }

    fn out_of_range(&self, field: &str, value: impl Display, expected: &str) -> InpError {
        InpError::new(ErrorKind::OutOfRange {
            keyword: self.keyword.into(),
            field: field.into(),
            value: value.to_string(),
            expected: expected.into(),
        })
    }

    fn conditional(&self, field: &str, reason: &str) -> InpError {
        InpError::new(ErrorKind::ConditionalField {
            keyword: self.keyword.into(),
            field: field.into(),
            reason: reason.into(),
        })
    }
}
