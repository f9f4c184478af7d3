//! # Grammar Registry and Dispatch
//!
//! A grammar family is a closed enum with one variant per producer, for example
//! every surface kind or every cell option. Families are declared with
//! [`keyword_grammar!`](crate::grammar::declare), which generates the node types, their
//! builders, the producers and a lazily built static [`Registry`].
//!
//! ## Dispatch
//!
//! - Candidates are the producers whose keyword starts the text, case-insensitively,
//!   longest keyword first and in declaration order within a keyword.
//! - Each candidate's anchored whole-production pattern must match; the structural
//!   decoder then reads the fields and must consume the whole line.
//! - Producers that share a keyword are told apart by shape. If two could both
//!   match, the first declared wins. Identical productions under one keyword are
//!   rejected when the registry is built.
//!
//! ## Registry lifetime
//!
//! Registries are built once, on first use or by [`crate::init`], and are
//! read-only afterwards. Parsing from several threads needs no locking.

use serde::Serialize;
use std::fmt;

use crate::errors::InpError;
use crate::syntax::Writer;

pub mod declare;
pub mod dispatch;
pub mod field;
pub mod registry;

pub(crate) use declare::keyword_grammar;
pub use dispatch::{parse, parse_prefix};
pub use field::{Field, FieldSpec, SepSequence};
pub use registry::{Decoder, Producer, ProducerListing, Registry};

/// A family of productions sharing one dispatch table.
pub trait Grammar: Sized + Clone + fmt::Debug + PartialEq + Serialize + 'static {
    /// Family name used in diagnostics, e.g. `"surface"`.
    const FAMILY: &'static str;

    /// Whether the first value may be joined to its keyword with `=`.
    const ASSIGN: bool;

    fn registry() -> Result<&'static Registry<Self>, InpError>;

    fn keyword(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn render(&self, out: &mut Writer);

    fn to_text(&self) -> String {
        let mut out = Writer::new();
        self.render(&mut out);
        out.finish()
    }

    fn from_text(text: &str) -> Result<Self, InpError> {
        dispatch::parse(text)
    }
}

/// Producer listing of one family.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyListing {
    pub family: &'static str,
    pub producers: Vec<ProducerListing>,
}

impl FamilyListing {
    pub fn of<T: Grammar>() -> Result<Self, InpError> {
        Ok(Self {
            family: T::FAMILY,
            producers: T::registry()?.listing(),
        })
    }
}
