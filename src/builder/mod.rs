//! # Builder Layer
//!
//! Programmatic construction of the same typed tree the parser produces. Field
//! slots take a [`RawValue`] (text, integer, float or an already-typed token) and
//! every slot is normalized through the field's own grammar, then the node's
//! validation runs. Builders raise semantics errors only: there is no source
//! text to be malformed.
//!
//! Nodes are immutable. To change one, take its builder with `to_builder()`,
//! modify it and build again; card builders carry the original comments along.

pub mod cards;
pub mod raw;

pub use cards::{CellCardBuilder, DataCardBuilder, SurfaceCardBuilder};
pub use raw::{list, resolve, FromRaw, RawValue};
