//! # Card Text Handling
//!
//! Everything that touches raw card text without knowing any grammar:
//!
//! - **`preprocess`**: physical lines to one logical line plus out-of-band comments
//! - **`cursor`**: the scanning position used by every field decoder
//! - **`writer`**: the rendering sink used by every field encoder
//! - **`format`**: re-wrapping a rendered logical line and re-attaching comments

pub mod cursor;
pub mod format;
pub mod preprocess;
pub mod writer;

pub use cursor::{Cursor, Sep};
pub use format::layout;
pub use preprocess::{preprocess, Comment, LogicalLine, Trivia};
pub use writer::Writer;
