pub use crate::cards::init;
pub use crate::errors::{ErrorCategory, ErrorKind, InpError};

pub mod builder;
pub mod cards;
pub mod cli;
pub mod config;
pub mod deck;
pub mod errors;
pub mod grammar;
pub mod syntax;
pub mod types;
pub mod validation;
