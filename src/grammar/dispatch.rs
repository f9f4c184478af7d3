//! Keyword dispatch.
//!
//! Whole-line parsing narrows the family's producers by leading keyword (longest
//! first), gates each candidate on its anchored production pattern, then decodes
//! structurally. The first candidate that decodes the whole line wins. A
//! semantics error ends the search at once: the text matched a grammar and its
//! values are wrong, so trying other grammars would only hide the real problem.

use log::trace;

use crate::errors::{ErrorKind, ErrorReporting, InpError};
use crate::grammar::{Grammar, Registry};
use crate::syntax::Cursor;

/// Parses one complete logical line as a member of family `T`.
pub fn parse<T: Grammar>(text: &str) -> Result<T, InpError> {
    let registry = T::registry()?;
    let text = text.trim();
    let mut deferred: Option<InpError> = None;

    for producer in registry.candidates(text) {
        if !producer.is_match(text) {
            trace!("{} '{}' ({}): pattern rejects {text:?}", T::FAMILY, producer.keyword(), producer.label());
            continue;
        }
        let mut cursor = Cursor::new(text);
        let decoded = producer.decode(&mut cursor).and_then(|node| {
            cursor.finish()?;
            Ok(node)
        });
        match decoded {
            Ok(node) => {
                trace!("{} '{}' ({}): accepted", T::FAMILY, producer.keyword(), producer.label());
                return Ok(node);
            }
            Err(error) if error.is_syntax() => {
                trace!("{} '{}' ({}): {error}", T::FAMILY, producer.keyword(), producer.label());
                deferred.get_or_insert(error);
            }
            Err(error) => return Err(error),
        }
    }

    Err(deferred.unwrap_or_else(|| no_match(registry, text)))
}

/// Decodes one member of family `T` at the cursor, leaving the cursor after it.
///
/// Used for option lists, where the production is followed by more text. Returns
/// `Ok(None)` when no producer decodes a complete word-bounded prefix.
pub fn parse_prefix<T: Grammar>(cursor: &mut Cursor<'_>) -> Result<Option<T>, InpError> {
    let registry = T::registry()?;
    let rest = cursor.rest();
    for producer in registry.candidates(rest) {
        let checkpoint = cursor.checkpoint();
        match producer.decode(cursor) {
            Ok(node) if cursor.at_word_end() => return Ok(Some(node)),
            Ok(_) => cursor.restore(checkpoint),
            Err(error) if error.is_syntax() => cursor.restore(checkpoint),
            Err(error) => return Err(error),
        }
    }
    Ok(None)
}

fn no_match<T>(registry: &Registry<T>, text: &str) -> InpError {
    let source = Cursor::new(text);
    let error = source.report(
        ErrorKind::NoMatchingGrammar {
            family: registry.family().into(),
            text: text.into(),
        },
        (0..text.len()).into(),
    );
    let usages: Vec<String> = registry
        .candidates(text)
        .filter(|producer| !producer.keyword().is_empty())
        .map(|producer| producer.usage())
        .collect();
    if usages.is_empty() {
        error
    } else {
        error.with_help(format!("expected {}", usages.join(" or ")))
    }
}
