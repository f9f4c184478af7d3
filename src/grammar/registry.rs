//! Producers and the per-family registry.

use regex::Regex;
use serde::Serialize;

use crate::errors::{ErrorKind, InpError};
use crate::grammar::FieldSpec;
use crate::syntax::Cursor;

/// Decodes one production starting at the cursor.
pub type Decoder<T> = fn(&mut Cursor<'_>) -> Result<T, InpError>;

/// One alternative of a grammar family: a keyword, its field schema, the compiled
/// whole-production pattern and the structural decoder.
pub struct Producer<T> {
    keyword: &'static str,
    label: &'static str,
    fields: Vec<FieldSpec>,
    body: String,
    regex: Regex,
    decode: Decoder<T>,
}

impl<T> Producer<T> {
    /// Compiles `body` into the anchored gate pattern.
    pub fn new(
        family: &'static str,
        keyword: &'static str,
        label: &'static str,
        fields: Vec<FieldSpec>,
        body: String,
        decode: Decoder<T>,
    ) -> Result<Self, InpError> {
        let regex = Regex::new(&format!(r"(?i)^\s*(?:{body})\s*$")).map_err(|e| {
            InpError::new(ErrorKind::InvalidPattern {
                family: family.into(),
                keyword: keyword.into(),
                message: e.to_string(),
            })
        })?;
        Ok(Self {
            keyword,
            label,
            fields,
            body,
            regex,
            decode,
        })
    }

    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Unanchored production pattern, embeddable in other patterns.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The compiled, anchored whole-production pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn decode(&self, cursor: &mut Cursor<'_>) -> Result<T, InpError> {
        (self.decode)(cursor)
    }

    /// `px <d: real>` style usage line.
    pub fn usage(&self) -> String {
        let mut usage = self.keyword.to_string();
        for field in &self.fields {
            usage.push_str(&format!(" <{}: {}>", field.name, field.description));
        }
        usage.trim_start().to_string()
    }

    pub fn listing(&self) -> ProducerListing {
        ProducerListing {
            keyword: self.keyword,
            label: self.label,
            fields: self.fields.clone(),
            pattern: self.pattern().to_string(),
        }
    }
}

/// Serializable description of a producer.
#[derive(Debug, Clone, Serialize)]
pub struct ProducerListing {
    pub keyword: &'static str,
    pub label: &'static str,
    pub fields: Vec<FieldSpec>,
    pub pattern: String,
}

/// Every producer of one family, with keywords ordered for dispatch.
pub struct Registry<T> {
    family: &'static str,
    producers: Vec<Producer<T>>,
    /// Producer indices, longest keyword first, declaration order within a length.
    order: Vec<usize>,
}

impl<T> Registry<T> {
    /// Builds a registry; two producers with the same keyword and identical
    /// patterns are rejected since text could never select the second one.
    pub fn build(family: &'static str, producers: Vec<Producer<T>>) -> Result<Self, InpError> {
        for (i, first) in producers.iter().enumerate() {
            for second in &producers[i + 1..] {
                if first.keyword.eq_ignore_ascii_case(second.keyword) && first.body == second.body {
                    return Err(InpError::new(ErrorKind::AmbiguousGrammar {
                        family: family.into(),
                        keyword: first.keyword.into(),
                        first: first.label.into(),
                        second: second.label.into(),
                    }));
                }
            }
        }

        let mut order: Vec<usize> = (0..producers.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(producers[i].keyword.len()));

        log::debug!("built {family} registry with {} producers", producers.len());
        Ok(Self {
            family,
            producers,
            order,
        })
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    /// All producers in declaration order.
    pub fn producers(&self) -> &[Producer<T>] {
        &self.producers
    }

    /// Producers whose keyword starts `text` (ignoring case), longest keyword first.
    pub fn candidates<'r>(&'r self, text: &'r str) -> impl Iterator<Item = &'r Producer<T>> + 'r {
        self.order
            .iter()
            .map(move |&i| &self.producers[i])
            .filter(move |producer| {
                text.get(..producer.keyword.len())
                    .map_or(false, |head| head.eq_ignore_ascii_case(producer.keyword))
            })
    }

    /// `(?:body|body|...)` over every producer, for embedding option lists.
    pub fn alternation(&self) -> String {
        let bodies: Vec<&str> = self.producers.iter().map(|p| p.body.as_str()).collect();
        format!("(?:{})", bodies.join("|"))
    }

    pub fn listing(&self) -> Vec<ProducerListing> {
        self.producers.iter().map(Producer::listing).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producer(keyword: &'static str, label: &'static str, body: &str) -> Producer<&'static str> {
        Producer::new("test", keyword, label, vec![], body.to_string(), |_| Ok("decoded")).unwrap()
    }

    #[test]
    fn candidates_prefer_longer_keywords() {
        let registry = Registry::build(
            "test",
            vec![
                producer("s", "sphere", r"s\s+\d+"),
                producer("so", "origin sphere", r"so\s+\d+"),
                producer("px", "plane", r"px\s+\d+"),
            ],
        )
        .unwrap();
        let keywords: Vec<_> = registry.candidates("SO 1").map(|p| p.keyword()).collect();
        assert_eq!(keywords, vec!["so", "s"]);
    }

    #[test]
    fn identical_productions_are_rejected() {
        let error = Registry::build(
            "test",
            vec![producer("p", "first", r"p\s+\d+"), producer("P", "second", r"p\s+\d+")],
        )
        .err()
        .unwrap();
        assert_eq!(error.code(), "inp::grammar::test::ambiguous_grammar");
    }

    #[test]
    fn same_keyword_different_shapes_are_allowed() {
        let registry = Registry::build(
            "test",
            vec![producer("p", "one", r"p\s+\d+"), producer("p", "two", r"p\s+\d+\s+\d+")],
        )
        .unwrap();
        assert_eq!(registry.producers().len(), 2);
        assert!(registry.producers()[1].is_match("p 1 2"));
        assert!(!registry.producers()[0].is_match("p 1 2"));
    }

    #[test]
    fn bad_pattern_is_reported() {
        let error = Producer::<()>::new("test", "x", "broken", vec![], "(".into(), |_| Ok(()))
            .err()
            .unwrap();
        assert!(matches!(error.kind, ErrorKind::InvalidPattern { .. }));
    }
}
