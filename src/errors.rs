//! INP Error Handling - Unified Encapsulated API
//!
//! Every failure the engine can produce is an [`InpError`]: a tagged [`ErrorKind`]
//! (what went wrong), the card text it happened in (where), and optional help
//! (how to fix it). Kinds are partitioned by [`ErrorKind::category`] into syntax
//! errors (text matched no grammar) and semantics errors (text matched, values are
//! illegal). A third, grammar-construction category covers registry build failures.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Names a piece of card text for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Context for a single logical card line.
    pub fn card(content: impl Into<String>) -> Self {
        Self::new("card", content)
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single error type - kind, location, help.
#[derive(Debug)]
pub struct InpError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened
    pub source_info: SourceInfo,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// All failure modes. Syntax kinds come first, then semantics, then grammar construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    // Syntax errors - the text does not fit any grammar
    #[error("no {family} grammar matches '{text}'")]
    NoMatchingGrammar { family: String, text: String },
    #[error("invalid {literal_type} '{value}'")]
    InvalidLiteral { literal_type: String, value: String },
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },
    #[error("missing {element}")]
    MissingElement { element: String },
    #[error("unexpected trailing input '{text}'")]
    TrailingInput { text: String },

    // Semantics errors - the text parsed, the values are not legal
    #[error("{keyword}: required field '{field}' is absent")]
    MissingField { keyword: String, field: String },
    #[error("{keyword}: {field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        keyword: String,
        field: String,
        value: String,
        expected: String,
    },
    #[error("{keyword}: {field} = {value} is not one of {allowed}")]
    NotInSet {
        keyword: String,
        field: String,
        value: String,
        allowed: String,
    },
    #[error("{keyword}: {field} {reason}")]
    ConditionalField {
        keyword: String,
        field: String,
        reason: String,
    },
    #[error("{keyword}: invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        keyword: String,
        field: String,
        value: String,
        reason: String,
    },

    // Grammar construction errors - the registry itself is inconsistent
    #[error("{family} producers '{first}' and '{second}' share keyword '{keyword}' with identical grammars")]
    AmbiguousGrammar {
        family: String,
        keyword: String,
        first: String,
        second: String,
    },
    #[error("{family} producer '{keyword}' has an invalid pattern: {message}")]
    InvalidPattern {
        family: String,
        keyword: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Semantics,
    Grammar,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Syntax => "syntax",
            ErrorCategory::Semantics => "semantics",
            ErrorCategory::Grammar => "grammar",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoMatchingGrammar { .. }
            | Self::InvalidLiteral { .. }
            | Self::UnexpectedToken { .. }
            | Self::MissingElement { .. }
            | Self::TrailingInput { .. } => ErrorCategory::Syntax,

            Self::MissingField { .. }
            | Self::OutOfRange { .. }
            | Self::NotInSet { .. }
            | Self::ConditionalField { .. }
            | Self::InvalidValue { .. } => ErrorCategory::Semantics,

            Self::AmbiguousGrammar { .. } | Self::InvalidPattern { .. } => ErrorCategory::Grammar,
        }
    }

    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::NoMatchingGrammar { .. } => "no_matching_grammar",
            Self::InvalidLiteral { .. } => "invalid_literal",
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::MissingElement { .. } => "missing_element",
            Self::TrailingInput { .. } => "trailing_input",
            Self::MissingField { .. } => "missing_field",
            Self::OutOfRange { .. } => "out_of_range",
            Self::NotInSet { .. } => "not_in_set",
            Self::ConditionalField { .. } => "conditional_field",
            Self::InvalidValue { .. } => "invalid_value",
            Self::AmbiguousGrammar { .. } => "ambiguous_grammar",
            Self::InvalidPattern { .. } => "invalid_pattern",
        }
    }

    /// The keyword or grammar family the error is about.
    pub fn context(&self) -> &str {
        match self {
            Self::NoMatchingGrammar { family, .. }
            | Self::AmbiguousGrammar { family, .. } => family.as_str(),
            Self::InvalidLiteral { literal_type, .. } => literal_type.as_str(),
            Self::UnexpectedToken { .. } | Self::MissingElement { .. } | Self::TrailingInput { .. } => {
                "card"
            }
            Self::MissingField { keyword, .. }
            | Self::OutOfRange { keyword, .. }
            | Self::NotInSet { keyword, .. }
            | Self::ConditionalField { keyword, .. }
            | Self::InvalidValue { keyword, .. }
            | Self::InvalidPattern { keyword, .. } => keyword.as_str(),
        }
    }

    /// Field name for semantics errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::NotInSet { field, .. }
            | Self::ConditionalField { field, .. }
            | Self::InvalidValue { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }

    /// The offending raw text or value, when there is one.
    pub fn offending(&self) -> Option<&str> {
        match self {
            Self::NoMatchingGrammar { text, .. } | Self::TrailingInput { text } => Some(text.as_str()),
            Self::InvalidLiteral { value, .. }
            | Self::OutOfRange { value, .. }
            | Self::NotInSet { value, .. }
            | Self::InvalidValue { value, .. } => Some(value.as_str()),
            Self::UnexpectedToken { found, .. } => Some(found.as_str()),
            _ => None,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Syntax => "does not parse",
            ErrorCategory::Semantics => "invalid value",
            ErrorCategory::Grammar => "grammar conflict",
        }
    }
}

/// Where an error happened. Builder-layer errors have no source text.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Option<Arc<NamedSource<String>>>,
    pub primary_span: SourceSpan,
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl InpError {
    /// An error with no source text attached (builder layer, validators, registry).
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            source_info: SourceInfo {
                source: None,
                primary_span: unspanned(),
            },
            diagnostic_info: DiagnosticInfo::default(),
        }
    }

    /// An error located in `source` at `span`.
    pub fn located(kind: ErrorKind, source: &SourceContext, span: SourceSpan) -> Self {
        Self {
            kind,
            source_info: SourceInfo {
                source: Some(source.to_named_source()),
                primary_span: span,
            },
            diagnostic_info: DiagnosticInfo::default(),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }

    /// Attaches `text` as the source, spanning all of it, unless a source is already present.
    pub fn with_source_if_absent(mut self, text: &str) -> Self {
        if self.source_info.source.is_none() {
            self.source_info.source = Some(SourceContext::card(text).to_named_source());
            self.source_info.primary_span = (0..text.len()).into();
        }
        self
    }

    /// Renames the attached source (e.g. to `deck.inp:12`), keeping content and span.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if let Some(source) = &self.source_info.source {
            let content = source.inner().clone();
            self.source_info.source = Some(SourceContext::new(name, content).to_named_source());
        }
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn is_syntax(&self) -> bool {
        self.category() == ErrorCategory::Syntax
    }

    pub fn is_semantics(&self) -> bool {
        self.category() == ErrorCategory::Semantics
    }

    /// Machine-checkable code, `inp::<category>::<context>::<failure>`.
    pub fn code(&self) -> String {
        let context: String = self
            .kind
            .context()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        format!(
            "inp::{}::{}::{}",
            self.category(),
            context,
            self.kind.code_suffix()
        )
    }

    /// The card text this error was raised against, if any.
    pub fn raw_text(&self) -> Option<&str> {
        self.source_info
            .source
            .as_ref()
            .map(|source| source.inner().as_str())
    }
}

impl std::error::Error for InpError {}

impl fmt::Display for InpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            ErrorCategory::Syntax => write!(f, "Syntax error: {}", self.kind),
            ErrorCategory::Semantics => write!(f, "Semantics error: {}", self.kind),
            ErrorCategory::Grammar => write!(f, "Grammar error: {}", self.kind),
        }
    }
}

impl Diagnostic for InpError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(InpError::code(self)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.source_info.source.as_ref()?;
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source_info
            .source
            .as_deref()
            .map(|source| source as &dyn miette::SourceCode)
    }
}

// ============================================================================
// ERROR REPORTING
// ============================================================================

/// Anything that knows the text it is reading can locate errors in it.
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> InpError;

    fn unexpected_token(&self, expected: &str, found: &str, span: SourceSpan) -> InpError {
        self.report(
            ErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    fn missing_element(&self, element: &str, span: SourceSpan) -> InpError {
        self.report(
            ErrorKind::MissingElement {
                element: element.into(),
            },
            span,
        )
    }

    fn invalid_literal(&self, literal_type: &str, value: &str, span: SourceSpan) -> InpError {
        self.report(
            ErrorKind::InvalidLiteral {
                literal_type: literal_type.into(),
                value: value.into(),
            },
            span,
        )
    }
}

impl ErrorReporting for SourceContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> InpError {
        InpError::located(kind, self, span)
    }
}

/// Placeholder span for errors not tied to a text location.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

/// Prints an InpError with full miette diagnostics.
pub fn print_error(error: InpError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantics_code_names_keyword_and_failure() {
        let error = InpError::new(ErrorKind::OutOfRange {
            keyword: "so".into(),
            field: "r".into(),
            value: "-1".into(),
            expected: "> 0".into(),
        });
        assert!(error.is_semantics());
        assert_eq!(error.code(), "inp::semantics::so::out_of_range");
        assert_eq!(error.kind.field(), Some("r"));
        assert_eq!(error.kind.offending(), Some("-1"));
    }

    #[test]
    fn syntax_code_uses_family_with_underscores() {
        let error = InpError::new(ErrorKind::NoMatchingGrammar {
            family: "cell option".into(),
            text: "bogus".into(),
        });
        assert!(error.is_syntax());
        assert_eq!(error.code(), "inp::syntax::cell_option::no_matching_grammar");
    }

    #[test]
    fn source_attached_once() {
        let error = InpError::new(ErrorKind::MissingElement {
            element: "number".into(),
        })
        .with_source_if_absent("px 1")
        .with_source_if_absent("other");
        assert_eq!(error.raw_text(), Some("px 1"));
        let renamed = error.renamed("deck.inp:3");
        assert_eq!(renamed.raw_text(), Some("px 1"));
    }

    #[test]
    fn display_prefixes_category() {
        let error = InpError::new(ErrorKind::MissingField {
            keyword: "px".into(),
            field: "d".into(),
        });
        assert_eq!(
            error.to_string(),
            "Semantics error: px: required field 'd' is absent"
        );
    }
}
