use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic. The order of the variants is the order in
/// which the text report lists its groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of problem a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SyntaxError,
    UnclosedBracket,
    UnclosedComment,
    MissingSemicolon,
    UnknownProperty,
    UnknownPseudoState,
    ComplexSelector,
    UniversalSelector,
    InvalidColor,
    FileError,
}

impl Category {
    /// Severity is a property of the category, never chosen per finding.
    pub fn severity(self) -> Severity {
        match self {
            Category::SyntaxError | Category::UnclosedBracket | Category::FileError => {
                Severity::Error
            }
            Category::UnclosedComment
            | Category::MissingSemicolon
            | Category::UnknownProperty
            | Category::UnknownPseudoState
            | Category::ComplexSelector
            | Category::UniversalSelector
            | Category::InvalidColor => Severity::Warning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::SyntaxError => "syntax_error",
            Category::UnclosedBracket => "unclosed_bracket",
            Category::UnclosedComment => "unclosed_comment",
            Category::MissingSemicolon => "missing_semicolon",
            Category::UnknownProperty => "unknown_property",
            Category::UnknownPseudoState => "unknown_pseudo_state",
            Category::ComplexSelector => "complex_selector",
            Category::UniversalSelector => "universal_selector",
            Category::InvalidColor => "invalid_color",
            Category::FileError => "file_error",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding produced by one validation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub category: Category,
    /// 1-based line in the original text (0 for file errors).
    pub line: usize,
    /// 1-based character column (0 for file errors).
    pub column: usize,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(category: Category, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            category,
            line,
            column,
            message: message.into(),
            severity: category.severity(),
        }
    }

    /// The diagnostic returned in place of all others when the input cannot be read.
    pub fn file_error(message: impl Into<String>) -> Self {
        Self::new(Category::FileError, 0, 0, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Number of diagnostics with the given severity.
pub fn count_severity(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}

/// True when the list contains at least one error-severity diagnostic.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
