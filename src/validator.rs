//! Qt style sheet validation.
//!
//! Validation is a fixed sequence of heuristic passes over one text buffer:
//! comment stripping first, then syntax, property, selector, performance and
//! value checks. None of the passes is a real CSS parser; each one looks for
//! a specific pattern and reports what it finds, so false positives on
//! unusual formatting are expected.

use crate::diagnostic::{Category, Diagnostic};
use crate::rules::RuleSet;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, trace};

lazy_static! {
    // Block comment; an unterminated one runs to the end of the input.
    static ref RE_COMMENT: Regex = Regex::new(r"(?s)/\*.*?(?:\*/|\z)").unwrap();

    // `name: value;` where the value stays inside one declaration.
    static ref RE_PROPERTY: Regex = Regex::new(r"([a-zA-Z-]+)\s*:\s*([^;{}]+);").unwrap();

    static ref RE_HEX_COLOR: Regex = Regex::new(r"#[0-9a-fA-F]{3,6}").unwrap();
}

/// Result of removing block comments from a style sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedText {
    /// Input with every comment character blanked out. Newlines are kept,
    /// so line and column positions match the original text.
    pub text: String,
    /// Byte offset (in the original text) of a `/*` that is never closed.
    pub unclosed_comment: Option<usize>,
}

/// Blanks out `/* ... */` comments while keeping the layout of the text.
pub fn strip_comments(content: &str) -> StrippedText {
    let mut text = String::with_capacity(content.len());
    let mut unclosed_comment = None;
    let mut last = 0;

    for comment in RE_COMMENT.find_iter(content) {
        text.push_str(&content[last..comment.start()]);
        text.extend(
            comment
                .as_str()
                .chars()
                .map(|c| if c == '\n' { '\n' } else { ' ' }),
        );
        let body = comment.as_str();
        if body.len() < 4 || !body.ends_with("*/") {
            unclosed_comment = Some(comment.start());
        }
        last = comment.end();
    }
    text.push_str(&content[last..]);

    StrippedText {
        text,
        unclosed_comment,
    }
}

/// Byte offsets of line starts, used to turn match offsets into positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// 1-based (line, column) of a byte offset in `text`, the text the index
    /// was built from. Columns count characters.
    pub fn position(&self, text: &str, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts[line - 1];
        let column = text[line_start..offset].chars().count() + 1;
        (line, column)
    }
}

/// Accumulator for one validation call.
#[derive(Debug, Default)]
pub(crate) struct ValidationRun {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationRun {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        trace!(
            "{} at {}:{}: {}",
            diagnostic.category,
            diagnostic.line,
            diagnostic.column,
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Checks Qt style sheets against a [`RuleSet`].
///
/// The validator keeps no state between calls; `validate_content` takes
/// `&self` and may be called from several threads at once.
#[derive(Debug, Clone)]
pub struct StylesheetValidator {
    rules: Arc<RuleSet>,
}

impl Default for StylesheetValidator {
    fn default() -> Self {
        Self::new(RuleSet::builtin())
    }
}

impl StylesheetValidator {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Reads and validates a file.
    ///
    /// An unreadable file yields a single `file_error` diagnostic and no
    /// other check runs.
    pub fn validate_file(&self, path: &Path, strict: bool) -> Vec<Diagnostic> {
        match fs::read_to_string(path) {
            Ok(content) => {
                info!("Validating {}", path.display());
                self.validate_content(&content, strict)
            }
            Err(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                vec![Diagnostic::file_error(format!(
                    "cannot read file {}: {}",
                    path.display(),
                    e
                ))]
            }
        }
    }

    /// Validates style sheet text and returns the findings in discovery order.
    pub fn validate_content(&self, content: &str, strict: bool) -> Vec<Diagnostic> {
        let mut run = ValidationRun::default();

        let stripped = strip_comments(content);
        if let Some(offset) = stripped.unclosed_comment {
            // Blanked comments may change byte lengths, so index the original text.
            let (line, column) = LineIndex::new(content).position(content, offset);
            run.push(Diagnostic::new(
                Category::UnclosedComment,
                line,
                column,
                "unclosed comment runs to end of file",
            ));
        }
        let text = stripped.text.as_str();
        let lines = LineIndex::new(text);

        self.check_syntax(text, &mut run);
        self.check_properties(text, &lines, strict, &mut run);
        self.check_selectors(text, &lines, &mut run);
        self.check_performance(text, &mut run);
        self.check_values(text, &lines, &mut run);

        debug!("Validation finished with {} diagnostic(s)", run.len());
        run.into_diagnostics()
    }

    /// Brace matching and the missing-semicolon heuristic.
    ///
    /// A missing semicolon is reported at the last non-blank character of the
    /// line, counted from the start of the line including its indentation.
    pub(crate) fn check_syntax(&self, text: &str, run: &mut ValidationRun) {
        let mut open_braces: Vec<(usize, usize)> = Vec::new();

        for (index, raw_line) in text.split('\n').enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            for (column, ch) in raw_line.chars().enumerate() {
                match ch {
                    '{' => open_braces.push((line_number, column + 1)),
                    '}' => {
                        if open_braces.pop().is_none() {
                            run.push(Diagnostic::new(
                                Category::SyntaxError,
                                line_number,
                                column + 1,
                                "unmatched closing brace",
                            ));
                        }
                    }
                    _ => {}
                }
            }

            if !line.contains('{')
                && !line.contains('}')
                && line.contains(':')
                && !line.ends_with(';')
                && !line.ends_with('{')
            {
                run.push(Diagnostic::new(
                    Category::MissingSemicolon,
                    line_number,
                    raw_line.trim_end().chars().count(),
                    "missing semicolon at end of property line",
                ));
            }
        }

        for (line, column) in open_braces {
            run.push(Diagnostic::new(
                Category::UnclosedBracket,
                line,
                column,
                "unclosed opening brace",
            ));
        }
    }

    pub(crate) fn check_properties(&self, text: &str, lines: &LineIndex, strict: bool, run: &mut ValidationRun) {
        // Property names are only checked on request.
        if !strict {
            return;
        }

        for caps in RE_PROPERTY.captures_iter(text) {
            let Some(name) = caps.get(1) else { continue };
            if self.rules.is_property(name.as_str()) {
                continue;
            }
            let (line, column) = lines.position(text, name.start());
            run.push(Diagnostic::new(
                Category::UnknownProperty,
                line,
                column,
                format!("unknown property: {}", name.as_str()),
            ));
        }
    }

    pub(crate) fn check_selectors(&self, text: &str, lines: &LineIndex, run: &mut ValidationRun) {
        let mut header_start = 0;
        for (offset, ch) in text.char_indices() {
            match ch {
                '{' => {
                    self.check_selector_header(text, lines, header_start, offset, run);
                    header_start = offset + 1;
                }
                '}' | ';' => header_start = offset + 1,
                _ => {}
            }
        }
    }

    fn check_selector_header(
        &self,
        text: &str,
        lines: &LineIndex,
        start: usize,
        end: usize,
        run: &mut ValidationRun,
    ) {
        let header = &text[start..end];
        let selector = header.trim();
        if selector.is_empty() {
            return;
        }

        let unknown: Vec<&str> = selector
            .split(',')
            .flat_map(|part| state_segments(part.trim()))
            .filter(|segment| !self.rules.is_widget(segment) && !self.rules.is_pseudo_state(segment))
            .collect();
        if unknown.is_empty() {
            return;
        }

        let leading = header.len() - header.trim_start().len();
        let (line, column) = lines.position(text, start + leading);
        for segment in unknown {
            run.push(Diagnostic::new(
                Category::UnknownPseudoState,
                line,
                column,
                format!("unknown pseudo-state: :{}", segment),
            ));
        }
    }

    pub(crate) fn check_performance(&self, text: &str, run: &mut ValidationRun) {
        for (index, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let line_number = index + 1;
            let column = raw_line.chars().take_while(|c| c.is_whitespace()).count() + 1;

            let head = line.split_whitespace().take(5).collect::<Vec<_>>().join(" ");
            if head.matches(' ').count() > 3 && !line.contains(':') {
                run.push(Diagnostic::new(
                    Category::ComplexSelector,
                    line_number,
                    column,
                    "selector too complex, may impact performance",
                ));
            }

            if let Some((before, _)) = line.split_once('{') {
                if before.trim() == "*" {
                    run.push(Diagnostic::new(
                        Category::UniversalSelector,
                        line_number,
                        column,
                        "avoid the universal selector, it impacts performance",
                    ));
                }
            }
        }
    }

    pub(crate) fn check_values(&self, text: &str, lines: &LineIndex, run: &mut ValidationRun) {
        for color in RE_HEX_COLOR.find_iter(text) {
            // `#RGB` and `#RRGGBB` are the accepted lengths.
            let len = color.as_str().len();
            if len == 4 || len == 7 {
                continue;
            }
            let (line, column) = lines.position(text, color.start());
            run.push(Diagnostic::new(
                Category::InvalidColor,
                line,
                column,
                format!("invalid color value: {}", color.as_str()),
            ));
        }
    }
}

/// Splits one selector at `:` and returns the segments that name a type or a
/// pseudo-state. Segments introduced by `::` are sub-controls and are left
/// out; a leading `!` negation is dropped.
pub(crate) fn state_segments(selector: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = selector;
    let mut sub_control = false;

    loop {
        let (segment, next) = match rest.find(':') {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        let segment = segment.trim();
        let segment = segment.strip_prefix('!').unwrap_or(segment);
        if !segment.is_empty() && !sub_control {
            segments.push(segment);
        }

        match next {
            Some(after) => match after.strip_prefix(':') {
                Some(sub) => {
                    sub_control = true;
                    rest = sub;
                }
                None => {
                    sub_control = false;
                    rest = after;
                }
            },
            None => break,
        }
    }

    segments
}
