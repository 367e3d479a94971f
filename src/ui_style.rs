//! Terminal styling for user-facing status lines.
//!
//! Reports themselves are plain text so they stay byte-for-byte stable;
//! only the messages around them (saved paths, summaries, version status)
//! go through these helpers.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Semantic color palette for consistent UI styling
pub struct Colors;

impl Colors {
    /// Success color (green)
    pub fn success<D: Display>(text: D) -> String {
        format!("{}", text.green())
    }

    /// Error/Failure color (red)
    pub fn error<D: Display>(text: D) -> String {
        format!("{}", text.red())
    }

    /// Warning color (yellow)
    pub fn warning<D: Display>(text: D) -> String {
        format!("{}", text.yellow())
    }

    /// Informational color (cyan)
    pub fn info<D: Display>(text: D) -> String {
        format!("{}", text.cyan())
    }

    /// Paths and versions (bright black)
    pub fn code<D: Display>(text: D) -> String {
        format!("{}", text.bright_black())
    }

    pub fn emphasis<D: Display>(text: D) -> String {
        format!("{}", text.bold())
    }
}

/// Standardized output prefixes/symbols
pub struct Symbols;

impl Symbols {
    pub fn success() -> &'static str {
        "✓"
    }

    pub fn error() -> &'static str {
        "❌"
    }

    pub fn warning() -> &'static str {
        "⚠️"
    }

    pub fn info() -> &'static str {
        "ℹ️"
    }

    /// Shown next to a validation run.
    pub fn check() -> &'static str {
        "🔍"
    }

    /// Shown next to version changes.
    pub fn version() -> &'static str {
        "📦"
    }
}

/// Helper functions for printing styled messages to stderr
pub struct Print;

impl Print {
    pub fn success(msg: &str) {
        eprintln!("{} {}", Colors::success(Symbols::success()), msg);
    }

    pub fn error(msg: &str) {
        eprintln!("{} {}", Colors::error(Symbols::error()), msg);
    }

    pub fn warning(msg: &str) {
        eprintln!("{} {}", Colors::warning(Symbols::warning()), msg);
    }

    pub fn info(msg: &str) {
        eprintln!("{} {}", Colors::info(Symbols::info()), msg);
    }

    pub fn section(title: impl Display) {
        eprintln!("\n{}", Colors::info(format!("❯ {}", Colors::emphasis(title))));
    }
}

/// One-line outcome of a validation, e.g. `2 errors, 1 warning`.
pub fn summary_line(errors: usize, warnings: usize) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{} {}", n, word)
        } else {
            format!("{} {}s", n, word)
        }
    };
    format!("{}, {}", plural(errors, "error"), plural(warnings, "warning"))
}
