#[cfg(test)]
mod tests {
    use crate::diagnostic::{Category, Diagnostic, Severity};
    use crate::rules::RuleSet;
    use crate::validator::{state_segments, strip_comments, LineIndex, StylesheetValidator};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CLEAN_SHEET: &str = r#"/* Main window */
QMainWindow {
    background-color: #2D2D30;
}

QPushButton {
    color: #fff;
    border: 1px solid #555555;
    border-radius: 4px;
    padding: 4px 8px;
}

QPushButton:hover {
    background-color: #1E8AC7;
}

QPushButton:pressed, QPushButton:checked {
    background-color: #005A9E;
}

QCheckBox::indicator:checked {
    width: 12px;
}
"#;

    fn of_category(diagnostics: &[Diagnostic], category: Category) -> Vec<&Diagnostic> {
        diagnostics.iter().filter(|d| d.category == category).collect()
    }

    fn validate(content: &str, strict: bool) -> Vec<Diagnostic> {
        StylesheetValidator::default().validate_content(content, strict)
    }

    #[test]
    fn test_clean_sheet_has_no_diagnostics() {
        assert!(validate(CLEAN_SHEET, false).is_empty());
        assert!(validate(CLEAN_SHEET, true).is_empty());
    }

    #[test]
    fn test_balanced_braces_no_brace_errors() {
        let content = "QPushButton {\n  color: red;\n}\nQLabel { color: blue; }\nQMenu {\n}\n";
        let diagnostics = validate(content, false);
        assert!(of_category(&diagnostics, Category::SyntaxError).is_empty());
        assert!(of_category(&diagnostics, Category::UnclosedBracket).is_empty());
    }

    #[test]
    fn test_unclosed_brace_reported_at_brace() {
        let content = "QLabel { color: red; }\nQPushButton {\n  color: red;\n";
        let diagnostics = validate(content, false);
        let unclosed = of_category(&diagnostics, Category::UnclosedBracket);
        assert_eq!(unclosed.len(), 1);
        assert_eq!((unclosed[0].line, unclosed[0].column), (2, 13));
        assert_eq!(unclosed[0].severity, Severity::Error);
        assert_eq!(unclosed[0].message, "unclosed opening brace");
    }

    #[test]
    fn test_stray_closing_brace() {
        let content = "QLabel { color: red; }\n  }\n";
        let diagnostics = validate(content, false);
        let stray = of_category(&diagnostics, Category::SyntaxError);
        assert_eq!(stray.len(), 1);
        assert_eq!((stray[0].line, stray[0].column), (2, 3));
        assert_eq!(stray[0].message, "unmatched closing brace");
        assert!(of_category(&diagnostics, Category::UnclosedBracket).is_empty());
    }

    #[test]
    fn test_missing_semicolon() {
        let diagnostics = validate("QPushButton {\n  color: red\n}", false);
        let missing = of_category(&diagnostics, Category::MissingSemicolon);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].line, 2);
        assert_eq!(missing[0].column, 12);
        assert_eq!(missing[0].severity, Severity::Warning);
    }

    #[test]
    fn test_missing_semicolon_ignores_block_lines() {
        let diagnostics = validate("QPushButton:hover {\n  color: red;\n}\n", false);
        assert!(of_category(&diagnostics, Category::MissingSemicolon).is_empty());
    }

    #[test]
    fn test_non_strict_never_reports_unknown_property() {
        let content = "QLabel {\n  bogus-property: 1px;\n  another-fake: red;\n}\n";
        let diagnostics = validate(content, false);
        assert!(of_category(&diagnostics, Category::UnknownProperty).is_empty());
    }

    #[test]
    fn test_strict_reports_unknown_property() {
        let diagnostics = validate("QLabel { bogus-prop: 1px; color: red; }", true);
        let unknown = of_category(&diagnostics, Category::UnknownProperty);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].message, "unknown property: bogus-prop");
        assert_eq!((unknown[0].line, unknown[0].column), (1, 10));
    }

    #[test]
    fn test_strict_does_not_read_selector_as_property() {
        let diagnostics = validate("QLabel:hover { colr: red; }", true);
        let unknown = of_category(&diagnostics, Category::UnknownProperty);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].message, "unknown property: colr");
        assert_eq!(unknown[0].column, 16);
    }

    #[test]
    fn test_non_hex_color_is_not_matched() {
        let diagnostics = validate("QLabel { color: #ZZZ; }", false);
        assert!(of_category(&diagnostics, Category::InvalidColor).is_empty());
    }

    #[test]
    fn test_five_digit_color_is_invalid() {
        let diagnostics = validate("QLabel { color: #12345; }", false);
        let invalid = of_category(&diagnostics, Category::InvalidColor);
        assert_eq!(invalid.len(), 1);
        assert!(invalid[0].message.contains("#12345"));
        assert_eq!((invalid[0].line, invalid[0].column), (1, 17));
    }

    #[test]
    fn test_valid_color_lengths() {
        let content = "QLabel { color: #123; background-color: #a1B2c3; }";
        assert!(of_category(&validate(content, false), Category::InvalidColor).is_empty());

        let four = validate("QLabel { color: #1234; }", false);
        assert_eq!(of_category(&four, Category::InvalidColor).len(), 1);
    }

    #[test]
    fn test_unknown_pseudo_state() {
        let diagnostics = validate("QPushButton:hovered { color: red; }", false);
        let unknown = of_category(&diagnostics, Category::UnknownPseudoState);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].message, "unknown pseudo-state: :hovered");
        assert_eq!((unknown[0].line, unknown[0].column), (1, 1));
    }

    #[test]
    fn test_selector_position_after_previous_block() {
        let diagnostics = validate("QLabel { color: red; }\n  QPushButton:bogus {\n}\n", false);
        let unknown = of_category(&diagnostics, Category::UnknownPseudoState);
        assert_eq!(unknown.len(), 1);
        assert_eq!((unknown[0].line, unknown[0].column), (2, 3));
    }

    #[test]
    fn test_sub_controls_and_negation_are_accepted() {
        let content = "QCheckBox::indicator:checked { width: 10px; }\nQPushButton:!enabled { color: gray; }\n";
        let diagnostics = validate(content, false);
        assert!(of_category(&diagnostics, Category::UnknownPseudoState).is_empty());
    }

    #[test]
    fn test_custom_widget_type_is_flagged_unless_configured() {
        let content = "MyWidget { color: red; }";
        let diagnostics = validate(content, false);
        assert_eq!(of_category(&diagnostics, Category::UnknownPseudoState).len(), 1);

        let rules = RuleSet::extended(&[], &[], &["MyWidget".to_string()]);
        let diagnostics = StylesheetValidator::new(rules).validate_content(content, false);
        assert!(of_category(&diagnostics, Category::UnknownPseudoState).is_empty());
    }

    #[test]
    fn test_complex_selector() {
        let content = "QWidget QFrame QGroupBox QLabel QPushButton {\n  color: red;\n}\n";
        let diagnostics = validate(content, false);
        let complex = of_category(&diagnostics, Category::ComplexSelector);
        assert_eq!(complex.len(), 1);
        assert_eq!(complex[0].line, 1);
        assert_eq!(complex[0].message, "selector too complex, may impact performance");
    }

    #[test]
    fn test_short_selector_is_not_complex() {
        let diagnostics = validate("QWidget QLabel {\n  color: red;\n}\n", false);
        assert!(of_category(&diagnostics, Category::ComplexSelector).is_empty());
    }

    #[test]
    fn test_universal_selector() {
        let diagnostics = validate("* {\n  color: red;\n}\n", false);
        let universal = of_category(&diagnostics, Category::UniversalSelector);
        assert_eq!(universal.len(), 1);
        assert_eq!((universal[0].line, universal[0].column), (1, 1));

        let compact = validate("  *{ color: red; }", false);
        let universal = of_category(&compact, Category::UniversalSelector);
        assert_eq!(universal.len(), 1);
        assert_eq!(universal[0].column, 3);
    }

    #[test]
    fn test_positions_survive_multiline_comment() {
        let content = "/* a\nb\nc */ QLabel {";
        let diagnostics = validate(content, false);
        let unclosed = of_category(&diagnostics, Category::UnclosedBracket);
        assert_eq!(unclosed.len(), 1);
        assert_eq!((unclosed[0].line, unclosed[0].column), (3, 13));
    }

    #[test]
    fn test_positions_survive_inline_comment() {
        let diagnostics = validate("QLabel /* x */ { color: #1234; }", false);
        let invalid = of_category(&diagnostics, Category::InvalidColor);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].column, 25);
    }

    #[test]
    fn test_comment_contents_are_ignored() {
        let content = "/* QLabel { color: #12345 }\n   } */\nQLabel { color: red; }\n";
        assert!(validate(content, true).is_empty());
    }

    #[test]
    fn test_unclosed_comment() {
        let content = "QLabel { color: red; }\n/* never closed\nQPushButton {";
        let diagnostics = validate(content, false);
        let unclosed = of_category(&diagnostics, Category::UnclosedComment);
        assert_eq!(unclosed.len(), 1);
        assert_eq!((unclosed[0].line, unclosed[0].column), (2, 1));
        assert_eq!(unclosed[0].severity, Severity::Warning);
        // The rest of the file is inside the comment.
        assert!(of_category(&diagnostics, Category::UnclosedBracket).is_empty());
    }

    #[test]
    fn test_strip_comments_keeps_layout() {
        let content = "a /* one\ntwo */ b\n/**/c";
        let stripped = strip_comments(content);
        assert_eq!(stripped.text, "a       \n       b\n    c");
        assert_eq!(stripped.unclosed_comment, None);
        assert_eq!(stripped.text.lines().count(), content.lines().count());
    }

    #[test]
    fn test_strip_comments_unterminated() {
        let stripped = strip_comments("x /*/ y");
        assert_eq!(stripped.text, "x      ");
        assert_eq!(stripped.unclosed_comment, Some(2));
    }

    #[test]
    fn test_line_index_positions() {
        let text = "ab\ncdé\nf";
        let lines = LineIndex::new(text);
        assert_eq!(lines.position(text, 0), (1, 1));
        assert_eq!(lines.position(text, 2), (1, 3));
        assert_eq!(lines.position(text, 3), (2, 1));
        // `é` is two bytes but one column.
        assert_eq!(lines.position(text, text.find('f').unwrap()), (3, 1));

        let accented = "é#";
        assert_eq!(LineIndex::new(accented).position(accented, "é".len()), (1, 2));
    }

    #[test]
    fn test_line_index_trailing_newline() {
        let text = "a\n\nb\n";
        let lines = LineIndex::new(text);
        assert_eq!(lines.position(text, 2), (2, 1));
        assert_eq!(lines.position(text, 3), (3, 1));
        assert_eq!(lines.position(text, text.len()), (4, 1));
    }

    #[test]
    fn test_large_sheet_positions() {
        let rules = 20_000;
        let content = "QLabel {\n  color: #12345;\n}\n".repeat(rules);
        let diagnostics = validate(&content, true);

        assert_eq!(diagnostics.len(), rules);
        assert!(diagnostics.iter().all(|d| d.category == Category::InvalidColor));
        let last = diagnostics.last().unwrap();
        assert_eq!((last.line, last.column), (3 * (rules - 1) + 2, 10));
        let middle = &diagnostics[rules / 2];
        assert_eq!((middle.line, middle.column), (3 * (rules / 2) + 2, 10));
    }

    #[test]
    fn test_state_segments() {
        assert_eq!(state_segments("QPushButton:hover"), vec!["QPushButton", "hover"]);
        assert_eq!(state_segments("QCheckBox::indicator:checked"), vec!["QCheckBox", "checked"]);
        assert_eq!(state_segments("QScrollBar::add-line"), vec!["QScrollBar"]);
        assert_eq!(state_segments("QPushButton:!enabled"), vec!["QPushButton", "enabled"]);
        assert!(state_segments("").is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let content = "QPushButton:bogus {\n  colr: red\n  color: #12345;\n}\n}\nQLabel {";
        let validator = StylesheetValidator::default();
        let first = validator.validate_content(content, true);
        let second = validator.validate_content(content, true);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_severity_fixed_per_category() {
        let content = "QPushButton:bogus {\n  colr: red\n  color: #12345;\n}\n}\nQLabel {";
        for d in validate(content, true) {
            assert_eq!(d.severity, d.category.severity());
        }
    }

    #[test]
    fn test_validate_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "QLabel {{\n  color: red\n}}\n").unwrap();

        let diagnostics = StylesheetValidator::default().validate_file(file.path(), false);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category, Category::MissingSemicolon);
    }

    #[test]
    fn test_validate_missing_file() {
        let diagnostics = StylesheetValidator::default()
            .validate_file(std::path::Path::new("/this/path/does/not/exist.qss"), true);
        assert_eq!(diagnostics.len(), 1);
        let d = &diagnostics[0];
        assert_eq!(d.category, Category::FileError);
        assert_eq!((d.line, d.column), (0, 0));
        assert_eq!(d.severity, Severity::Error);
        assert!(d.message.contains("exist.qss"));
    }
}
