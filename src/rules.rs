//! Reference tables used by the validator.
//!
//! The built-in tables are constant data. They are turned into a
//! [`RuleSet`] once per process and handed out behind an [`Arc`], so every
//! validator (and every thread validating files in parallel) reads the same
//! immutable sets. A configuration file can add names on top of the
//! built-in tables; the extended set is built once and is just as immutable.

use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::Arc;

/// Style properties understood by Qt style sheets.
pub const KNOWN_PROPERTIES: &[&str] = &[
    // color and background
    "color",
    "background-color",
    "background",
    "background-image",
    "background-repeat",
    "background-position",
    "background-attachment",
    "background-clip",
    "background-origin",
    // font
    "font",
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "font-variant",
    "text-decoration",
    "text-transform",
    // box model
    "width",
    "height",
    "min-width",
    "min-height",
    "max-width",
    "max-height",
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "border",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-color",
    "border-style",
    "border-width",
    "border-radius",
    "border-image",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
    // positioning
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "float",
    "clear",
    "display",
    "visibility",
    "z-index",
    "opacity",
    // Qt specific
    "selection-background-color",
    "selection-color",
    "alternate-background-color",
    "gridline-color",
    "outline",
    "outline-color",
    "outline-style",
    "outline-offset",
    // sub-controls
    "subcontrol-origin",
    "subcontrol-position",
    "spacing",
    // misc
    "icon-size",
    "line-height",
    "text-align",
    "vertical-align",
];

/// Pseudo-states that may follow a single `:` in a selector.
pub const KNOWN_PSEUDO_STATES: &[&str] = &[
    "hover",
    "pressed",
    "focus",
    "disabled",
    "checked",
    "selected",
    "unchecked",
    "indeterminate",
    "readonly",
    "enabled",
    "active",
    "default",
    "flat",
    "open",
    "closed",
    "on",
    "off",
    "horizontal",
    "vertical",
    "next-selected",
    "previous-selected",
    "first",
    "last",
    "middle",
    "only-one",
    "item",
    "sibling",
    "top",
    "bottom",
    "left",
    "right",
    "no-frame",
    "window",
    "dialog",
    "popup",
    "modal",
    "non-modal",
    "editable",
];

/// Widget class names accepted as type selectors.
pub const KNOWN_WIDGETS: &[&str] = &[
    "QWidget",
    "QMainWindow",
    "QPushButton",
    "QLabel",
    "QLineEdit",
    "QTextEdit",
    "QPlainTextEdit",
    "QComboBox",
    "QCheckBox",
    "QRadioButton",
    "QSlider",
    "QProgressBar",
    "QTableWidget",
    "QTableView",
    "QTreeView",
    "QTreeWidget",
    "QListWidget",
    "QTabWidget",
    "QTabBar",
    "QMenuBar",
    "QMenu",
    "QToolBar",
    "QStatusBar",
    "QScrollBar",
    "QGroupBox",
    "QDialog",
    "QMessageBox",
    "QToolTip",
    "QSplitter",
    "QCalendarWidget",
    "QDateTimeEdit",
    "QSpinBox",
    "QDoubleSpinBox",
    "QHeaderView",
];

lazy_static! {
    static ref BUILTIN: Arc<RuleSet> = Arc::new(RuleSet::from_tables(
        KNOWN_PROPERTIES,
        KNOWN_PSEUDO_STATES,
        KNOWN_WIDGETS,
    ));
}

/// The three name sets the validator checks against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    properties: HashSet<String>,
    pseudo_states: HashSet<String>,
    widgets: HashSet<String>,
}

impl RuleSet {
    fn from_tables(properties: &[&str], pseudo_states: &[&str], widgets: &[&str]) -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            properties: owned(properties),
            pseudo_states: owned(pseudo_states),
            widgets: owned(widgets),
        }
    }

    /// Shared handle to the built-in tables.
    pub fn builtin() -> Arc<RuleSet> {
        Arc::clone(&BUILTIN)
    }

    /// Built-in tables plus user supplied names.
    ///
    /// Returns the shared built-in set untouched when nothing is added.
    pub fn extended(
        extra_properties: &[String],
        extra_pseudo_states: &[String],
        extra_widgets: &[String],
    ) -> Arc<RuleSet> {
        if extra_properties.is_empty() && extra_pseudo_states.is_empty() && extra_widgets.is_empty()
        {
            return Self::builtin();
        }
        let mut rules = (**BUILTIN).clone();
        rules.properties.extend(extra_properties.iter().cloned());
        rules.pseudo_states.extend(extra_pseudo_states.iter().cloned());
        rules.widgets.extend(extra_widgets.iter().cloned());
        Arc::new(rules)
    }

    pub fn is_property(&self, name: &str) -> bool {
        self.properties.contains(name)
    }

    pub fn is_pseudo_state(&self, name: &str) -> bool {
        self.pseudo_states.contains(name)
    }

    pub fn is_widget(&self, name: &str) -> bool {
        self.widgets.contains(name)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn pseudo_state_count(&self) -> usize {
        self.pseudo_states.len()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }
}
