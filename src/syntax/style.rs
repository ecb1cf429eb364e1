// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Maps highlight styles to markup class names.
//!
//! The renderer wraps styled tokens in `<span class="...">`. The class name
//! for each [`Style`] comes from a [`StyleMapper`], which starts out with the
//! default theme and can be overridden per style.

use std::collections::HashMap;

/// Visual style assigned to a rendered token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Line comments
    Comment,
    /// Strings, numbers and builtin values
    Value,
    /// Reserved keywords
    Keyword,
    /// Function names at call or declaration sites
    Function,
    /// Assigned and loop variables
    Variable,
    /// Declared parameters
    Param,
}

impl Style {
    /// All styles, in rendering precedence order.
    pub const ALL: [Style; 6] = [
        Style::Comment,
        Style::Value,
        Style::Keyword,
        Style::Function,
        Style::Variable,
        Style::Param,
    ];

    /// Returns the default class name of this style.
    pub fn default_class(self) -> &'static str {
        match self {
            Style::Comment => "comment",
            Style::Value => "value",
            Style::Keyword => "keyword",
            Style::Function => "function",
            Style::Variable => "variable",
            Style::Param => "param",
        }
    }
}

/// Maps styles to the class names emitted in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMapper {
    classes: HashMap<Style, String>,
}

impl Default for StyleMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleMapper {
    /// Creates a mapper with the default theme.
    pub fn new() -> Self {
        let mut mapper = Self { classes: HashMap::new() };
        mapper.load_default_theme();
        mapper
    }

    fn load_default_theme(&mut self) {
        for style in Style::ALL {
            self.classes.insert(style, style.default_class().to_string());
        }
    }

    /// Gets the class name for a style.
    pub fn class_name(&self, style: Style) -> &str {
        self.classes.get(&style).map_or(style.default_class(), String::as_str)
    }

    /// Overrides the class name for a style.
    pub fn set_class(&mut self, style: Style, class: impl Into<String>) {
        self.classes.insert(style, class.into());
    }

    /// Resets every style to its default class name.
    pub fn reset_to_default(&mut self) {
        self.classes.clear();
        self.load_default_theme();
    }

    /// Replaces the mapping. Styles missing from `theme` fall back to their defaults.
    pub fn load_theme(&mut self, theme: HashMap<Style, String>) {
        self.classes = theme;
    }

    /// Exports the current mapping.
    pub fn export_theme(&self) -> HashMap<Style, String> {
        self.classes.clone()
    }
}
