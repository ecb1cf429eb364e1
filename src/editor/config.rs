// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Editor surface configuration.

/// Markup appended after the highlighted text so a trailing empty line stays visible.
pub const DEFAULT_TRAILING_LINE: &str = "<br>&nbsp;";

/// Number of spaces the Tab key inserts by default.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Configuration for an [`EditorSession`](crate::editor::EditorSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Number of spaces inserted by the Tab key
    pub tab_width: usize,
    /// Whether the highlight layer is styled or only escaped
    pub highlighting_enabled: bool,
    /// Markup appended to the highlight layer
    pub trailing_line: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            highlighting_enabled: true,
            trailing_line: DEFAULT_TRAILING_LINE.to_string(),
        }
    }

    /// Creates a configuration with highlighting disabled.
    pub fn disabled() -> Self {
        Self { highlighting_enabled: false, ..Self::new() }
    }

    /// Sets the tab width.
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Returns the text the Tab key inserts.
    pub fn tab_text(&self) -> String {
        " ".repeat(self.tab_width)
    }
}
