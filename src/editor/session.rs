// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Headless editor session.
//!
//! An [`EditorSession`] holds what the page script keeps in the DOM: the raw
//! text, the selection, the scroll offsets of the three stacked surfaces
//! (editable text, highlight overlay, line-number gutter) and whether there
//! are unsaved changes. Each mutation re-derives the [`HighlightLayer`].

use crate::editor::change::TextChange;
use crate::editor::config::EditorConfig;
use crate::editor::gutter::line_numbers;
use crate::syntax::HighlightingService;

/// Scroll position of a surface, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    /// Vertical offset
    pub top: u32,
    /// Horizontal offset
    pub left: u32,
}

impl ScrollOffset {
    /// Creates a scroll offset.
    pub fn new(top: u32, left: u32) -> Self {
        Self { top, left }
    }
}

/// Selection in the raw text as byte offsets; `start == end` is a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Start of the selection
    pub start: usize,
    /// End of the selection (exclusive)
    pub end: usize,
}

impl Selection {
    /// Creates a caret at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    /// Returns true if nothing is selected.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

/// Rendered output for the display surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightLayer {
    /// Styled markup for the overlay, including the trailing line
    pub markup: String,
    /// Text for the line-number gutter
    pub line_numbers: String,
}

impl HighlightLayer {
    /// Builds the layer for `text`.
    pub fn build(service: &mut HighlightingService, text: &str, config: &EditorConfig) -> Self {
        let mut markup = service.highlight(text);
        markup.push_str(&config.trailing_line);
        Self { markup, line_numbers: line_numbers(text) }
    }
}

/// State of one editor page.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    service: HighlightingService,
    text: String,
    selection: Selection,
    editor_scroll: ScrollOffset,
    layer_scroll: ScrollOffset,
    gutter_scroll: ScrollOffset,
    has_unsaved_changes: bool,
    layer: HighlightLayer,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    /// Creates an empty session and renders its initial layer.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_text(config, String::new())
    }

    /// Creates a session showing `text`. Loading text doesn't count as an unsaved change.
    pub fn with_text(config: EditorConfig, text: impl Into<String>) -> Self {
        let mut service = HighlightingService::new();
        service.set_enabled(config.highlighting_enabled);
        let text = text.into();
        let layer = HighlightLayer::build(&mut service, &text, &config);
        Self {
            config,
            service,
            selection: Selection::caret(text.len()),
            text,
            editor_scroll: ScrollOffset::default(),
            layer_scroll: ScrollOffset::default(),
            gutter_scroll: ScrollOffset::default(),
            has_unsaved_changes: false,
            layer,
        }
    }

    /// Returns the raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the current layer.
    pub fn layer(&self) -> &HighlightLayer {
        &self.layer
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Returns the highlighting service, e.g. for its metrics.
    pub fn service(&self) -> &HighlightingService {
        &self.service
    }

    /// Returns the selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Sets the selection. Offsets are clamped to the text, snapped down to
    /// char boundaries and put in order.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let start = self.snap_to_char_boundary(start);
        let end = self.snap_to_char_boundary(end);
        self.selection = Selection { start: start.min(end), end: start.max(end) };
    }

    fn snap_to_char_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn refresh(&mut self) {
        self.layer = HighlightLayer::build(&mut self.service, &self.text, &self.config);
    }

    /// Handles an input notification carrying the surface's new contents.
    pub fn input(&mut self, text: impl Into<String>) -> TextChange {
        let text = text.into();
        let change = TextChange::input(&self.text, &text);
        self.text = text;
        self.has_unsaved_changes = true;
        self.set_selection(self.selection.start, self.selection.end);
        self.refresh();
        tracing::trace!(?change, "input");
        change
    }

    /// Replaces the selection with `tab_width` spaces and puts the caret after them.
    pub fn insert_tab(&mut self) -> TextChange {
        let Selection { start, end } = self.selection;
        let tab = self.config.tab_text();
        let change = TextChange::tab(&self.text, start..end, &tab);

        self.text.replace_range(start..end, &tab);
        self.selection = Selection::caret(start + tab.len());
        self.has_unsaved_changes = true;
        self.refresh();
        change
    }

    /// Empties the document and scrolls every surface back to the top.
    pub fn clear(&mut self) -> TextChange {
        let change = TextChange::clear(&self.text);
        self.text.clear();
        self.selection = Selection::default();
        self.editor_scroll = ScrollOffset::default();
        self.layer_scroll = ScrollOffset::default();
        self.gutter_scroll = ScrollOffset::default();
        self.has_unsaved_changes = true;
        self.refresh();
        change
    }

    /// Handles a scroll of the editable surface, mirroring it to the overlay
    /// (both axes) and the gutter (vertical only).
    pub fn scroll(&mut self, offset: ScrollOffset) {
        self.editor_scroll = offset;
        self.layer_scroll = offset;
        self.gutter_scroll = ScrollOffset::new(offset.top, 0);
    }

    /// Returns the scroll offsets of the editor, overlay and gutter.
    pub fn scroll_offsets(&self) -> (ScrollOffset, ScrollOffset, ScrollOffset) {
        (self.editor_scroll, self.layer_scroll, self.gutter_scroll)
    }

    /// Returns true if leaving the page should ask for confirmation.
    pub fn should_warn_before_unload(&self) -> bool {
        self.has_unsaved_changes
    }

    /// Records that the current text has been saved.
    pub fn mark_saved(&mut self) {
        self.has_unsaved_changes = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layer() {
        let session = EditorSession::default();
        assert_eq!(session.layer().markup, "&nbsp;<br>&nbsp;");
        assert_eq!(session.layer().line_numbers, "1");
        assert!(!session.should_warn_before_unload());
    }

    #[test]
    fn test_with_text_is_not_dirty() {
        let session = EditorSession::with_text(EditorConfig::new(), "x = 1\ny = 2");
        assert_eq!(session.layer().line_numbers, "1\n2");
        assert!(session.layer().markup.ends_with("<br>&nbsp;"));
        assert_eq!(session.selection(), Selection::caret(11));
        assert!(!session.should_warn_before_unload());
    }

    #[test]
    fn test_input_refreshes_and_marks_dirty() {
        let mut session = EditorSession::default();
        let change = session.input("x = 5");

        assert_eq!(change.inserted_len, 5);
        assert_eq!(
            session.layer().markup,
            "<span class=\"variable\">x</span> = <span class=\"value\">5</span><br>&nbsp;"
        );
        assert!(session.should_warn_before_unload());

        session.mark_saved();
        assert!(!session.should_warn_before_unload());
    }

    #[test]
    fn test_insert_tab_at_caret() {
        let mut session = EditorSession::with_text(EditorConfig::new(), "ab");
        session.set_selection(1, 1);

        let change = session.insert_tab();
        assert_eq!(session.text(), "a    b");
        assert_eq!(session.selection(), Selection::caret(5));
        assert_eq!(change.removed, 1..1);
        assert_eq!(change.inserted_len, 4);
        assert!(session.should_warn_before_unload());
    }

    #[test]
    fn test_insert_tab_replaces_selection() {
        let mut session = EditorSession::with_text(EditorConfig::new().with_tab_width(2), "one\ntwo");
        session.set_selection(7, 2);
        assert_eq!(session.selection(), Selection { start: 2, end: 7 });

        let change = session.insert_tab();
        assert_eq!(session.text(), "on  ");
        assert_eq!(session.selection(), Selection::caret(4));
        assert_eq!(change.line_delta, -1);
        assert_eq!(session.layer().line_numbers, "1");
    }

    #[test]
    fn test_selection_snaps_to_char_boundary() {
        let mut session = EditorSession::with_text(EditorConfig::new(), "aé");
        session.set_selection(2, 99);
        assert_eq!(session.selection(), Selection { start: 1, end: 3 });
        session.insert_tab();
        assert_eq!(session.text(), "a    ");
    }

    #[test]
    fn test_input_clamps_stale_selection() {
        let mut session = EditorSession::with_text(EditorConfig::new(), "long text");
        session.input("x");
        assert_eq!(session.selection(), Selection::caret(1));
        session.insert_tab();
        assert_eq!(session.text(), "x    ");
    }

    #[test]
    fn test_clear_resets_scroll() {
        let mut session = EditorSession::with_text(EditorConfig::new(), "a\nb\nc");
        session.scroll(ScrollOffset::new(40, 12));

        let change = session.clear();
        assert_eq!(change.line_delta, -2);
        assert_eq!(session.text(), "");
        assert_eq!(session.layer().markup, "&nbsp;<br>&nbsp;");
        assert_eq!(session.layer().line_numbers, "1");
        assert_eq!(session.scroll_offsets(), Default::default());
        assert!(session.should_warn_before_unload());
    }

    #[test]
    fn test_scroll_sync() {
        let mut session = EditorSession::default();
        session.scroll(ScrollOffset::new(120, 30));

        let (editor, layer, gutter) = session.scroll_offsets();
        assert_eq!(editor, ScrollOffset::new(120, 30));
        assert_eq!(layer, ScrollOffset::new(120, 30));
        assert_eq!(gutter, ScrollOffset::new(120, 0));
    }

    #[test]
    fn test_disabled_highlighting() {
        let mut session = EditorSession::new(EditorConfig::disabled());
        session.input("for i in x");
        assert_eq!(session.layer().markup, "for i in x<br>&nbsp;");
    }

    #[test]
    fn test_unchanged_input_hits_cache() {
        let mut session = EditorSession::default();
        session.input("a = 1");
        session.input("a = 1");
        assert_eq!(session.service().metrics().cache_hits, 1);
    }
}
