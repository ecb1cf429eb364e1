// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Text change notifications.
//!
//! Every mutation of an [`EditorSession`](crate::editor::EditorSession)
//! produces a [`TextChange`] describing the replaced byte range, so callers
//! can tell what moved without diffing the text themselves.

use std::ops::Range;

use crate::editor::gutter::line_count;

/// What caused a text change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChangeType {
    /// The editor surface reported new contents
    Input,
    /// The Tab key replaced the selection with spaces
    Tab,
    /// The document was cleared
    Clear,
}

/// Notification of a text change in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Byte range of the old text that was replaced
    pub removed: Range<usize>,
    /// Number of bytes inserted in its place
    pub inserted_len: usize,
    /// The number of lines that were added (positive) or removed (negative)
    pub line_delta: isize,
    /// The type of change that occurred
    pub change_type: TextChangeType,
}

impl TextChange {
    /// Creates a new text change notification.
    pub fn new(removed: Range<usize>, inserted_len: usize, line_delta: isize, change_type: TextChangeType) -> Self {
        Self { removed, inserted_len, line_delta, change_type }
    }

    /// Describes the change from `old` to `new` reported by the editor surface.
    ///
    /// The replaced range is what remains after trimming the common prefix and suffix.
    pub fn input(old: &str, new: &str) -> Self {
        let prefix = common_prefix_len(old, new);
        let suffix = common_suffix_len(&old[prefix..], &new[prefix..]);
        Self::new(
            prefix..old.len() - suffix,
            new.len() - suffix - prefix,
            calculate_line_delta(old, new),
            TextChangeType::Input,
        )
    }

    /// Describes a Tab insertion replacing `removed` in `old` with `inserted`.
    pub fn tab(old: &str, removed: Range<usize>, inserted: &str) -> Self {
        let removed_lines = line_count(&old[removed.clone()]) as isize - 1;
        Self::new(removed, inserted.len(), -removed_lines, TextChangeType::Tab)
    }

    /// Describes clearing `old`.
    pub fn clear(old: &str) -> Self {
        Self::new(0..old.len(), 0, calculate_line_delta(old, ""), TextChangeType::Clear)
    }

    /// Returns true if the text is unchanged.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.inserted_len == 0
    }
}

/// Calculates the line delta between two versions of the text.
pub fn calculate_line_delta(before: &str, after: &str) -> isize {
    line_count(after) as isize - line_count(before) as isize
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|&((_, ca), cb)| ca != cb)
        .map_or_else(|| a.len().min(b.len()), |((offset, _), _)| offset)
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(ca, _)| ca.len_utf8())
        .sum()
}
