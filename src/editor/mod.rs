// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Editor glue around the highlighter.
//!
//! The page keeps a transparent text area stacked over the highlight
//! overlay, with a line-number gutter beside them. This module models that
//! state without any UI toolkit so the behavior can be driven and tested
//! directly.

pub mod change;
pub mod config;
pub mod gutter;
pub mod session;
pub mod worker;

pub use change::{TextChange, TextChangeType, calculate_line_delta};
pub use config::EditorConfig;
pub use gutter::{line_count, line_numbers};
pub use session::{EditorSession, HighlightLayer, ScrollOffset, Selection};
pub use worker::{HighlightRequest, HighlightResponse, HighlightWorker};
