// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Syntax highlighting for the scripting language.
//!
//! The pipeline is `tokenize` -> `classify` -> `render`, composed by
//! [`highlight`]. Every call is re-derived from the text alone.

pub mod classifier;
pub mod highlighter;
pub mod performance;
pub mod render;
pub mod style;
pub mod token;
pub mod vocabulary;


pub use classifier::{Classification, classify, is_declaration_site};
pub use highlighter::{HighlightingMetrics, HighlightingService, highlight, highlight_with};
pub use performance::{
    InputSizeCategory, PerformanceBaseline, PerformanceMeasurement, create_test_session,
    run_baseline_test, sample_inputs,
};
pub use render::{EMPTY_PLACEHOLDER, escape_markup, render};
pub use style::{Style, StyleMapper};
pub use token::{Token, TokenKind, tokenize};
