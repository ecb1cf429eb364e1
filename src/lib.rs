// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Syntax highlighter for a small scripting language, with the editor glue
//! that drives it.
//!
//! ```
//! let markup = scriptlight::highlight("x = 5");
//! assert_eq!(markup, "<span class=\"variable\">x</span> = <span class=\"value\">5</span>");
//! ```

pub mod editor;
pub mod error;
pub mod syntax;

pub use error::{Error, Result};
pub use syntax::highlight;
