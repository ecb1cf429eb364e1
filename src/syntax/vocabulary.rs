// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Reserved words of the scripting language.
//!
//! Two fixed vocabularies drive word classification: control-flow keywords
//! and builtin literal values. Both are built once on first use and never
//! mutated afterwards.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Keyword that opens a `for ... in` loop.
pub const FOR_KEYWORD: &str = "for";

/// Keyword that separates a loop variable from its iterable.
pub const IN_KEYWORD: &str = "in";

/// Keyword that introduces a function declaration.
pub const FUNCTION_KEYWORD: &str = "function";

const KEYWORD_LIST: &[&str] = &[
    "for", "if", "else", "then", "do", "return", "in", "of", "while", "end", "break", "next",
    "continue", "to", "foreach", "skip", "function", "mod", "step", "repeat", "until", "exit",
    "class", "instance",
];

const BUILTIN_VALUE_LIST: &[&str] = &["true", "false", "null", "none"];

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| KEYWORD_LIST.iter().copied().collect());

static BUILTIN_VALUES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| BUILTIN_VALUE_LIST.iter().copied().collect());

/// Classification of a word token against the vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    /// A control-flow keyword
    Keyword,
    /// A builtin literal such as `true` or `none`
    BuiltinValue,
    /// Anything else
    Identifier,
}

/// Returns true if `word` is a reserved keyword.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

/// Returns true if `word` is a builtin literal value.
pub fn is_builtin_value(word: &str) -> bool {
    BUILTIN_VALUES.contains(word)
}

/// Classifies a word. Keywords are checked before builtin values.
pub fn classify_word(word: &str) -> WordClass {
    if is_keyword(word) {
        WordClass::Keyword
    } else if is_builtin_value(word) {
        WordClass::BuiltinValue
    } else {
        WordClass::Identifier
    }
}

/// Returns all keywords in declaration order.
pub fn keywords() -> &'static [&'static str] {
    KEYWORD_LIST
}

/// Returns all builtin values in declaration order.
pub fn builtin_values() -> &'static [&'static str] {
    BUILTIN_VALUE_LIST
}
