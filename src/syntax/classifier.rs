// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Heuristic identifier classification.
//!
//! A single pass over the token sequence collects the names of assigned
//! variables, loop variables, function names and declared parameters. The
//! result only drives styling: it is best-effort, not a semantic analysis.

use std::collections::HashSet;

use crate::syntax::token::{Token, TokenKind, skip_whitespace};
use crate::syntax::vocabulary::{FOR_KEYWORD, FUNCTION_KEYWORD, IN_KEYWORD};

/// Identifier names collected by [`classify`].
///
/// A name may appear in several sets; the renderer decides precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Identifiers followed by `=`, directly or after an index expression
    pub assigned_variables: HashSet<&'a str>,
    /// Identifiers bound by `for <name> in`
    pub loop_variables: HashSet<&'a str>,
    /// Identifiers inside the parentheses of a declaration site
    pub parameter_variables: HashSet<&'a str>,
    /// Identifiers followed by `(`
    pub function_names: HashSet<&'a str>,
}

impl<'a> Classification<'a> {
    /// Returns true if `name` is an assigned or loop variable.
    pub fn is_defined_variable(&self, name: &str) -> bool {
        self.assigned_variables.contains(name) || self.loop_variables.contains(name)
    }

    /// Returns true if `name` was seen as a declared parameter.
    pub fn is_parameter(&self, name: &str) -> bool {
        self.parameter_variables.contains(name)
    }

    /// Returns true if `name` was seen in call or declaration position.
    pub fn is_function(&self, name: &str) -> bool {
        self.function_names.contains(name)
    }

    /// Returns true if nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.assigned_variables.is_empty()
            && self.loop_variables.is_empty()
            && self.parameter_variables.is_empty()
            && self.function_names.is_empty()
    }
}

/// Finds the token that closes the bracket opened at `open_index`.
///
/// Every `open` increments the depth and every `close` decrements it; the
/// match is where the depth first returns to zero. Returns `None` if the
/// sequence ends first.
pub fn find_matching(tokens: &[Token<'_>], open_index: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open_index) {
        if token.is_char(open) {
            depth += 1;
        } else if token.is_char(close) {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Returns the text of the line containing `offset`, up to (not including) `offset`.
pub fn preceding_line_text(source: &str, offset: usize) -> &str {
    let before = &source[..offset];
    let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
    &before[line_start..]
}

/// Decides whether a call-like identifier is a declaration site, given the
/// text that precedes it on its line.
///
/// It is one if that text, trimmed, is empty or ends with `function`.
pub fn is_declaration_site(preceding_line_text: &str) -> bool {
    let trimmed = preceding_line_text.trim();
    trimmed.is_empty() || trimmed.ends_with(FUNCTION_KEYWORD)
}

/// Returns the identifier bound at a `for` keyword at `index`, if the
/// pattern is `for <identifier> in`.
fn loop_variable<'a>(tokens: &[Token<'a>], index: usize) -> Option<&'a str> {
    let name_index = skip_whitespace(tokens, index + 1);
    let name = tokens.get(name_index).filter(|t| t.kind == TokenKind::Identifier)?;
    let in_index = skip_whitespace(tokens, name_index + 1);
    tokens.get(in_index).filter(|t| t.is_keyword(IN_KEYWORD)).map(|_| name.text)
}

/// Returns true if the identifier at `index` is followed by `=`, either
/// directly or after a balanced `[...]` index expression.
///
/// Any bare `=` counts, so this can't tell assignment from other uses.
fn is_assignment_target(tokens: &[Token<'_>], index: usize) -> bool {
    let next = skip_whitespace(tokens, index + 1);
    match tokens.get(next) {
        Some(token) if token.is_char('[') => find_matching(tokens, next, '[', ']')
            .map(|close| skip_whitespace(tokens, close + 1))
            .and_then(|after| tokens.get(after))
            .is_some_and(|token| token.is_char('=')),
        Some(token) => token.is_char('='),
        None => false,
    }
}

/// Collects the identifiers between a declaration's parentheses.
fn collect_parameters<'a>(tokens: &[Token<'a>], open_index: usize, into: &mut HashSet<&'a str>) {
    let Some(close_index) = find_matching(tokens, open_index, '(', ')') else {
        return;
    };
    into.extend(
        tokens[open_index + 1..close_index]
            .iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| t.text),
    );
}

/// Classifies identifiers in `tokens`, which must come from `tokenize(source)`.
pub fn classify<'a>(tokens: &[Token<'a>], source: &'a str) -> Classification<'a> {
    let mut classification = Classification::default();

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Keyword if token.text == FOR_KEYWORD => {
                if let Some(name) = loop_variable(tokens, index) {
                    classification.loop_variables.insert(name);
                }
            }
            TokenKind::Identifier => {
                if is_assignment_target(tokens, index) {
                    classification.assigned_variables.insert(token.text);
                }

                let next = skip_whitespace(tokens, index + 1);
                if tokens.get(next).is_some_and(|t| t.is_char('(')) {
                    classification.function_names.insert(token.text);
                    if is_declaration_site(preceding_line_text(source, token.start)) {
                        collect_parameters(tokens, next, &mut classification.parameter_variables);
                    }
                }
            }
            _ => {}
        }
    }

    classification
}
