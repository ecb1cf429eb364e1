// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Turns classified tokens into styled markup.

use crate::syntax::classifier::Classification;
use crate::syntax::style::{Style, StyleMapper};
use crate::syntax::token::{Token, TokenKind, skip_whitespace};

/// Markup emitted instead of an empty string so the display region keeps its height.
pub const EMPTY_PLACEHOLDER: &str = "&nbsp;";

/// Appends `text` to `out`, escaping `&`, `<` and `>`.
pub fn escape_markup_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Returns `text` with `&`, `<` and `>` escaped.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_markup_into(text, &mut out);
    out
}

/// Picks the style of the token at `index`, or `None` for unstyled text.
pub fn style_for(tokens: &[Token<'_>], index: usize, classification: &Classification<'_>) -> Option<Style> {
    let token = tokens.get(index)?;
    match token.kind {
        TokenKind::Comment => Some(Style::Comment),
        TokenKind::String | TokenKind::Value => Some(Style::Value),
        TokenKind::Keyword => Some(Style::Keyword),
        TokenKind::Identifier => {
            let next = skip_whitespace(tokens, index + 1);
            let is_call = tokens.get(next).is_some_and(|t| t.is_char('('));
            if is_call && classification.is_function(token.text) {
                Some(Style::Function)
            } else if classification.is_defined_variable(token.text) {
                Some(Style::Variable)
            } else if classification.is_parameter(token.text) {
                Some(Style::Param)
            } else {
                None
            }
        }
        TokenKind::Whitespace | TokenKind::Operator => None,
    }
}

/// Renders tokens as markup, wrapping styled tokens in `<span class="...">`.
///
/// Returns [`EMPTY_PLACEHOLDER`] if there is nothing to render.
pub fn render(tokens: &[Token<'_>], classification: &Classification<'_>, mapper: &StyleMapper) -> String {
    let mut out = String::with_capacity(tokens.iter().map(Token::len).sum::<usize>() * 2);

    for (index, token) in tokens.iter().enumerate() {
        match style_for(tokens, index, classification) {
            Some(style) => {
                out.push_str("<span class=\"");
                out.push_str(mapper.class_name(style));
                out.push_str("\">");
                escape_markup_into(token.text, &mut out);
                out.push_str("</span>");
            }
            None => escape_markup_into(token.text, &mut out),
        }
    }

    if out.is_empty() {
        out.push_str(EMPTY_PLACEHOLDER);
    }
    out
}
