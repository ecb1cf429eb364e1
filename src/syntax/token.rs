// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Lossless tokenizer.
//!
//! [`tokenize`] splits source text into a flat sequence of [`Token`]s whose
//! spans partition the input: concatenating every token's text in order
//! reproduces the input exactly. It never fails; unterminated strings and
//! comments simply run to the end of the input.

use crate::syntax::vocabulary::{self, WordClass};

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `//` line comment, excluding the line break
    Comment,
    /// Double-quoted string literal, possibly unterminated
    String,
    /// Reserved control-flow keyword
    Keyword,
    /// Number or builtin literal value
    Value,
    /// Any other word
    Identifier,
    /// A single whitespace character
    Whitespace,
    /// Any other single character
    Operator,
}

impl TokenKind {
    /// Returns a short lowercase name, used in logs and debug output.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Keyword => "keyword",
            TokenKind::Value => "value",
            TokenKind::Identifier => "identifier",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Operator => "operator",
        }
    }
}

/// A classified, position-tagged slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The lexical category
    pub kind: TokenKind,
    /// The source text covered by this token
    pub text: &'a str,
    /// Byte offset of the first byte of the token
    pub start: usize,
    /// Byte offset one past the last byte of the token
    pub end: usize,
}

impl<'a> Token<'a> {
    /// Creates a token covering `source[start..end]`.
    pub fn new(kind: TokenKind, source: &'a str, start: usize, end: usize) -> Self {
        Self { kind, text: &source[start..end], start, end }
    }

    /// Returns true if this is a whitespace token.
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Returns true if this token is the single character `ch`.
    pub fn is_char(&self, ch: char) -> bool {
        let mut chars = self.text.chars();
        chars.next() == Some(ch) && chars.next().is_none()
    }

    /// Returns true if this is a keyword token spelled `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// Returns the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the token is empty. Tokens produced by [`tokenize`] never are.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_word_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Returns the offset of the first byte at or after `from` that doesn't satisfy `pred`.
fn scan_while(source: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    source[from..]
        .char_indices()
        .find(|&(_, ch)| !pred(ch))
        .map_or(source.len(), |(offset, _)| from + offset)
}

/// Returns the end of a `//` comment starting at `start`.
fn scan_comment(source: &str, start: usize) -> usize {
    source[start..].find('\n').map_or(source.len(), |offset| start + offset)
}

/// Returns the end of a string literal whose opening quote is at `start`.
fn scan_string(source: &str, start: usize) -> usize {
    let mut chars = source[start + 1..].char_indices();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            // The escaped char is skipped without inspection.
            '\\' => {
                if chars.next().is_none() {
                    break;
                }
            }
            '"' => return start + 1 + offset + 1,
            _ => {}
        }
    }
    source.len()
}

/// Splits `source` into tokens.
///
/// At each position the first matching rule wins:
/// 1. `//` comment up to (not including) the next `\n`
/// 2. `"` string up to the next unescaped `"` or end of input
/// 3. word (`[A-Za-z_][A-Za-z0-9_]*`), classified against the vocabularies
/// 4. run of ASCII digits
/// 5. a single whitespace character
/// 6. any other single character as an operator
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(ch) = source[pos..].chars().next() {
        let (kind, end) = if source[pos..].starts_with("//") {
            (TokenKind::Comment, scan_comment(source, pos))
        } else if ch == '"' {
            (TokenKind::String, scan_string(source, pos))
        } else if is_word_start(ch) {
            let end = scan_while(source, pos, is_word_continue);
            let kind = match vocabulary::classify_word(&source[pos..end]) {
                WordClass::Keyword => TokenKind::Keyword,
                WordClass::BuiltinValue => TokenKind::Value,
                WordClass::Identifier => TokenKind::Identifier,
            };
            (kind, end)
        } else if ch.is_ascii_digit() {
            (TokenKind::Value, scan_while(source, pos, |c| c.is_ascii_digit()))
        } else if ch.is_whitespace() {
            (TokenKind::Whitespace, pos + ch.len_utf8())
        } else {
            (TokenKind::Operator, pos + ch.len_utf8())
        };

        tokens.push(Token::new(kind, source, pos, end));
        pos = end;
    }

    tokens
}

/// Returns the index of the first non-whitespace token at or after `from`.
pub fn skip_whitespace(tokens: &[Token<'_>], from: usize) -> usize {
    tokens[from.min(tokens.len())..]
        .iter()
        .position(|token| !token.is_whitespace())
        .map_or(tokens.len(), |offset| from + offset)
}
