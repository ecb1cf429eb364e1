// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use proptest::prelude::*;
use scriptlight::syntax::{classify, highlight, tokenize};

/// Text biased towards the characters the tokenizer and classifier care about.
fn script_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("for".to_string()),
        Just("in".to_string()),
        Just("function".to_string()),
        Just("true".to_string()),
        "[a-z_][a-z0-9_]{0,4}",
        "[0-9]{1,3}",
        Just("//".to_string()),
        Just("\"".to_string()),
        Just("\\".to_string()),
        Just("\n".to_string()),
        prop::sample::select(vec![" ", "\t", "=", "(", ")", "[", "]", ",", "<", ">", "&", "é", "→"])
            .prop_map(str::to_string),
    ];
    prop::collection::vec(piece, 0..64).prop_map(|pieces| pieces.concat())
}

fn any_text() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..256).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn tokenize_is_lossless(source in prop_oneof![script_text(), any_text()]) {
        let joined: String = tokenize(&source).iter().map(|t| t.text).collect();
        prop_assert_eq!(joined, source);
    }

    #[test]
    fn tokens_partition_the_input(source in prop_oneof![script_text(), any_text()]) {
        let mut pos = 0;
        for token in tokenize(&source) {
            prop_assert_eq!(token.start, pos);
            prop_assert!(token.end > token.start);
            prop_assert_eq!(&source[token.start..token.end], token.text);
            pos = token.end;
        }
        prop_assert_eq!(pos, source.len());
    }

    #[test]
    fn classification_is_idempotent(source in script_text()) {
        let tokens = tokenize(&source);
        prop_assert_eq!(classify(&tokens, &source), classify(&tokens, &source));
    }

    #[test]
    fn highlight_never_leaks_markup_from_source(source in prop_oneof![script_text(), any_text()]) {
        let markup = highlight(&source);
        prop_assert!(!markup.is_empty());

        // Strip the spans the renderer adds; what remains is escaped source text.
        let mut text = markup.clone();
        for class in ["comment", "value", "keyword", "function", "variable", "param"] {
            text = text.replace(&format!("<span class=\"{class}\">"), "");
        }
        text = text.replace("</span>", "");
        prop_assert!(!text.contains('<'));
        prop_assert!(!text.contains('>'));

        let unescaped_amp = text
            .match_indices('&')
            .any(|(i, _)| !["&amp;", "&lt;", "&gt;", "&nbsp;"].iter().any(|e| text[i..].starts_with(e)));
        prop_assert!(!unescaped_amp);
    }

    #[test]
    fn highlight_matches_across_calls(source in script_text()) {
        prop_assert_eq!(highlight(&source), highlight(&source));
    }
}

#[test]
fn highlight_empty_is_placeholder() {
    assert_eq!(highlight(""), "&nbsp;");
}
