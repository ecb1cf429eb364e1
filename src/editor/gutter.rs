// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Line-number gutter.

/// Returns the number of display lines in `text`: one more than its line breaks.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Returns the gutter text: `1` through [`line_count`], one per line.
pub fn line_numbers(text: &str) -> String {
    let count = line_count(text);
    let mut out = String::with_capacity(count * 4);
    for number in 1..=count {
        if number > 1 {
            out.push('\n');
        }
        out.push_str(&number.to_string());
    }
    out
}
