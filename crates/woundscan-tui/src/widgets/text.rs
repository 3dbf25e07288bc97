//! Word wrapping with display-width awareness
//!
//! Popups pre-wrap their content so the renderer knows the exact line
//! count, which bounds the modal scroll.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap `text` to `width` columns. Continuation lines are prefixed with
/// `indent`. Words longer than a line are split.
pub fn wrap(text: &str, width: u16, indent: &str) -> Vec<String> {
    let width = width as usize;
    let indent_width = indent.width();
    if width <= indent_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let limit = if lines.is_empty() {
            width
        } else {
            width - indent_width
        };

        if current_width > 0 && current_width + 1 + word_width > limit {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            let limit = if lines.is_empty() {
                width
            } else {
                width - indent_width
            };
            if current_width + ch_width > limit && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| if i == 0 { line } else { format!("{indent}{line}") })
        .collect()
}
