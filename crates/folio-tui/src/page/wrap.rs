//! Text measurement helpers

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width in terminal cells, saturating at `u16::MAX`
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Greedy word wrap to `width` cells
///
/// Words wider than a line are split. Blank input yields no lines.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if current_width + w > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += w;
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split a heading before its last word, which is drawn in the accent color
///
/// "Experience & Education" -> ("Experience & ", "Education")
pub fn split_heading(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.rfind(' ') {
        Some(idx) => (&text[..=idx], &text[idx + 1..]),
        None => ("", text),
    }
}

/// Drop the first `columns` cells of `text`; a wide char cut in half is dropped whole
pub fn skip_columns(text: &str, columns: u16) -> (&str, u16) {
    let mut skipped = 0u16;
    for (idx, ch) in text.char_indices() {
        if skipped >= columns {
            return (&text[idx..], skipped - columns);
        }
        skipped = skipped.saturating_add(ch.width().unwrap_or(0) as u16);
    }
    ("", skipped.saturating_sub(columns))
}
