//! Text utilities for TUI rendering.

use unicode_width::UnicodeWidthChar;

/// Display width of a char, treating control characters as one column.
fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Wrap text to `width` columns, prefixing every line with `indent`.
///
/// Breaks at the last space that fits, or mid-word when a word is longer
/// than a line. Blank source lines are kept as bare indents.
pub fn wrap_text_indented(text: &str, width: usize, indent: &str) -> Vec<String> {
    let indent_width: usize = indent.chars().map(char_width).sum();
    let effective_width = width.saturating_sub(indent_width);

    if effective_width == 0 {
        return text.lines().map(|l| format!("{}{}", indent, l)).collect();
    }

    let mut lines = Vec::new();

    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(indent.to_string());
            continue;
        }

        let mut start = 0;
        while start < chars.len() {
            // Longest prefix of chars[start..] that fits
            let mut end = start;
            let mut used = 0;
            while end < chars.len() && used + char_width(chars[end]) <= effective_width {
                used += char_width(chars[end]);
                end += 1;
            }
            if end == start {
                end = start + 1;
            }

            if end < chars.len() {
                if let Some(space) = chars[start..end].iter().rposition(|c| *c == ' ') {
                    if space > 0 {
                        end = start + space;
                    }
                }
            }

            let chunk: String = chars[start..end].iter().collect();
            lines.push(format!("{}{}", indent, chunk.trim_end()));

            start = end;
            while start < chars.len() && chars[start] == ' ' {
                start += 1;
            }
        }
    }

    if lines.is_empty() {
        lines.push(indent.to_string());
    }

    lines
}

/// Keep the tail of `text` so that the char at `cursor` is visible in `width`
/// columns. Returns the visible text and the cursor column within it.
pub fn visible_tail(text: &str, cursor: usize, width: usize) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    if width == 0 {
        return (String::new(), 0);
    }

    // Walk left from the cursor until the window (cursor cell included) is full
    let mut start = cursor;
    let mut used = 1;
    while start > 0 && used + char_width(chars[start - 1]) <= width {
        start -= 1;
        used += char_width(chars[start]);
    }

    let mut visible = String::new();
    let mut cols = 0;
    let mut cursor_col = 0;
    for (i, ch) in chars.iter().enumerate().skip(start) {
        if i == cursor {
            cursor_col = cols;
        }
        let w = char_width(*ch);
        if cols + w > width {
            break;
        }
        visible.push(*ch);
        cols += w;
    }
    if cursor == chars.len() {
        cursor_col = cols.min(width.saturating_sub(1));
    }

    (visible, cursor_col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_prefers_spaces() {
        let wrapped = wrap_text_indented("Limited evidence supports turmeric", 20, "  ");
        assert_eq!(
            wrapped,
            vec!["  Limited evidence", "  supports turmeric"]
        );
    }

    #[test]
    fn test_wrap_long_word() {
        let wrapped = wrap_text_indented("abcdefghij", 6, "  ");
        assert_eq!(wrapped, vec!["  abcd", "  efgh", "  ij"]);
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        let wrapped = wrap_text_indented("one\n\ntwo", 20, "  ");
        assert_eq!(wrapped, vec!["  one", "  ", "  two"]);
        assert_eq!(wrap_text_indented("", 20, "  "), vec!["  "]);
    }

    #[test]
    fn test_visible_tail_short_text() {
        assert_eq!(visible_tail("abc", 3, 10), ("abc".to_string(), 3));
        assert_eq!(visible_tail("abc", 1, 10), ("abc".to_string(), 1));
    }

    #[test]
    fn test_visible_tail_scrolls_to_cursor() {
        let (visible, col) = visible_tail("abcdefghij", 10, 5);
        assert_eq!(visible, "ghij");
        assert_eq!(col, 4);
    }
}
