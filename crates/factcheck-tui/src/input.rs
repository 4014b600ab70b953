//! Single-line text input with a unicode-safe cursor.

/// Editable input line. The cursor is a char index, not a byte index.
#[derive(Debug, Default, Clone)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Replace the whole text and move the cursor to the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor);
        self.text.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.remove_at_cursor();
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            self.remove_at_cursor();
        }
    }

    fn remove_at_cursor(&mut self) {
        if let Some((byte_idx, ch)) = self.text.char_indices().nth(self.cursor) {
            self.text
                .replace_range(byte_idx..byte_idx + ch.len_utf8(), "");
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_edit_multibyte() {
        let mut input = InputLine::default();
        for c in "café".chars() {
            input.insert(c);
        }
        assert_eq!(input.text(), "café");
        assert_eq!(input.cursor(), 4);

        input.move_left();
        input.insert('x');
        assert_eq!(input.text(), "cafxé");

        input.delete();
        assert_eq!(input.text(), "cafx");
        input.backspace();
        assert_eq!(input.text(), "caf");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = InputLine::default();
        input.move_left();
        input.backspace();
        input.delete();
        assert_eq!(input.cursor(), 0);

        input.set("omega-3");
        assert_eq!(input.cursor(), 7);
        input.move_right();
        assert_eq!(input.cursor(), 7);
        input.move_home();
        input.insert('>');
        assert_eq!(input.text(), ">omega-3");
    }

    #[test]
    fn test_set_and_clear() {
        let mut input = InputLine::default();
        input.set("é ok");
        assert_eq!(input.cursor(), 4);
        input.clear();
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
    }
}
