use super::control::EditCursor;

/// Caret and selection over multi-line text. All positions are char indices.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEditState {
    pub value: String,
    pub caret: usize,
    pub anchor: usize,
}

impl TextEditState {
    pub fn new(value: impl Into<String>, caret: usize, anchor: usize) -> Self {
        let value = value.into();
        let len = value.chars().count();
        Self {
            value,
            caret: caret.min(len),
            anchor: anchor.min(len),
        }
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn cursor(&self) -> EditCursor {
        EditCursor {
            caret: self.caret,
            anchor: self.anchor,
        }
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        match self.anchor.cmp(&self.caret) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Less => Some((self.anchor, self.caret)),
            std::cmp::Ordering::Greater => Some((self.caret, self.anchor)),
        }
    }

    /// Selection as a byte range into `value`, for text highlight runs.
    pub fn selection_bytes(&self) -> Option<std::ops::Range<usize>> {
        let (start, end) = self.selection()?;
        Some(byte_index_at_char(&self.value, start)..byte_index_at_char(&self.value, end))
    }

    pub fn selected_text(&self) -> String {
        let Some((start, end)) = self.selection() else {
            return String::new();
        };
        self.value.chars().skip(start).take(end - start).collect()
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.caret = self.len();
    }

    /// Moves the caret to char index `caret`, keeping the anchor when `extend` is set.
    pub fn place_caret(&mut self, caret: usize, extend: bool) {
        self.set_caret(caret, extend);
    }

    fn set_caret(&mut self, caret: usize, extend: bool) {
        self.caret = caret.min(self.len());
        if !extend {
            self.anchor = self.caret;
        }
    }

    pub fn move_left(&mut self, extend: bool) {
        match self.selection() {
            Some((start, _)) if !extend => self.set_caret(start, false),
            _ => self.set_caret(self.caret.saturating_sub(1), extend),
        }
    }

    pub fn move_right(&mut self, extend: bool) {
        match self.selection() {
            Some((_, end)) if !extend => self.set_caret(end, false),
            _ => self.set_caret(self.caret + 1, extend),
        }
    }

    pub fn move_line_start(&mut self, extend: bool) {
        let (line, _) = self.line_col(self.caret);
        let caret = self.char_at_line_col(line, 0);
        self.set_caret(caret, extend);
    }

    pub fn move_line_end(&mut self, extend: bool) {
        let (line, _) = self.line_col(self.caret);
        let caret = self.char_at_line_col(line, usize::MAX);
        self.set_caret(caret, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        let (line, col) = self.line_col(self.caret);
        let caret = if line == 0 {
            0
        } else {
            self.char_at_line_col(line - 1, col)
        };
        self.set_caret(caret, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        let (line, col) = self.line_col(self.caret);
        let caret = if line + 1 >= self.line_count() {
            self.len()
        } else {
            self.char_at_line_col(line + 1, col)
        };
        self.set_caret(caret, extend);
    }

    pub fn delete_backward(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            self.replace_char_range(start, end, "");
            return true;
        }
        if self.caret == 0 {
            return false;
        }
        self.replace_char_range(self.caret - 1, self.caret, "");
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            self.replace_char_range(start, end, "");
            return true;
        }
        if self.caret >= self.len() {
            return false;
        }
        self.replace_char_range(self.caret, self.caret + 1, "");
        true
    }

    pub fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() && self.selection().is_none() {
            return false;
        }
        let (start, end) = self.selection().unwrap_or((self.caret, self.caret));
        self.replace_char_range(start, end, text);
        true
    }

    pub fn replace_char_range(&mut self, start: usize, end: usize, insert: &str) {
        let len = self.len();
        let start = start.min(len);
        let end = end.min(len).max(start);
        let byte_start = byte_index_at_char(&self.value, start);
        let byte_end = byte_index_at_char(&self.value, end);
        self.value.replace_range(byte_start..byte_end, insert);
        self.set_caret(start + insert.chars().count(), false);
    }

    pub fn clamp_to_max_length(&mut self, max_length: Option<usize>) -> bool {
        let Some(limit) = max_length else {
            return false;
        };
        if self.len() <= limit {
            return false;
        }
        self.value = self.value.chars().take(limit).collect();
        self.caret = self.caret.min(limit);
        self.anchor = self.anchor.min(limit);
        true
    }

    pub fn line_count(&self) -> usize {
        self.value.chars().filter(|ch| *ch == '\n').count() + 1
    }

    /// Zero-based line and column of char index `index`.
    pub fn line_col(&self, index: usize) -> (usize, usize) {
        let mut line = 0usize;
        let mut col = 0usize;
        for ch in self.value.chars().take(index) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Char index of `line`/`col`, with `col` clamped to the line's length.
    pub fn char_at_line_col(&self, line: usize, col: usize) -> usize {
        let mut index = 0usize;
        for (current, segment) in self.value.split('\n').enumerate() {
            let segment_len = segment.chars().count();
            if current == line {
                return index + col.min(segment_len);
            }
            index += segment_len + 1;
        }
        self.len()
    }
}

pub fn byte_index_at_char(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(value.len())
}

/// Number of chars starting before byte `byte_index`, clamped to the end of `value`.
pub fn char_index_at_byte(value: &str, byte_index: usize) -> usize {
    value
        .char_indices()
        .take_while(|(index, _)| *index < byte_index)
        .count()
}
