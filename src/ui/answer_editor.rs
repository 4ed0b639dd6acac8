use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest free-text answer accepted; keeps the input on a handful of lines.
pub const MAX_ANSWER_CHARS: usize = 240;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Editing,
    Commit,
    Discard,
}

/// In-place editor for one free-text answer. The buffer is kept as chars so
/// that formulas typed with Unicode subscripts edit one glyph at a time.
#[derive(Clone, Debug)]
pub struct AnswerEditor {
    question: String,
    buffer: Vec<char>,
    cursor: usize,
}

impl AnswerEditor {
    pub fn new(question: &str, initial: &str) -> Self {
        let buffer: Vec<char> = initial.chars().take(MAX_ANSWER_CHARS).collect();
        Self {
            question: question.to_string(),
            cursor: buffer.len(),
            buffer,
        }
    }

    /// Id of the question being answered.
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before the cursor, the glyph under it (None at the end), and the rest.
    pub fn split_at_cursor(&self) -> (String, Option<char>, String) {
        let before = self.buffer[..self.cursor].iter().collect();
        let under = self.buffer.get(self.cursor).copied();
        let after = self
            .buffer
            .get(self.cursor + 1..)
            .map(|rest| rest.iter().collect())
            .unwrap_or_default();
        (before, under, after)
    }

    pub fn handle(&mut self, key: KeyEvent) -> EditOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => return EditOutcome::Discard,
            KeyCode::Enter => return EditOutcome::Commit,

            KeyCode::Left if ctrl || alt => self.cursor = self.word_start_before(),
            KeyCode::Right if ctrl || alt => self.cursor = self.word_end_after(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.buffer.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buffer.len(),

            KeyCode::Backspace if ctrl || alt => self.delete_to(self.word_start_before()),
            KeyCode::Backspace => self.delete_to(self.cursor.saturating_sub(1)),
            KeyCode::Delete => {
                if self.cursor < self.buffer.len() {
                    self.buffer.remove(self.cursor);
                }
            }

            KeyCode::Char(ch) if ctrl => match ch {
                'a' => self.cursor = 0,
                'e' => self.cursor = self.buffer.len(),
                'u' => self.delete_to(0),
                'k' => self.buffer.truncate(self.cursor),
                'w' => self.delete_to(self.word_start_before()),
                _ => {}
            },
            KeyCode::Char('b') if alt => self.cursor = self.word_start_before(),
            KeyCode::Char('f') if alt => self.cursor = self.word_end_after(),
            KeyCode::Char(ch) => self.insert(ch),
            _ => {}
        }
        EditOutcome::Editing
    }

    fn insert(&mut self, ch: char) {
        if self.buffer.len() >= MAX_ANSWER_CHARS || ch.is_control() {
            return;
        }
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Remove everything between `start` and the cursor.
    fn delete_to(&mut self, start: usize) {
        if start < self.cursor {
            self.buffer.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    fn word_start_before(&self) -> usize {
        let mut pos = self.cursor;
        while pos > 0 && self.buffer[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !self.buffer[pos - 1].is_whitespace() {
            pos -= 1;
        }
        pos
    }

    fn word_end_after(&self) -> usize {
        let len = self.buffer.len();
        let mut pos = self.cursor;
        while pos < len && self.buffer[pos].is_whitespace() {
            pos += 1;
        }
        while pos < len && !self.buffer[pos].is_whitespace() {
            pos += 1;
        }
        pos
    }
}
