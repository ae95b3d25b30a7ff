//! Expression buffer model
//!
//! Holds the text of the calculation currently being composed. The buffer is a
//! plain accumulator: it never validates what it is given, and it performs no I/O.

/// Returns true when `ch` is one of the symbols accepted from raw keyboard input.
///
/// Button input bypasses this check and is appended verbatim.
pub fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.' | '^')
}

/// Mutable text of the expression being composed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    text: String,
}

impl ExpressionBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Current text of the buffer
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append `value` to the end of the buffer. Never fails.
    pub fn append(&mut self, value: &str) {
        self.text.push_str(value);
    }

    /// Remove the last character. Does nothing on an empty buffer.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Text with surrounding whitespace trimmed, as sent to the evaluation service.
    pub fn normalize(&self) -> String {
        self.text.trim().to_string()
    }
}
