//! # Display Events
//!
//! Observer plumbing between the calculation session and whatever renders it.
//! The session publishes the full `(expression, result)` pair every time either
//! field changes; subscribers never receive partial updates.

/// Callback invoked with `(expression, result)` after a display change
pub type DisplayChangeHandler = Box<dyn Fn(&str, &str) + Send + Sync>;

/// Fan-out of display changes to every subscriber
pub struct DisplayNotifier {
    handlers: Vec<DisplayChangeHandler>,
}

impl DisplayNotifier {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, handler: DisplayChangeHandler) {
        self.handlers.push(handler);
    }

    pub fn publish(&self, expression: &str, result: &str) {
        for handler in &self.handlers {
            handler(expression, result);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for DisplayNotifier {
    fn default() -> Self {
        Self::new()
    }
}
