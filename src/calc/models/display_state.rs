//! Display state model
//!
//! The pair of strings the user sees: the expression being composed and the
//! result region. The result region holds the last rendered value or a
//! status/error token and is never copied back into the expression.

/// Result shown on start-up and after a clear
pub const INITIAL_RESULT: &str = "0";

/// Result shown while a computation is in flight
pub const PENDING_TOKEN: &str = "…";

/// Result shown when the evaluation service cannot be reached or answers garbage
pub const NETWORK_ERROR_TOKEN: &str = "Network error";

/// Result shown when the service rejects an expression without a message
pub const GENERIC_ERROR_TOKEN: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    expression: String,
    result: String,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            expression: String::new(),
            result: INITIAL_RESULT.to_string(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    /// Replace the expression field, returning whether it changed
    pub fn set_expression(&mut self, expression: &str) -> bool {
        if self.expression == expression {
            return false;
        }
        self.expression = expression.to_string();
        true
    }

    /// Replace the result field, returning whether it changed
    pub fn set_result(&mut self, result: &str) -> bool {
        if self.result == result {
            return false;
        }
        self.result = result.to_string();
        true
    }

    /// Whether the result region currently shows the in-flight token
    pub fn is_showing_pending(&self) -> bool {
        self.result == PENDING_TOKEN
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
