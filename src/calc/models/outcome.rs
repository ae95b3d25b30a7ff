//! Computation outcome model
//!
//! The tagged result of one computation attempt and how each variant is shown
//! in the result region.

use super::display_state::NETWORK_ERROR_TOKEN;

/// Result of one submit, produced once and consumed exactly once
#[derive(Debug, Clone, PartialEq)]
pub enum ComputationOutcome {
    /// The service evaluated the expression
    Success(f64),
    /// The service refused the expression; carries the message to show
    RemoteError(String),
    /// The service could not be reached or answered with an unusable body
    TransportError,
}

impl ComputationOutcome {
    /// Text for the result region
    pub fn display_text(&self) -> String {
        match self {
            ComputationOutcome::Success(value) => format_number(*value),
            ComputationOutcome::RemoteError(message) => message.clone(),
            ComputationOutcome::TransportError => NETWORK_ERROR_TOKEN.to_string(),
        }
    }

    /// Only a success consumes the expression buffer
    pub fn clears_buffer(&self) -> bool {
        matches!(self, ComputationOutcome::Success(_))
    }
}

/// Decimal form of a result: integers without a fractional part, everything
/// else in its shortest round-trip representation.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // -0.0 would otherwise print as "-0"
        return "0".to_string();
    }
    value.to_string()
}
