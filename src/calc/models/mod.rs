//! # Models
//!
//! Plain data owned by the calculation session. Models hold state only; they
//! never perform I/O and never notify anyone on their own.

pub mod display_state;
pub mod expression_buffer;
pub mod outcome;

pub use display_state::{
    DisplayState, GENERIC_ERROR_TOKEN, INITIAL_RESULT, NETWORK_ERROR_TOKEN, PENDING_TOKEN,
};
pub use expression_buffer::{is_allowed_char, ExpressionBuffer};
pub use outcome::{format_number, ComputationOutcome};
