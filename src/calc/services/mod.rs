//! # Services Layer
//!
//! Services abstract external resources used by the session. The only one is
//! the remote evaluation service.

pub mod evaluator;

pub use evaluator::{EvaluationError, Evaluator, HttpEvaluator, CALC_API_PATH};
