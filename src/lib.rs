//! # calcline - Terminal Calculator Client
//!
//! Keeps an expression buffer edited through discrete intents and sends it to
//! a remote evaluation service for the result.
//!
//! ## Architecture
//!
//! - **Models**: expression buffer, display state and computation outcomes
//! - **Session**: the Idle/Pending state machine owning one buffer and display
//! - **Services**: the evaluation service seam and its HTTP implementation
//! - **Controller**: input mapping, ex commands and rendering for the terminal

pub mod calc;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use calc::*;
