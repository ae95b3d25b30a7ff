//! # Calculator Client
//!
//! Session, dispatch and terminal front end of the calculator client.
//!
//! ```text
//! ┌────────────┐  intents   ┌─────────────┐  snapshot   ┌────────────┐
//! │ Controller │───────────▶│   Session   │────────────▶│ Evaluator  │
//! │            │            │             │             │  (HTTP)    │
//! │ - Input    │◀───────────│ - Buffer    │◀────────────│            │
//! │ - Renderer │  display   │ - Tickets   │  outcome    └────────────┘
//! └────────────┘            └─────────────┘
//! ```

pub mod commands;
pub mod controller;
pub mod events;
pub mod ex_commands;
pub mod models;
pub mod services;
pub mod session;
pub mod theme;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use commands::{Command, CommandOutcome, CommandRegistry, Intent, Key};
pub use controller::AppController;
pub use events::{DisplayChangeHandler, DisplayNotifier};
pub use ex_commands::{ExCommandEvent, ExCommandRegistry};
pub use models::{is_allowed_char, ComputationOutcome, DisplayState, ExpressionBuffer};
pub use services::{EvaluationError, Evaluator, HttpEvaluator};
pub use session::{CalculationSession, Resolution, SessionState, Ticket};
pub use theme::{ThemePreference, ThemeState};
pub use view::TerminalRenderer;
