//! # Calculation Session
//!
//! Owns the expression buffer, the display and the lifecycle of computation
//! requests. The session is either `Idle` or `Pending`.
//!
//! Every submit snapshots the normalized buffer, gets a fresh [`Ticket`] and
//! runs the remote call in a spawned task that reports back over a channel.
//! Only the outcome of the most recent ticket is applied; outcomes of older
//! tickets are discarded as superseded, so a slow stale response can never
//! overwrite a newer result.

use crate::calc::events::{DisplayChangeHandler, DisplayNotifier};
use crate::calc::models::{ComputationOutcome, DisplayState, ExpressionBuffer, PENDING_TOKEN};
use crate::calc::services::Evaluator;
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Monotonically increasing sequence token assigned to each submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Waiting for the outcome of `ticket`, the latest submit
    Pending { ticket: Ticket },
}

/// A finished remote call, as reported by its task
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedComputation {
    pub ticket: Ticket,
    pub expression: String,
    pub outcome: ComputationOutcome,
}

/// What the session did with a completed computation
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Applied {
        ticket: Ticket,
        outcome: ComputationOutcome,
    },
    Superseded {
        ticket: Ticket,
    },
}

pub struct CalculationSession {
    buffer: ExpressionBuffer,
    display: DisplayState,
    state: SessionState,
    /// Value of the last ticket handed out; 0 before the first submit
    last_issued: u64,
    evaluator: Arc<dyn Evaluator>,
    notifier: DisplayNotifier,
    outcome_sender: mpsc::Sender<CompletedComputation>,
    outcome_receiver: mpsc::Receiver<CompletedComputation>,
}

impl CalculationSession {
    pub fn new(evaluator: Arc<dyn Evaluator>) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::channel(16);
        Self {
            buffer: ExpressionBuffer::new(),
            display: DisplayState::new(),
            state: SessionState::Idle,
            last_issued: 0,
            evaluator,
            notifier: DisplayNotifier::new(),
            outcome_sender,
            outcome_receiver,
        }
    }

    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::Pending { .. })
    }

    /// Register a callback for `(expression, result)` changes
    pub fn subscribe_display_changes(&mut self, handler: DisplayChangeHandler) {
        self.notifier.subscribe(handler);
    }

    /// Append a keystroke or a button label verbatim
    pub fn append_value(&mut self, value: &str) {
        self.buffer.append(value);
        self.sync_display(None);
    }

    pub fn backspace(&mut self) {
        self.buffer.backspace();
        self.sync_display(None);
    }

    /// Empty the buffer and reset the result region to `reset_result_to`.
    /// Outstanding requests are not aborted.
    pub fn clear_all(&mut self, reset_result_to: &str) {
        self.buffer.clear();
        self.sync_display(Some(reset_result_to));
    }

    /// Send the normalized buffer for evaluation.
    ///
    /// Returns `None` without issuing a request when the normalized buffer is
    /// empty or when no tokio runtime is available to run the request.
    pub fn submit(&mut self) -> Option<Ticket> {
        let expression = self.buffer.normalize();
        if expression.is_empty() {
            tracing::debug!("Submit ignored: expression is empty");
            return None;
        }
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(
                    "Submit ignored: no async runtime to evaluate '{}': {}",
                    expression,
                    e
                );
                return None;
            }
        };

        self.last_issued += 1;
        let ticket = Ticket(self.last_issued);
        if let SessionState::Pending { ticket: previous } = self.state {
            tracing::debug!("Submit {} supersedes outstanding {}", ticket, previous);
        }
        self.state = SessionState::Pending { ticket };
        self.sync_display(Some(PENDING_TOKEN));

        tracing::debug!("Submitting {} expression='{}'", ticket, expression);

        let evaluator = Arc::clone(&self.evaluator);
        let sender = self.outcome_sender.clone();
        runtime.spawn(async move {
            let outcome = evaluator.evaluate(&expression).await;
            // The receiver lives as long as the session; a send error only
            // means the session is gone.
            let _ = sender
                .send(CompletedComputation {
                    ticket,
                    expression,
                    outcome,
                })
                .await;
        });

        Some(ticket)
    }

    /// Wait for the next completed computation and resolve it.
    ///
    /// Waits indefinitely while nothing is in flight. Cancel safe.
    pub async fn next_outcome(&mut self) -> Option<Resolution> {
        let completed = self.outcome_receiver.recv().await?;
        Some(self.resolve(completed))
    }

    /// Resolve a completed computation if one has already arrived
    pub fn try_next_outcome(&mut self) -> Option<Resolution> {
        let completed = self.outcome_receiver.try_recv().ok()?;
        Some(self.resolve(completed))
    }

    /// Apply `completed` if it belongs to the latest submit, otherwise discard it
    pub fn resolve(&mut self, completed: CompletedComputation) -> Resolution {
        let CompletedComputation {
            ticket,
            expression,
            outcome,
        } = completed;

        if ticket.value() < self.last_issued {
            tracing::debug!(
                "Discarding outcome of {} ('{}'): superseded by #{}",
                ticket,
                expression,
                self.last_issued
            );
            return Resolution::Superseded { ticket };
        }

        tracing::debug!("Applying outcome of {} ('{}'): {:?}", ticket, expression, outcome);

        self.state = SessionState::Idle;
        if outcome.clears_buffer() {
            self.buffer.clear();
        }
        self.sync_display(Some(&outcome.display_text()));

        Resolution::Applied { ticket, outcome }
    }

    /// Copy the buffer into the display, optionally replacing the result, and
    /// notify subscribers if anything changed.
    fn sync_display(&mut self, result: Option<&str>) {
        let expression_changed = self.display.set_expression(self.buffer.text());
        let result_changed = result.is_some_and(|r| self.display.set_result(r));

        if expression_changed || result_changed {
            self.notifier
                .publish(self.display.expression(), self.display.result());
        }
    }
}
