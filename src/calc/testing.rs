//! Test doubles for the evaluation service

use crate::calc::models::ComputationOutcome;
use crate::calc::services::Evaluator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Answers from a fixed table and records every expression it receives.
/// Unknown expressions produce a transport error.
#[derive(Default)]
pub struct ScriptedEvaluator {
    answers: HashMap<String, ComputationOutcome>,
    received: Arc<Mutex<Vec<String>>>,
}

impl ScriptedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, expression: &str, outcome: ComputationOutcome) -> Self {
        self.answers.insert(expression.to_string(), outcome);
        self
    }

    /// Shared log of received expressions, in call order
    pub fn received(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.received)
    }
}

#[async_trait]
impl Evaluator for ScriptedEvaluator {
    async fn evaluate(&self, expression: &str) -> ComputationOutcome {
        self.received.lock().unwrap().push(expression.to_string());
        self.answers
            .get(expression)
            .cloned()
            .unwrap_or(ComputationOutcome::TransportError)
    }
}

/// Holds each response until the test releases it, so tests control the
/// order in which outcomes arrive.
#[derive(Default)]
pub struct GatedEvaluator {
    gates: Mutex<HashMap<String, oneshot::Receiver<ComputationOutcome>>>,
}

impl GatedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gate for `expression`; sending on the returned sender
    /// releases the response.
    pub fn gate(&self, expression: &str) -> oneshot::Sender<ComputationOutcome> {
        let (sender, receiver) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .insert(expression.to_string(), receiver);
        sender
    }
}

#[async_trait]
impl Evaluator for GatedEvaluator {
    async fn evaluate(&self, expression: &str) -> ComputationOutcome {
        let gate = self.gates.lock().unwrap().remove(expression);
        match gate {
            Some(receiver) => receiver
                .await
                .unwrap_or(ComputationOutcome::TransportError),
            None => ComputationOutcome::TransportError,
        }
    }
}
