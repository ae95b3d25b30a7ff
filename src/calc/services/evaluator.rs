//! # Evaluation Service
//!
//! The seam between the calculation session and the remote service that
//! actually evaluates expressions. `HttpEvaluator` talks to it over HTTP; tests
//! substitute in-memory evaluators.

use crate::calc::models::{ComputationOutcome, GENERIC_ERROR_TOKEN};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path of the evaluation endpoint relative to the server base URL
pub const CALC_API_PATH: &str = "/api/calc";

/// Evaluates one expression remotely
///
/// Implementations never fail: every problem is folded into a
/// [`ComputationOutcome`] so the session always gets exactly one outcome per submit.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, expression: &str) -> ComputationOutcome;
}

/// Transport-level problems talking to the evaluation service
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("request to evaluation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("evaluation service returned an unusable body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct CalcRequest<'a> {
    expression: &'a str,
}

#[derive(Debug, Deserialize)]
struct CalcResponse {
    result: f64,
}

/// Error body. `detail` is usually a string, but validation failures carry a
/// list of objects instead, so it is kept untyped and only used when it is text.
#[derive(Debug, Default, Deserialize)]
struct CalcErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl CalcErrorResponse {
    fn message(&self) -> String {
        self.detail
            .as_ref()
            .and_then(|detail| detail.as_str())
            .filter(|detail| !detail.is_empty())
            .unwrap_or(GENERIC_ERROR_TOKEN)
            .to_string()
    }
}

/// Evaluator backed by the HTTP evaluation service
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEvaluator {
    /// Create an evaluator for the service at `server` (a base URL such as
    /// `http://127.0.0.1:8000`). No request timeout is configured.
    pub fn new(server: &str) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let endpoint = format!("{}{}", server.trim_end_matches('/'), CALC_API_PATH);
        tracing::debug!("HttpEvaluator targeting {}", endpoint);
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, expression: &str) -> Result<ComputationOutcome, EvaluationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CalcRequest { expression })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            let parsed: CalcResponse = serde_json::from_slice(&body)?;
            Ok(ComputationOutcome::Success(parsed.result))
        } else {
            let parsed: CalcErrorResponse = serde_json::from_slice(&body)?;
            tracing::debug!(
                "Evaluation rejected with status {}: {:?}",
                status.as_u16(),
                parsed.detail
            );
            Ok(ComputationOutcome::RemoteError(parsed.message()))
        }
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn evaluate(&self, expression: &str) -> ComputationOutcome {
        match self.request(expression).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Evaluation of '{}' failed: {}", expression, e);
                ComputationOutcome::TransportError
            }
        }
    }
}
