/*!
 * Streaming client for the slide-generation workflow API.
 *
 * Sends one markdown input to the workflow endpoint in streaming mode and
 * feeds the response body to the stream extractor. Retry policy, if any,
 * belongs to the caller; this client performs exactly one request.
 */

use std::time::Duration;

use log::{debug, error};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ExtractError;
use crate::stream_extractor;

/// Client for running the slide-generation workflow
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    /// HTTP client for API requests
    client: Client,
    /// Workflow endpoint URL
    endpoint: String,
    /// API key sent as a Bearer token
    api_key: String,
    /// User identifier passed to the workflow service
    user: String,
}

/// Workflow run request body
#[derive(Debug, Serialize)]
struct WorkflowRequest<'a> {
    inputs: WorkflowInputs<'a>,
    response_mode: &'static str,
    user: &'a str,
}

/// Named inputs of the workflow; the single input is the captured markdown
#[derive(Debug, Serialize)]
struct WorkflowInputs<'a> {
    input: &'a str,
}

impl WorkflowClient {
    /// Create a new workflow client
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        user: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            user: user.into(),
        }
    }

    /// Run the workflow on one markdown input and return the outputs of the
    /// last `workflow_finished` event, or `None` when the stream ends
    /// without one.
    pub async fn run(&self, input: &str) -> Result<Option<Value>, ExtractError> {
        let request = WorkflowRequest {
            inputs: WorkflowInputs { input },
            response_mode: "streaming",
            user: &self.user,
        };

        debug!("Starting workflow run against {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                ExtractError::Transport(format!("failed to send workflow request: {}", err))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response text".to_string());
            error!("Workflow API error ({}): {}", status, message);
            return Err(ExtractError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        stream_extractor::extract_workflow_outputs(Box::pin(response.bytes_stream())).await
    }
}
