use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{Result, StorefrontError};

pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:8080/graphql";

/// Minimal GraphQL-over-HTTP transport.
///
/// Every call is a single POST; nothing is retried. Failures surface either
/// as `Transport` (no usable GraphQL payload) or `Api` (the server answered
/// with `errors`).
#[derive(Clone, Debug)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| StorefrontError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `document` and deserialize `data.<field>`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
        field: &str,
    ) -> Result<T> {
        let data = self.execute_raw(operation, document, variables).await?;
        let value = data.get(field).cloned().unwrap_or(Value::Null);
        serde_path_to_error::deserialize(value).map_err(|err| {
            StorefrontError::Transport(format!(
                "Unexpected {} response at {}: {}",
                operation,
                err.path(),
                err.inner()
            ))
        })
    }

    /// Run `document` and return the raw `data` object.
    pub async fn execute_raw(&self, operation: &str, document: &str, variables: Value) -> Result<Value> {
        debug!(target: "storefront::graphql", operation, "sending request");

        let body = json!({
            "operationName": operation,
            "query": document,
            "variables": variables,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| StorefrontError::Transport(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| StorefrontError::Transport(format!("Failed to read response: {err}")))?;

        let response_json: Value = match serde_json::from_str(&response_text) {
            Ok(json) => json,
            Err(_) if !status.is_success() => {
                return Err(StorefrontError::Transport(format!(
                    "HTTP {} error: {}",
                    status,
                    response_text.trim()
                )));
            }
            Err(err) => {
                return Err(StorefrontError::Transport(format!("Failed to parse JSON: {err}")));
            }
        };

        if let Some(message) = first_error_message(&response_json) {
            warn!(target: "storefront::graphql", operation, "server reported error: {}", message);
            return Err(StorefrontError::Api(message));
        }

        if !status.is_success() {
            return Err(StorefrontError::Transport(format!(
                "HTTP {} error: {}",
                status,
                response_text.trim()
            )));
        }

        match response_json.get("data") {
            Some(data) if data.is_object() => Ok(data.clone()),
            _ => Err(StorefrontError::Transport(format!(
                "{} response carried no data",
                operation
            ))),
        }
    }
}

fn first_error_message(response: &Value) -> Option<String> {
    let errors = response.get("errors")?.as_array()?;
    let first = errors.first()?;
    Some(
        first
            .get("message")
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| first.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_message() {
        let response = json!({
            "data": null,
            "errors": [{"message": "Hotel not available"}, {"message": "second"}]
        });
        assert_eq!(
            first_error_message(&response).as_deref(),
            Some("Hotel not available")
        );
        assert_eq!(first_error_message(&json!({"errors": []})), None);
        assert_eq!(first_error_message(&json!({"data": {}})), None);
    }
}
