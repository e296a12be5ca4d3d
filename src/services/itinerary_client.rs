use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, StorefrontError};
use crate::types::{ItineraryReply, ItineraryRequest};

pub const DEFAULT_AI_BASE_URL: &str = "http://localhost:8082";

/// Remote AI itinerary generation.
#[async_trait]
pub trait ItineraryApi: Send + Sync + std::fmt::Debug {
    async fn generate(&self, request: &ItineraryRequest) -> Result<ItineraryReply>;
}

/// [`ItineraryApi`] over `POST {base}/api/ai/itinerary`.
#[derive(Clone, Debug)]
pub struct HttpItineraryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpItineraryClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| StorefrontError::Config(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn build_itinerary_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/api/ai/itinerary") {
        trimmed.to_string()
    } else {
        format!("{}/api/ai/itinerary", trimmed)
    }
}

#[async_trait]
impl ItineraryApi for HttpItineraryClient {
    async fn generate(&self, request: &ItineraryRequest) -> Result<ItineraryReply> {
        let url = build_itinerary_url(&self.base_url);
        debug!(
            target: "storefront::itinerary",
            destination = %request.destination,
            history = request.history.len(),
            "requesting itinerary"
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| StorefrontError::Transport(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| StorefrontError::Transport(format!("Failed to read response: {err}")))?;

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                });
            warn!(target: "storefront::itinerary", %status, "itinerary request failed");
            return Err(match api_message {
                Some(message) => StorefrontError::Api(message),
                None => StorefrontError::Transport(format!(
                    "Request failed with status code {}",
                    status.as_u16()
                )),
            });
        }

        let reply: ItineraryReply = serde_json::from_str(&response_text)
            .map_err(|err| StorefrontError::Transport(format!("Failed to parse JSON: {err}")))?;
        Ok(reply)
    }
}
