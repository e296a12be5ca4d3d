use std::fmt::Write as _;
use std::sync::Arc;

use tracing::info;

use crate::core::ChatHistory;
use crate::error::{Result, StorefrontError};
use crate::services::ItineraryApi;
use crate::types::{ChatMessage, ItineraryRequest, Role, TravelStyle};

pub const MAX_DAYS: u32 = 30;
const DEFAULT_DAYS: u32 = 3;
const UNKNOWN_DESTINATION: &str = "Unknown destination";

/// Planner form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerForm {
    pub destination: String,
    pub days: u32,
    pub style: TravelStyle,
}

impl Default for PlannerForm {
    fn default() -> Self {
        Self {
            destination: String::new(),
            days: DEFAULT_DAYS,
            style: TravelStyle::default(),
        }
    }
}

/// Chat-style wrapper around the AI itinerary service.
#[derive(Debug)]
pub struct ItineraryPlanner {
    api: Arc<dyn ItineraryApi>,
    form: PlannerForm,
    chat: ChatHistory,
}

impl ItineraryPlanner {
    pub fn new(api: Arc<dyn ItineraryApi>) -> Self {
        Self {
            api,
            form: PlannerForm::default(),
            chat: ChatHistory::new(),
        }
    }

    pub fn form(&self) -> &PlannerForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PlannerForm {
        &mut self.form
    }

    /// Ask for a fresh itinerary from the form fields.
    pub async fn generate(&mut self) -> Result<()> {
        let destination = self.form.destination.trim().to_string();
        let days = self.form.days;
        if destination.is_empty() || !(1..=MAX_DAYS).contains(&days) {
            let err = StorefrontError::Validation(
                "Please enter a destination and valid number of days.".to_string(),
            );
            self.chat.set_error(err.to_string());
            return Err(err);
        }

        let style = self.form.style;
        let prompt = format!(
            "Generate a {}-day itinerary for {} (style: {}).",
            days, destination, style
        );
        let history = self.chat.begin_turn(prompt);
        self.send(ItineraryRequest {
            destination,
            days,
            style,
            history,
        })
        .await
    }

    /// Follow-up message refining the current plan. Blank text is ignored.
    pub async fn refine(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let destination = match self.form.destination.trim() {
            "" => UNKNOWN_DESTINATION.to_string(),
            name => name.to_string(),
        };
        let days = match self.form.days {
            days if (1..=MAX_DAYS).contains(&days) => days,
            _ => DEFAULT_DAYS,
        };
        let history = self.chat.begin_turn(text);
        self.send(ItineraryRequest {
            destination,
            days,
            style: self.form.style,
            history,
        })
        .await
    }

    async fn send(&mut self, request: ItineraryRequest) -> Result<()> {
        info!(
            target: "storefront::planner",
            destination = %request.destination,
            days = request.days,
            style = %request.style,
            context = request.history.len(),
            "sending itinerary request"
        );
        match self.api.generate(&request).await {
            Ok(reply) => {
                self.chat.complete(reply.content);
                Ok(())
            }
            Err(err) => {
                self.chat.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Reset the conversation to a single greeting.
    pub fn clear(&mut self) {
        self.chat.clear();
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.chat.last_reply()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    pub fn chat(&self) -> &ChatHistory {
        &self.chat
    }

    pub fn error(&self) -> Option<&str> {
        self.chat.error()
    }

    pub fn is_thinking(&self) -> bool {
        self.chat.is_awaiting()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for message in self.chat.messages() {
            let speaker = match message.role {
                Role::User => "You",
                Role::Assistant => "Planner",
            };
            let _ = writeln!(out, "{}:\n{}\n", speaker, message.content);
        }
        if self.is_thinking() {
            out.push_str("AI is thinking...\n");
        }
        if let Some(error) = self.error() {
            let _ = writeln!(out, "Error: {}", error);
        }
        out
    }
}
