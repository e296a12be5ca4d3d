use crate::types::itinerary::{ChatMessage, Role};
use tracing::info;

/// Trailing messages sent upstream with every request.
pub const CONTEXT_WINDOW: usize = 6;

pub const GREETING: &str = "Hi! I'm your AI travel planner. Enter destination, days, and style to generate an itinerary, then refine it with follow-ups.";
pub const CLEARED_GREETING: &str = "Cleared. Start again: enter destination, days, and style, then refine with follow-up messages.";
pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't generate a response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingResponse,
}

/// Ordered planner conversation.
///
/// The visible history is unbounded; only the payload sent upstream is cut
/// to the last [`CONTEXT_WINDOW`] messages. The first message is always a
/// synthetic assistant greeting.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    state: TurnState,
    error: Option<String>,
    window: usize,
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    fn with_greeting(greeting: &str) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(greeting)],
            state: TurnState::Idle,
            error: None,
            window: CONTEXT_WINDOW,
        }
    }

    /// Override the upstream window size.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Append a user message and return the payload to send with it.
    pub fn begin_turn(&mut self, content: impl Into<String>) -> Vec<ChatMessage> {
        self.messages.push(ChatMessage::user(content));
        self.state = TurnState::AwaitingResponse;
        self.error = None;
        self.context()
    }

    /// Record the assistant reply for the outstanding turn.
    pub fn complete(&mut self, reply: Option<String>) {
        if self.state != TurnState::AwaitingResponse {
            return;
        }
        let content = reply
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string());
        info!(target: "storefront::chat", chars = content.len(), "assistant reply received");
        self.messages.push(ChatMessage::assistant(content));
        self.state = TurnState::Idle;
    }

    /// The outstanding turn failed; nothing is appended.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.state = TurnState::Idle;
    }

    /// Record an error that did not come from a turn (form validation).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Reset to a single greeting from any state.
    pub fn clear(&mut self) {
        *self = Self::with_greeting(CLEARED_GREETING).with_window(self.window);
    }

    /// The last `window` messages, oldest first.
    pub fn context(&self) -> Vec<ChatMessage> {
        let start = self.messages.len().saturating_sub(self.window);
        self.messages[start..].to_vec()
    }

    /// Most recent assistant message, for "copy last reply".
    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == TurnState::AwaitingResponse
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_greeting() {
        let history = ChatHistory::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.messages()[0].role, Role::Assistant);
        assert_eq!(history.state(), TurnState::Idle);
    }

    #[test]
    fn test_three_turns_and_window() {
        let mut history = ChatHistory::new();
        let mut payloads = Vec::new();
        for turn in 0..3 {
            payloads.push(history.begin_turn(format!("request {}", turn)));
            assert!(history.is_awaiting());
            history.complete(Some(format!("plan {}", turn)));
        }
        assert_eq!(history.len(), 7);
        // five prior messages plus the new request all fit
        assert_eq!(payloads[2].len(), 6);
        assert_eq!(payloads[2][0].content, GREETING);
        assert_eq!(payloads[2][5].content, "request 2");

        let fourth = history.begin_turn("request 3");
        assert_eq!(fourth.len(), 6);
        assert_eq!(fourth[0].content, "plan 0");
        assert_eq!(history.len(), 8);
    }

    #[test]
    fn test_failure_appends_nothing() {
        let mut history = ChatHistory::new();
        history.begin_turn("Plan Goa");
        history.fail("service unavailable");
        assert_eq!(history.len(), 2);
        assert_eq!(history.state(), TurnState::Idle);
        assert_eq!(history.error(), Some("service unavailable"));
        // a late reply after failure is ignored
        history.complete(Some("late".to_string()));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_empty_reply_fallback() {
        let mut history = ChatHistory::new();
        history.begin_turn("Plan Goa");
        history.complete(Some("   ".to_string()));
        assert_eq!(history.last_reply(), Some(EMPTY_REPLY_FALLBACK));
    }

    #[test]
    fn test_clear_from_awaiting() {
        let mut history = ChatHistory::new();
        history.begin_turn("Plan Goa");
        history.set_error("boom");
        history.clear();
        assert_eq!(history.len(), 1);
        assert_eq!(history.last_reply(), Some(CLEARED_GREETING));
        assert_eq!(history.state(), TurnState::Idle);
        assert!(history.error().is_none());
    }
}
