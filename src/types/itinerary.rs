use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat turn as shown in the planner and sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Trip flavour offered by the planner form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TravelStyle {
    #[default]
    Balanced,
    Relaxation,
    Adventure,
    Luxury,
    Budget,
    Family,
    Culture,
    Nightlife,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 8] = [
        TravelStyle::Balanced,
        TravelStyle::Relaxation,
        TravelStyle::Adventure,
        TravelStyle::Luxury,
        TravelStyle::Budget,
        TravelStyle::Family,
        TravelStyle::Culture,
        TravelStyle::Nightlife,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Balanced => "Balanced",
            TravelStyle::Relaxation => "Relaxation",
            TravelStyle::Adventure => "Adventure",
            TravelStyle::Luxury => "Luxury",
            TravelStyle::Budget => "Budget",
            TravelStyle::Family => "Family",
            TravelStyle::Culture => "Culture",
            TravelStyle::Nightlife => "Nightlife",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown travel style: {}", s))
    }
}

/// Body of `POST /api/ai/itinerary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryRequest {
    /// Where the trip goes
    #[schemars(length(min = 1))]
    pub destination: String,
    /// Trip length in days
    #[schemars(range(min = 1, max = 30))]
    pub days: u32,
    pub style: TravelStyle,
    /// Most recent chat turns, oldest first
    pub history: Vec<ChatMessage>,
}

/// Successful reply from the itinerary service. `content` is markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryReply {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = ItineraryRequest {
            destination: "Goa".to_string(),
            days: 3,
            style: TravelStyle::Adventure,
            history: vec![ChatMessage::assistant("Hi"), ChatMessage::user("Plan it")],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "destination": "Goa",
                "days": 3,
                "style": "Adventure",
                "history": [
                    {"role": "assistant", "content": "Hi"},
                    {"role": "user", "content": "Plan it"}
                ]
            })
        );
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("luxury".parse::<TravelStyle>(), Ok(TravelStyle::Luxury));
        assert!("space".parse::<TravelStyle>().is_err());
    }
}
