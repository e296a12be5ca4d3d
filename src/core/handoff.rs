//! Carrying a prospective stay between pages.
//!
//! A draft travels on two channels at once: in-memory navigation state and
//! URL query parameters. State is lost on reload, the URL is not, so the
//! receiving page takes each field from state first, then the URL, then the
//! default.

use super::dates::normalize_date;
use super::filters::{parse_guests, stay_warning, DEFAULT_GUESTS};
use super::route::{QueryParams, Route};
use crate::error::{Result, StorefrontError};
use crate::types::BookingRequest;

/// In-memory navigation state attached to a page transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guests: Option<u32>,
    pub hotel_name: Option<String>,
}

/// A route plus the state that rides along with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub route: Route,
    pub state: DraftState,
}

/// Prospective stay at one hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub hotel_id: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub hotel_name: Option<String>,
}

impl BookingDraft {
    pub fn new(hotel_id: impl Into<String>) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            check_in: String::new(),
            check_out: String::new(),
            guests: DEFAULT_GUESTS,
            hotel_name: None,
        }
    }

    /// Rebuild a draft from whatever channels survived the transition.
    pub fn resolve(
        hotel_id: impl Into<String>,
        state: Option<&DraftState>,
        query: &QueryParams,
    ) -> Self {
        let check_in =
            state_field(state, |s| s.check_in.as_ref()).or_else(|| query.get("checkIn"));
        let check_out =
            state_field(state, |s| s.check_out.as_ref()).or_else(|| query.get("checkOut"));
        let guests = state
            .and_then(|s| s.guests)
            .filter(|g| *g >= DEFAULT_GUESTS)
            .unwrap_or_else(|| parse_guests(query.get("guests")));

        Self {
            hotel_id: hotel_id.into(),
            check_in: check_in.map(normalize_date).unwrap_or_default(),
            check_out: check_out.map(normalize_date).unwrap_or_default(),
            guests,
            hotel_name: state.and_then(|s| s.hotel_name.clone()),
        }
    }

    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        let check_in = normalize_date(&self.check_in);
        if !check_in.is_empty() {
            query.set("checkIn", check_in);
        }
        let check_out = normalize_date(&self.check_out);
        if !check_out.is_empty() {
            query.set("checkOut", check_out);
        }
        query.set("guests", self.guests.max(DEFAULT_GUESTS).to_string());
        query
    }

    pub fn to_state(&self) -> DraftState {
        let non_empty = |v: String| (!v.is_empty()).then_some(v);
        DraftState {
            check_in: non_empty(normalize_date(&self.check_in)),
            check_out: non_empty(normalize_date(&self.check_out)),
            guests: Some(self.guests.max(DEFAULT_GUESTS)),
            hotel_name: self.hotel_name.clone(),
        }
    }

    /// Both channels for a transition to `path`.
    pub fn handoff_to(&self, path: impl Into<String>) -> Handoff {
        Handoff {
            route: Route::with_query(path, self.to_query()),
            state: self.to_state(),
        }
    }

    pub fn has_dates(&self) -> bool {
        !normalize_date(&self.check_in).is_empty() && !normalize_date(&self.check_out).is_empty()
    }

    pub fn stay_warning(&self) -> Option<&'static str> {
        stay_warning(&self.check_in, &self.check_out)
    }

    /// Check the draft and turn it into `createBooking` variables.
    pub fn to_request(&self) -> Result<BookingRequest> {
        if self.hotel_id.trim().is_empty() {
            return Err(StorefrontError::Validation("Missing hotel id.".to_string()));
        }
        if !self.has_dates() {
            return Err(StorefrontError::Validation(
                "Please select both check-in and check-out dates before proceeding.".to_string(),
            ));
        }
        if self.guests < DEFAULT_GUESTS {
            return Err(StorefrontError::Validation(
                "Guests must be at least 1.".to_string(),
            ));
        }
        Ok(BookingRequest {
            hotel_id: self.hotel_id.clone(),
            check_in: normalize_date(&self.check_in),
            check_out: normalize_date(&self.check_out),
            guests: self.guests,
        })
    }
}

fn state_field<'a>(
    state: Option<&'a DraftState>,
    pick: impl Fn(&'a DraftState) -> Option<&'a String>,
) -> Option<&'a str> {
    state
        .and_then(pick)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wins_over_url() {
        let state = DraftState {
            check_in: Some("2025-11-01".to_string()),
            check_out: None,
            guests: Some(3),
            hotel_name: Some("Sea Breeze Resort".to_string()),
        };
        let query = QueryParams::parse("checkIn=2025-12-01&checkOut=05/12/2025&guests=2");
        let draft = BookingDraft::resolve("2", Some(&state), &query);
        assert_eq!(draft.check_in, "2025-11-01");
        assert_eq!(draft.check_out, "2025-12-05");
        assert_eq!(draft.guests, 3);
        assert_eq!(draft.hotel_name.as_deref(), Some("Sea Breeze Resort"));
    }

    #[test]
    fn test_url_fallback_after_reload() {
        let query = QueryParams::parse("checkIn=2025-11-01&checkOut=2025-11-03&guests=2");
        let draft = BookingDraft::resolve("7", None, &query);
        assert_eq!(draft.check_in, "2025-11-01");
        assert_eq!(draft.guests, 2);
    }

    #[test]
    fn test_defaults() {
        let draft = BookingDraft::resolve("7", None, &QueryParams::new());
        assert_eq!(draft, BookingDraft::new("7"));
        assert!(!draft.has_dates());
    }

    #[test]
    fn test_handoff_carries_both_channels() {
        let mut draft = BookingDraft::new("7");
        draft.check_in = "1/11/2025".to_string();
        draft.check_out = "2025-11-03".to_string();
        draft.guests = 2;
        let handoff = draft.handoff_to("/booking/7");
        assert_eq!(
            handoff.route.to_string(),
            "/booking/7?checkIn=2025-11-01&checkOut=2025-11-03&guests=2"
        );
        let restored = BookingDraft::resolve("7", None, &handoff.route.query);
        let from_state = BookingDraft::resolve("7", Some(&handoff.state), &QueryParams::new());
        assert_eq!(restored, from_state);
    }

    #[test]
    fn test_request_requires_dates() {
        let mut draft = BookingDraft::new("7");
        draft.check_in = "2025-11-01".to_string();
        let err = draft.to_request().unwrap_err();
        assert!(err.to_string().contains("check-in and check-out"));

        draft.check_out = "2025-11-03".to_string();
        let request = draft.to_request().unwrap();
        assert_eq!(request.guests, 1);
    }
}
