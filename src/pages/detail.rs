use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, warn};

use super::format_price;
use crate::core::{BookingDraft, DraftState, Handoff, Route};
use crate::error::{Result, StorefrontError};
use crate::services::HotelApi;
use crate::types::HotelSummary;

/// One hotel plus the "Book your stay" form.
#[derive(Debug)]
pub struct HotelDetailPage {
    api: Arc<dyn HotelApi>,
    hotel_id: String,
    hotel: Option<HotelSummary>,
    loaded: bool,
    error: Option<String>,
    draft: BookingDraft,
}

impl HotelDetailPage {
    /// Open `/hotel/{id}`, prefilling the stay from navigation state and
    /// then the URL.
    pub fn open(api: Arc<dyn HotelApi>, route: &Route, state: Option<&DraftState>) -> Self {
        let hotel_id = route.last_segment().unwrap_or_default().to_string();
        let draft = BookingDraft::resolve(hotel_id.clone(), state, &route.query);
        debug!(
            target: "storefront::detail",
            hotel_id = %hotel_id,
            from_state = state.is_some(),
            "detail draft initialised"
        );
        Self {
            api,
            hotel_id,
            hotel: None,
            loaded: false,
            error: None,
            draft,
        }
    }

    pub async fn load(&mut self) -> Result<Option<&HotelSummary>> {
        self.error = None;
        match self.api.hotel(&self.hotel_id).await {
            Ok(hotel) => {
                self.hotel = hotel;
                self.loaded = true;
                Ok(self.hotel.as_ref())
            }
            Err(err) => {
                warn!(target: "storefront::detail", hotel_id = %self.hotel_id, "load failed: {}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Hand the stay to the booking page. Both dates are required.
    pub fn proceed(&self) -> Result<Handoff> {
        let hotel = self
            .hotel
            .as_ref()
            .ok_or_else(|| StorefrontError::NotFound(format!("hotel {}", self.hotel_id)))?;
        if !self.draft.has_dates() {
            return Err(StorefrontError::Validation(
                "Please select both check-in and check-out dates before proceeding.".to_string(),
            ));
        }
        let mut draft = self.draft.clone();
        draft.hotel_id = hotel.id.clone();
        draft.hotel_name = Some(hotel.name.clone());
        Ok(draft.handoff_to(format!("/booking/{}", hotel.id)))
    }

    pub fn hotel(&self) -> Option<&HotelSummary> {
        self.hotel.as_ref()
    }

    pub fn hotel_id(&self) -> &str {
        &self.hotel_id
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Error: {}\n", error);
        }
        if !self.loaded {
            return "Loading hotel details...\n".to_string();
        }
        let Some(hotel) = &self.hotel else {
            return "Hotel not found.\n".to_string();
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", hotel.name);
        let _ = writeln!(out, "{}", hotel.location);
        let _ = writeln!(out, "{} / night", format_price(hotel.price));
        if let Some(description) = &hotel.description {
            let _ = writeln!(out, "{}", description);
        }
        let _ = writeln!(out, "Image: {}", hotel.image_or_placeholder());
        out.push_str("\nBook Your Stay\n");
        let _ = writeln!(out, "Check-in: {}", self.draft.check_in);
        let _ = writeln!(out, "Check-out: {}", self.draft.check_out);
        let _ = writeln!(out, "Guests: {}", self.draft.guests);
        if let Some(warning) = self.draft.stay_warning() {
            let _ = writeln!(out, "Warning: {}", warning);
        }
        out
    }
}
