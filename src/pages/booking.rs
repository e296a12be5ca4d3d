use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{info, warn};

use super::{format_price, Banner};
use crate::core::{BookingDraft, DraftState, Route};
use crate::error::{Result, StorefrontError};
use crate::services::HotelApi;
use crate::types::{Booking, HotelSummary};

/// Booking form and confirmation for one hotel.
#[derive(Debug)]
pub struct BookingPage {
    api: Arc<dyn HotelApi>,
    hotel_id: String,
    hotel: Option<HotelSummary>,
    loaded: bool,
    load_error: Option<String>,
    draft: BookingDraft,
    confirmed: Option<Booking>,
    save_error: Option<String>,
}

impl BookingPage {
    /// Open `/booking/{id}`. Navigation state wins over URL parameters,
    /// which win over defaults.
    pub fn open(api: Arc<dyn HotelApi>, route: &Route, state: Option<&DraftState>) -> Self {
        let hotel_id = route.last_segment().unwrap_or_default().to_string();
        let draft = BookingDraft::resolve(hotel_id.clone(), state, &route.query);
        Self {
            api,
            hotel_id,
            hotel: None,
            loaded: false,
            load_error: None,
            draft,
            confirmed: None,
            save_error: None,
        }
    }

    pub async fn load(&mut self) -> Result<Option<&HotelSummary>> {
        self.load_error = None;
        match self.api.hotel(&self.hotel_id).await {
            Ok(hotel) => {
                self.hotel = hotel;
                self.loaded = true;
                Ok(self.hotel.as_ref())
            }
            Err(err) => {
                self.load_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Submit the draft. On success the confirmation replaces the form; on
    /// failure the form stays with the error.
    pub async fn confirm(&mut self) -> Result<&Booking> {
        self.save_error = None;
        let hotel = self
            .hotel
            .as_ref()
            .ok_or_else(|| StorefrontError::NotFound(format!("hotel {}", self.hotel_id)))?;

        let mut draft = self.draft.clone();
        draft.hotel_id = hotel.id.clone();
        let request = match draft.to_request() {
            Ok(request) => request,
            Err(err) => {
                self.save_error = Some(err.to_string());
                return Err(err);
            }
        };

        info!(
            target: "storefront::booking",
            hotel_id = %request.hotel_id,
            check_in = %request.check_in,
            check_out = %request.check_out,
            guests = request.guests,
            "confirming booking"
        );
        match self.api.create_booking(&request).await {
            Ok(booking) => Ok(&*self.confirmed.insert(booking)),
            Err(err) => {
                warn!(target: "storefront::booking", "booking failed: {}", err);
                self.save_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn show_form(&self) -> bool {
        self.confirmed.is_none()
    }

    pub fn confirmed(&self) -> Option<&Booking> {
        self.confirmed.as_ref()
    }

    pub fn hotel(&self) -> Option<&HotelSummary> {
        self.hotel.as_ref()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Where "Back" goes when there is no history to return to.
    pub fn fallback_route(&self) -> Route {
        Route::new("/search")
    }

    /// Lines of the confirmation block, once booked.
    pub fn confirmation_lines(&self) -> Option<Vec<String>> {
        let booking = self.confirmed.as_ref()?;
        let hotel_name = self
            .hotel
            .as_ref()
            .map(|h| h.name.as_str())
            .or(self.draft.hotel_name.as_deref())
            .unwrap_or_default();
        Some(vec![
            "Booking Confirmed".to_string(),
            format!("Hotel: {}", hotel_name),
            format!("Check-in: {}", booking.check_in),
            format!("Check-out: {}", booking.check_out),
            format!("Guests: {}", booking.guests),
            format!("Total: {}", format_price(booking.total_price)),
        ])
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.load_error {
            return format!("Error: {}\n", error);
        }
        if !self.loaded {
            return "Loading...\n".to_string();
        }
        let Some(hotel) = &self.hotel else {
            return "Hotel not found.\n".to_string();
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", hotel.name);
        let _ = writeln!(out, "{}", hotel.location);
        let _ = writeln!(out, "{} / night", format_price(hotel.price));
        out.push('\n');

        if let Some(lines) = self.confirmation_lines() {
            for line in lines {
                let _ = writeln!(out, "{}", line);
            }
            return out;
        }

        out.push_str("Book Your Stay\n");
        let _ = writeln!(out, "Check-in: {}", self.draft.check_in);
        let _ = writeln!(out, "Check-out: {}", self.draft.check_out);
        let _ = writeln!(out, "Guests: {}", self.draft.guests);
        if let Some(error) = &self.save_error {
            let _ = writeln!(out, "{}", Banner::error(error.clone()));
        }
        out.push_str("Confirm Booking\n");
        out
    }
}
