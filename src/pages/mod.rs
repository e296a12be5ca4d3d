//! Page controllers.
//!
//! Each page owns its form state and talks to the remote APIs through the
//! service traits, so they can be driven from the CLI or from tests with a
//! fake backend. `render` produces the plain-text view the CLI prints.

pub mod booking;
pub mod dashboard;
pub mod detail;
pub mod home;
pub mod planner;
pub mod search;

use std::fmt;

pub use booking::BookingPage;
pub use dashboard::{EditSession, SupplierDashboard};
pub use detail::HotelDetailPage;
pub use home::{destination_route, HomePage, QuickSearch, POPULAR_DESTINATIONS};
pub use planner::{ItineraryPlanner, PlannerForm};
pub use search::{SearchPage, SEARCH_PATH};

/// Price with the rupee sign, e.g. `₹4500`.
pub fn format_price(price: f64) -> String {
    format!("₹{}", price)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Status message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BannerKind::Success => write!(f, "[ok] {}", self.text),
            BannerKind::Error => write!(f, "[error] {}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_drops_trailing_zero() {
        assert_eq!(format_price(9000.0), "₹9000");
        assert_eq!(format_price(4499.5), "₹4499.5");
    }

    #[test]
    fn test_banner_display() {
        assert_eq!(
            Banner::success("Hotel created successfully").to_string(),
            "[ok] Hotel created successfully"
        );
        assert!(Banner::error("Failed to delete hotel").is_error());
    }
}
