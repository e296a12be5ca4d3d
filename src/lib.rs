//! hotel-storefront: typed client core for a hotel search, booking and AI
//! itinerary storefront.
//!
//! The crate talks to a GraphQL hotel API and an HTTP itinerary service, and
//! keeps the state each page needs: URL-synced search filters, paged result
//! lists, the booking draft handed from one page to the next, and a bounded
//! chat history for the trip planner.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hotel_storefront::{Route, Storefront};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storefront = Storefront::from_env()?;
//!
//!     let mut search = storefront.search_page(Route::parse("/search?location=Goa"));
//!     search.load().await;
//!     search.load_more().await;
//!     println!("{}", search.render());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod pages;
pub mod schemas;
pub mod services;
pub mod storefront;
pub mod types;

pub use config::StorefrontConfig;
pub use core::{
    normalize_date, BookingDraft, ChatHistory, DraftState, Handoff, NavigationHistory,
    PageOutcome, PagedResults, QueryParams, Route, SearchFilters, CONTEXT_WINDOW,
};
pub use error::{ErrorCategory, Result, StorefrontError};
pub use pages::{
    BookingPage, HomePage, HotelDetailPage, ItineraryPlanner, SearchPage, SupplierDashboard,
};
pub use schemas::Validator;
pub use services::{GraphQlHotelApi, HotelApi, HttpItineraryClient, ItineraryApi};
pub use storefront::Storefront;

#[cfg(feature = "cli")]
pub mod cli;
