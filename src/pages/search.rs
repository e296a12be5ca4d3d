use std::fmt::Write as _;
use std::sync::Arc;

use tracing::info;

use super::{format_price, Banner};
use crate::core::{
    BookingDraft, Handoff, NavigationHistory, PageOutcome, PageTicket, PagedResults, Route,
    SearchFilters,
};
use crate::services::HotelApi;
use crate::types::HotelSummary;

pub const SEARCH_PATH: &str = "/search";

/// Hotel search and listing.
///
/// Owns the filter form, the accumulated result list and the `/search` URL.
/// `load_more` always continues the last *submitted* search, so editing the
/// form without submitting never mixes result sets.
#[derive(Debug)]
pub struct SearchPage {
    api: Arc<dyn HotelApi>,
    filters: SearchFilters,
    applied: SearchFilters,
    results: PagedResults,
    history: NavigationHistory,
}

impl SearchPage {
    /// Build the page for `route`, prefilling the form from its query.
    /// Nothing is fetched until [`SearchPage::load`].
    pub fn open(api: Arc<dyn HotelApi>, route: Route, page_size: u32) -> Self {
        let filters = SearchFilters::from_query(&route.query);
        Self {
            api,
            applied: filters.clone(),
            filters,
            results: PagedResults::new(page_size),
            history: NavigationHistory::new(route),
        }
    }

    /// Fetch the first page for the filters currently in the URL.
    pub async fn load(&mut self) -> PageOutcome {
        self.applied = self.filters.clone();
        let ticket = self.results.begin_search();
        self.fetch(ticket).await
    }

    /// The URL changed underneath the page (shared link, back button).
    pub async fn navigate(&mut self, route: Route) -> PageOutcome {
        self.filters = SearchFilters::from_query(&route.query);
        self.history.push(route);
        self.load().await
    }

    /// Submit the form: rewrite the URL in place and search from offset 0.
    pub async fn submit(&mut self) -> PageOutcome {
        if let Some(warning) = self.filters.stay_warning() {
            info!(target: "storefront::search", "{}", warning);
        }
        self.history
            .replace(Route::with_query(SEARCH_PATH, self.filters.to_query()));
        self.load().await
    }

    /// Reset every field, rewrite the URL and search with no filters.
    pub async fn clear(&mut self) -> PageOutcome {
        self.filters = SearchFilters::default();
        self.history
            .replace(Route::with_query(SEARCH_PATH, self.filters.to_query()));
        self.load().await
    }

    /// Append the next page. `None` when nothing is left or a request is
    /// already outstanding.
    pub async fn load_more(&mut self) -> Option<PageOutcome> {
        let ticket = self.results.begin_load_more()?;
        Some(self.fetch(ticket).await)
    }

    async fn fetch(&mut self, ticket: PageTicket) -> PageOutcome {
        let query = self.applied.to_hotel_query(ticket.offset(), ticket.limit());
        info!(
            target: "storefront::search",
            offset = ticket.offset(),
            limit = ticket.limit(),
            location = query.location.as_deref().unwrap_or(""),
            "searching hotels"
        );
        let response = self.api.search_hotels(&query).await;
        self.results.complete(ticket, response)
    }

    /// Link to a hotel carrying the stay on both handoff channels.
    pub fn hotel_link(&self, hotel_id: &str) -> Handoff {
        let mut draft = BookingDraft::new(hotel_id);
        draft.check_in = self.filters.check_in.clone();
        draft.check_out = self.filters.check_out.clone();
        draft.guests = self.filters.guests;
        draft.handoff_to(format!("/hotel/{}", hotel_id))
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut SearchFilters {
        &mut self.filters
    }

    pub fn hotels(&self) -> &[HotelSummary] {
        self.results.items()
    }

    pub fn total(&self) -> u64 {
        self.results.total()
    }

    pub fn can_load_more(&self) -> bool {
        self.results.can_load_more()
    }

    pub fn is_loading(&self) -> bool {
        self.results.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.results.error()
    }

    pub fn current_route(&self) -> &Route {
        self.history.current()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.results.is_loading_first_page() {
            out.push_str("Loading hotels...\n");
        }
        if let Some(warning) = self.filters.stay_warning() {
            let _ = writeln!(out, "Warning: {}", warning);
        }
        if let Some(error) = self.error() {
            let _ = writeln!(out, "{}", Banner::error(format!("Error: {}", error)));
        }
        if self.hotels().is_empty() {
            if !self.is_loading() {
                out.push_str("No hotels match your search.\n");
            }
        } else {
            for hotel in self.hotels() {
                let _ = writeln!(
                    out,
                    "[{}] {} | {} | {} {} / night",
                    hotel.id,
                    hotel.name,
                    hotel.location,
                    stars(hotel.rating),
                    format_price(hotel.price),
                );
            }
            let _ = writeln!(out, "Showing {} of {}", self.hotels().len(), self.total());
        }
        if self.can_load_more() {
            out.push_str(if self.is_loading() { "Loading...\n" } else { "Load More\n" });
        }
        out
    }
}

fn stars(rating: Option<f64>) -> String {
    format!("★ {}", rating.unwrap_or(0.0))
}
