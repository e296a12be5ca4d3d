use std::sync::Arc;

use tracing::debug;

use crate::config::StorefrontConfig;
use crate::core::{DraftState, Route};
use crate::error::Result;
use crate::pages::{
    BookingPage, HotelDetailPage, ItineraryPlanner, SearchPage, SupplierDashboard,
};
use crate::services::{GraphQlHotelApi, HotelApi, HttpItineraryClient, ItineraryApi};

/// Entry point wiring the remote APIs into the page controllers.
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StorefrontConfig,
    hotels: Arc<dyn HotelApi>,
    itinerary: Arc<dyn ItineraryApi>,
}

impl Storefront {
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let hotels = GraphQlHotelApi::new(config.graphql_url.clone(), config.timeout)?;
        let itinerary = HttpItineraryClient::new(config.ai_base_url.clone(), config.timeout)?;
        debug!(
            target: "storefront",
            graphql_url = %config.graphql_url,
            ai_base_url = %config.ai_base_url,
            "storefront configured"
        );
        Ok(Self {
            config,
            hotels: Arc::new(hotels),
            itinerary: Arc::new(itinerary),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(StorefrontConfig::from_env()?)
    }

    /// Swap the hotel backend, e.g. for an in-memory fake.
    pub fn with_hotel_api(mut self, api: Arc<dyn HotelApi>) -> Self {
        self.hotels = api;
        self
    }

    pub fn with_itinerary_api(mut self, api: Arc<dyn ItineraryApi>) -> Self {
        self.itinerary = api;
        self
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn hotel_api(&self) -> Arc<dyn HotelApi> {
        Arc::clone(&self.hotels)
    }

    pub fn search_page(&self, route: Route) -> SearchPage {
        SearchPage::open(self.hotel_api(), route, self.config.search_page_size)
    }

    pub fn hotel_detail(&self, route: &Route, state: Option<&DraftState>) -> HotelDetailPage {
        HotelDetailPage::open(self.hotel_api(), route, state)
    }

    pub fn booking_page(&self, route: &Route, state: Option<&DraftState>) -> BookingPage {
        BookingPage::open(self.hotel_api(), route, state)
    }

    pub fn dashboard(&self) -> Result<SupplierDashboard> {
        SupplierDashboard::new(self.hotel_api(), self.config.dashboard_page_size)
    }

    pub fn planner(&self) -> ItineraryPlanner {
        ItineraryPlanner::new(Arc::clone(&self.itinerary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_use_configured_sizes() {
        let config = StorefrontConfig {
            search_page_size: 4,
            ..StorefrontConfig::default()
        };
        let storefront = Storefront::new(config).unwrap();
        let page = storefront.search_page(Route::parse("/search?location=Goa"));
        assert_eq!(page.filters().location, "Goa");
        assert_eq!(storefront.config().dashboard_page_size, 9);
    }
}
