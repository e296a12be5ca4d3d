pub mod graphql_client;
pub mod hotel_api;
pub mod itinerary_client;

pub use graphql_client::GraphQlClient;
pub use hotel_api::{GraphQlHotelApi, HotelApi};
pub use itinerary_client::{HttpItineraryClient, ItineraryApi};
