pub mod hotel;
pub mod itinerary;

pub use hotel::{
    Booking, BookingRequest, CreatedHotel, HotelForm, HotelPage, HotelQuery, HotelSummary,
};
pub use itinerary::{ChatMessage, ItineraryReply, ItineraryRequest, Role, TravelStyle};
