use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::info;

use super::graphql_client::GraphQlClient;
use crate::error::Result;
use crate::types::{Booking, BookingRequest, CreatedHotel, HotelForm, HotelPage, HotelQuery, HotelSummary};

const SEARCH_HOTELS: &str = r#"
query SearchHotels($keyword: String, $location: String, $checkIn: String, $checkOut: String, $offset: Int, $limit: Int) {
  hotels(keyword: $keyword, location: $location, checkIn: $checkIn, checkOut: $checkOut, offset: $offset, limit: $limit) {
    totalElements
    content { id name location rating price imageUrl description }
  }
}
"#;

const GET_HOTEL: &str = r#"
query GetHotel($id: ID!) {
  hotel(id: $id) { id name location description price rating imageUrl }
}
"#;

const CREATE_HOTEL: &str = r#"
mutation CreateHotel($name: String!, $location: String!, $rating: Int!, $price: Int!, $imageUrl: String, $description: String) {
  createHotel(name: $name, location: $location, rating: $rating, price: $price, imageUrl: $imageUrl, description: $description) {
    id
    name
  }
}
"#;

const UPDATE_HOTEL: &str = r#"
mutation UpdateHotel($id: ID!, $name: String!, $location: String!, $rating: Int!, $price: Int!, $imageUrl: String, $description: String) {
  updateHotel(id: $id, name: $name, location: $location, rating: $rating, price: $price, imageUrl: $imageUrl, description: $description) {
    id name location rating price imageUrl description
  }
}
"#;

const DELETE_HOTEL: &str = r#"
mutation DeleteHotel($id: ID!) {
  deleteHotel(id: $id)
}
"#;

const CREATE_BOOKING: &str = r#"
mutation CreateBooking($hotelId: ID!, $checkIn: String!, $checkOut: String!, $guests: Int!) {
  createBooking(hotelId: $hotelId, checkIn: $checkIn, checkOut: $checkOut, guests: $guests) {
    id hotelId checkIn checkOut guests totalPrice
  }
}
"#;

/// Hotel and booking operations offered by the remote API.
#[async_trait]
pub trait HotelApi: Send + Sync + std::fmt::Debug {
    /// One page of hotels matching the query.
    async fn search_hotels(&self, query: &HotelQuery) -> Result<HotelPage>;

    /// A single hotel, `None` if the API knows no such id.
    async fn hotel(&self, id: &str) -> Result<Option<HotelSummary>>;

    async fn create_hotel(&self, form: &HotelForm) -> Result<CreatedHotel>;

    async fn update_hotel(&self, id: &str, form: &HotelForm) -> Result<HotelSummary>;

    /// `true` when the API reports the hotel was removed.
    async fn delete_hotel(&self, id: &str) -> Result<bool>;

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking>;
}

/// [`HotelApi`] over the storefront GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct GraphQlHotelApi {
    client: GraphQlClient,
}

impl GraphQlHotelApi {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: GraphQlClient::new(endpoint, timeout)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

fn hotel_variables(form: &HotelForm) -> serde_json::Value {
    let blank_to_null = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    json!({
        "name": form.name.trim(),
        "location": form.location.trim(),
        "rating": form.rating,
        "price": form.price,
        "imageUrl": blank_to_null(&form.image_url),
        "description": blank_to_null(&form.description),
    })
}

#[async_trait]
impl HotelApi for GraphQlHotelApi {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<HotelPage> {
        let variables = serde_json::to_value(query)?;
        let page: Option<HotelPage> = self
            .client
            .execute("SearchHotels", SEARCH_HOTELS, variables, "hotels")
            .await?;
        let page = page.unwrap_or_default();
        info!(
            target: "storefront::hotels",
            offset = query.offset,
            returned = page.content.len(),
            total = page.total_elements,
            "hotel page loaded"
        );
        Ok(page)
    }

    async fn hotel(&self, id: &str) -> Result<Option<HotelSummary>> {
        self.client
            .execute("GetHotel", GET_HOTEL, json!({ "id": id }), "hotel")
            .await
    }

    async fn create_hotel(&self, form: &HotelForm) -> Result<CreatedHotel> {
        let created: CreatedHotel = self
            .client
            .execute("CreateHotel", CREATE_HOTEL, hotel_variables(form), "createHotel")
            .await?;
        info!(target: "storefront::hotels", id = %created.id, "hotel created");
        Ok(created)
    }

    async fn update_hotel(&self, id: &str, form: &HotelForm) -> Result<HotelSummary> {
        let mut variables = hotel_variables(form);
        variables["id"] = json!(id);
        let updated: HotelSummary = self
            .client
            .execute("UpdateHotel", UPDATE_HOTEL, variables, "updateHotel")
            .await?;
        info!(target: "storefront::hotels", id = %updated.id, "hotel updated");
        Ok(updated)
    }

    async fn delete_hotel(&self, id: &str) -> Result<bool> {
        let deleted: Option<bool> = self
            .client
            .execute("DeleteHotel", DELETE_HOTEL, json!({ "id": id }), "deleteHotel")
            .await?;
        let deleted = deleted.unwrap_or(false);
        info!(target: "storefront::hotels", id, deleted, "hotel delete requested");
        Ok(deleted)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        let variables = serde_json::to_value(request)?;
        let booking: Booking = self
            .client
            .execute("CreateBooking", CREATE_BOOKING, variables, "createBooking")
            .await?;
        info!(
            target: "storefront::booking",
            id = %booking.id,
            total = booking.total_price,
            "booking confirmed"
        );
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_variables_blank_optionals() {
        let form = HotelForm {
            name: " Sea Breeze ".to_string(),
            location: "Goa".to_string(),
            rating: 5,
            price: 5500,
            image_url: Some("  ".to_string()),
            description: None,
        };
        let variables = hotel_variables(&form);
        assert_eq!(variables["name"], "Sea Breeze");
        assert_eq!(variables["imageUrl"], serde_json::Value::Null);
        assert_eq!(variables["rating"], 5);
    }
}
