use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Hotel as listed by the remote API. Passed through without local checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl HotelSummary {
    /// Image to show, with a placeholder for blank URLs.
    pub fn image_or_placeholder(&self) -> &str {
        match self.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }
}

pub const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/400/250";

/// One page of hotels: `hotels(...) { totalElements content { ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPage {
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub content: Vec<HotelSummary>,
}

/// Variables for the paged `hotels` query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub offset: u32,
    pub limit: u32,
}

impl HotelQuery {
    pub fn page(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }
}

/// Supplier create/update form for a hotel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelForm {
    /// Display name of the hotel
    #[schemars(length(min = 1))]
    pub name: String,
    /// City or area
    #[schemars(length(min = 1))]
    pub location: String,
    /// Star rating from 1 to 5
    #[schemars(range(min = 1, max = 5))]
    pub rating: u8,
    /// Nightly price in whole currency units
    pub price: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&HotelSummary> for HotelForm {
    fn from(hotel: &HotelSummary) -> Self {
        Self {
            name: hotel.name.clone(),
            location: hotel.location.clone(),
            rating: hotel.rating.unwrap_or_default().round().clamp(0.0, 5.0) as u8,
            price: hotel.price.max(0.0).round() as u32,
            image_url: hotel.image_url.clone(),
            description: hotel.description.clone(),
        }
    }
}

/// Reply to `createHotel`; only the identity is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedHotel {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
}

/// Variables for `createBooking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub hotel_id: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
}

/// Booking as confirmed by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_from_string_or_number")]
    pub hotel_id: Option<String>,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub total_price: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Int(n) => n.to_string(),
            RawId::Float(n) => n.to_string(),
        }
    }
}

/// GraphQL `ID` is a string on the wire, but some backends send numbers.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn opt_id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hotel_accepts_numeric_id() {
        let hotel: HotelSummary = serde_json::from_value(json!({
            "id": 2,
            "name": "Sea Breeze Resort",
            "location": "Goa",
            "rating": 5,
            "price": 5500,
            "imageUrl": "  ",
            "description": null
        }))
        .unwrap();
        assert_eq!(hotel.id, "2");
        assert_eq!(hotel.rating, Some(5.0));
        assert_eq!(hotel.image_or_placeholder(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_page_wire_names() {
        let page: HotelPage = serde_json::from_value(json!({
            "totalElements": 14,
            "content": [{"id": "h1", "name": "The Grand Delhi", "price": 3500}]
        }))
        .unwrap();
        assert_eq!(page.total_elements, 14);
        assert_eq!(page.content[0].location, "");
    }

    #[test]
    fn test_query_serializes_nulls() {
        let value = serde_json::to_value(HotelQuery::page(0, 6)).unwrap();
        assert_eq!(value["keyword"], serde_json::Value::Null);
        assert_eq!(value["checkIn"], serde_json::Value::Null);
        assert_eq!(value["limit"], 6);
    }

    #[test]
    fn test_form_from_summary() {
        let hotel = HotelSummary {
            id: "9".to_string(),
            name: "City Comfort Inn".to_string(),
            location: "Mumbai".to_string(),
            rating: Some(3.0),
            price: 2200.0,
            image_url: None,
            description: Some("Budget-friendly".to_string()),
        };
        let form = HotelForm::from(&hotel);
        assert_eq!(form.rating, 3);
        assert_eq!(form.price, 2200);
        assert_eq!(form.description.as_deref(), Some("Budget-friendly"));
    }
}
