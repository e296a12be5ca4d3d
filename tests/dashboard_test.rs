use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hotel_storefront::{
    pages::{Banner, BannerKind},
    types::{
        Booking, BookingRequest, CreatedHotel, HotelForm, HotelPage, HotelQuery, HotelSummary,
    },
    HotelApi, Result, StorefrontError, SupplierDashboard,
};

/// In-memory catalogue standing in for the GraphQL backend.
#[derive(Debug, Default)]
struct FakeHotels {
    hotels: Mutex<Vec<HotelSummary>>,
    next_id: Mutex<u32>,
    refuse_delete: bool,
}

impl FakeHotels {
    fn with_count(count: u32) -> Self {
        let fake = Self::default();
        {
            let mut hotels = fake.hotels.lock().unwrap();
            for id in 1..=count {
                hotels.push(summary(id.to_string(), &HotelForm {
                    name: format!("Hotel {}", id),
                    location: "Goa".to_string(),
                    rating: 3,
                    price: 2000,
                    ..HotelForm::default()
                }));
            }
            *fake.next_id.lock().unwrap() = count;
        }
        fake
    }
}

fn summary(id: String, form: &HotelForm) -> HotelSummary {
    HotelSummary {
        id,
        name: form.name.clone(),
        location: form.location.clone(),
        rating: Some(f64::from(form.rating)),
        price: f64::from(form.price),
        image_url: form.image_url.clone(),
        description: form.description.clone(),
    }
}

#[async_trait]
impl HotelApi for FakeHotels {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<HotelPage> {
        let hotels = self.hotels.lock().unwrap();
        let content = hotels
            .iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();
        Ok(HotelPage {
            total_elements: hotels.len() as u64,
            content,
        })
    }

    async fn hotel(&self, id: &str) -> Result<Option<HotelSummary>> {
        Ok(self.hotels.lock().unwrap().iter().find(|h| h.id == id).cloned())
    }

    async fn create_hotel(&self, form: &HotelForm) -> Result<CreatedHotel> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = next_id.to_string();
        self.hotels.lock().unwrap().push(summary(id.clone(), form));
        Ok(CreatedHotel {
            id,
            name: form.name.clone(),
        })
    }

    async fn update_hotel(&self, id: &str, form: &HotelForm) -> Result<HotelSummary> {
        let mut hotels = self.hotels.lock().unwrap();
        let slot = hotels
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| StorefrontError::Api(format!("Hotel {} not found", id)))?;
        *slot = summary(id.to_string(), form);
        Ok(slot.clone())
    }

    async fn delete_hotel(&self, id: &str) -> Result<bool> {
        if self.refuse_delete {
            return Ok(false);
        }
        let mut hotels = self.hotels.lock().unwrap();
        let before = hotels.len();
        hotels.retain(|h| h.id != id);
        Ok(hotels.len() < before)
    }

    async fn create_booking(&self, _request: &BookingRequest) -> Result<Booking> {
        Err(StorefrontError::Api("bookings are not served here".to_string()))
    }
}

fn texts(banners: &[Banner]) -> Vec<&str> {
    banners.iter().map(|b| b.text.as_str()).collect()
}

#[tokio::test]
async fn test_dashboard_pages_by_nine() {
    let mut board = SupplierDashboard::new(Arc::new(FakeHotels::with_count(20)), 9).unwrap();
    board.load().await;
    assert_eq!(board.hotels().len(), 9);
    board.load_more().await;
    board.load_more().await;
    assert_eq!(board.hotels().len(), 20);
    assert!(!board.can_load_more());
    assert!(board.render().contains("Showing 20 of 20"));
}

#[tokio::test]
async fn test_create_refreshes_and_resets_form() {
    let mut board = SupplierDashboard::new(Arc::new(FakeHotels::with_count(2)), 9).unwrap();
    board.load().await;
    {
        let form = board.create_form_mut();
        form.name = "Sea Breeze".to_string();
        form.location = "Goa".to_string();
        form.rating = 5;
        form.price = 5500;
    }

    tokio_test::assert_ok!(board.submit_create().await);
    assert_eq!(texts(board.banners()), vec!["Hotel created successfully"]);
    assert_eq!(board.banners()[0].kind, BannerKind::Success);
    assert_eq!(board.create_form(), &HotelForm::default());
    assert_eq!(board.total(), 3);
    assert!(board.hotels().iter().any(|h| h.name == "Sea Breeze"));
}

#[tokio::test]
async fn test_create_rejects_out_of_range_rating() {
    let api = Arc::new(FakeHotels::with_count(0));
    let mut board = SupplierDashboard::new(api.clone(), 9).unwrap();
    {
        let form = board.create_form_mut();
        form.name = "Too Good".to_string();
        form.location = "Goa".to_string();
        form.rating = 6;
        form.price = 100;
    }

    let err = board.submit_create().await.unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));
    assert!(board.banners()[0].is_error());
    assert!(board.banners()[0].text.starts_with("Create error: "));
    assert!(api.hotels.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_round_trip() {
    let mut board = SupplierDashboard::new(Arc::new(FakeHotels::with_count(3)), 9).unwrap();
    board.load().await;

    assert!(!board.open_edit("99"));
    assert!(board.open_edit("2"));
    assert_eq!(board.editing().map(|e| e.form.name.as_str()), Some("Hotel 2"));
    if let Some(form) = board.edit_form_mut() {
        form.price = 2500;
    }

    tokio_test::assert_ok!(board.submit_edit().await);
    assert_eq!(texts(board.banners()), vec!["Hotel updated successfully"]);
    assert!(board.editing().is_none());
    assert_eq!(board.hotels()[1].price, 2500.0);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let mut board = SupplierDashboard::new(Arc::new(FakeHotels::with_count(3)), 9).unwrap();
    board.load().await;

    assert!(!tokio_test::assert_ok!(board.delete("1", false).await));
    assert_eq!(board.total(), 3);
    assert!(board.banners().is_empty());

    assert!(tokio_test::assert_ok!(board.delete("1", true).await));
    assert_eq!(texts(board.banners()), vec!["Hotel deleted successfully"]);
    assert_eq!(board.total(), 2);
}

#[tokio::test]
async fn test_refused_delete_shows_failure() {
    let api = FakeHotels {
        refuse_delete: true,
        ..FakeHotels::with_count(1)
    };
    let mut board = SupplierDashboard::new(Arc::new(api), 9).unwrap();
    board.load().await;

    assert!(!tokio_test::assert_ok!(board.delete("1", true).await));
    assert_eq!(texts(board.banners()), vec!["Failed to delete hotel"]);
    assert_eq!(board.total(), 1);
}
