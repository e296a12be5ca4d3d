use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{info, warn};

use super::{format_price, Banner};
use crate::core::{PageOutcome, PageTicket, PagedResults};
use crate::error::{Result, StorefrontError};
use crate::schemas::Validator;
use crate::services::HotelApi;
use crate::types::{HotelForm, HotelQuery, HotelSummary};

/// Hotel being edited: its id and the working copy of its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub id: String,
    pub form: HotelForm,
}

/// Supplier CRUD over the hotel catalogue.
///
/// Every successful mutation refreshes the list from offset 0. Banners from
/// the previous action are dropped when a new action starts.
#[derive(Debug)]
pub struct SupplierDashboard {
    api: Arc<dyn HotelApi>,
    results: PagedResults,
    create_form: HotelForm,
    editing: Option<EditSession>,
    banners: Vec<Banner>,
    validator: Validator,
}

impl SupplierDashboard {
    pub fn new(api: Arc<dyn HotelApi>, page_size: u32) -> Result<Self> {
        Ok(Self {
            api,
            results: PagedResults::new(page_size),
            create_form: HotelForm::default(),
            editing: None,
            banners: Vec::new(),
            validator: Validator::strict_for::<HotelForm>()?,
        })
    }

    /// Load the first page of the catalogue.
    pub async fn load(&mut self) -> PageOutcome {
        let ticket = self.results.begin_search();
        self.fetch(ticket).await
    }

    pub async fn load_more(&mut self) -> Option<PageOutcome> {
        let ticket = self.results.begin_load_more()?;
        Some(self.fetch(ticket).await)
    }

    async fn fetch(&mut self, ticket: PageTicket) -> PageOutcome {
        let query = HotelQuery::page(ticket.offset(), ticket.limit());
        let response = self.api.search_hotels(&query).await;
        self.results.complete(ticket, response)
    }

    fn validate(&self, form: &HotelForm) -> Result<HotelForm> {
        self.validator.validate(serde_json::to_value(form)?)
    }

    /// Validate and create the hotel in the create form.
    pub async fn submit_create(&mut self) -> Result<()> {
        self.banners.clear();
        let form = match self.validate(&self.create_form) {
            Ok(form) => form,
            Err(err) => return Err(self.report("Create error", err)),
        };

        match self.api.create_hotel(&form).await {
            Ok(created) => {
                info!(target: "storefront::dashboard", id = %created.id, "created hotel");
                if !created.id.is_empty() {
                    self.banners
                        .push(Banner::success("Hotel created successfully"));
                }
                self.create_form = HotelForm::default();
                self.load().await;
                Ok(())
            }
            Err(err) => Err(self.report("Create error", err)),
        }
    }

    /// Start editing a listed hotel. Returns `false` if it is not loaded.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(hotel) = self.results.items().iter().find(|h| h.id == id) else {
            return false;
        };
        self.editing = Some(EditSession {
            id: hotel.id.clone(),
            form: HotelForm::from(hotel),
        });
        true
    }

    /// Edit a hotel that is not on a loaded page.
    pub fn open_edit_with(&mut self, hotel: &HotelSummary) {
        self.editing = Some(EditSession {
            id: hotel.id.clone(),
            form: HotelForm::from(hotel),
        });
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn submit_edit(&mut self) -> Result<()> {
        self.banners.clear();
        let session = self
            .editing
            .clone()
            .ok_or_else(|| StorefrontError::Validation("No hotel is being edited.".to_string()))?;
        let form = match self.validate(&session.form) {
            Ok(form) => form,
            Err(err) => return Err(self.report("Update error", err)),
        };

        match self.api.update_hotel(&session.id, &form).await {
            Ok(updated) => {
                if !updated.id.is_empty() {
                    self.banners
                        .push(Banner::success("Hotel updated successfully"));
                }
                self.editing = None;
                self.load().await;
                Ok(())
            }
            Err(err) => Err(self.report("Update error", err)),
        }
    }

    /// Delete a hotel. Nothing happens unless `confirmed` is set.
    pub async fn delete(&mut self, id: &str, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.banners.clear();
        match self.api.delete_hotel(id).await {
            Ok(true) => {
                self.banners
                    .push(Banner::success("Hotel deleted successfully"));
                self.load().await;
                Ok(true)
            }
            Ok(false) => {
                warn!(target: "storefront::dashboard", id, "delete refused by API");
                self.banners.push(Banner::error("Failed to delete hotel"));
                Ok(false)
            }
            Err(err) => Err(self.report("Delete error", err)),
        }
    }

    fn report(&mut self, prefix: &str, err: StorefrontError) -> StorefrontError {
        warn!(target: "storefront::dashboard", "{}: {}", prefix, err);
        self.banners
            .push(Banner::error(format!("{}: {}", prefix, err)));
        err
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

    pub fn error(&self) -> Option<&str> {
        self.results.error()
    }

    pub fn create_form(&self) -> &HotelForm {
        &self.create_form
    }

    pub fn create_form_mut(&mut self) -> &mut HotelForm {
        &mut self.create_form
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut HotelForm> {
        self.editing.as_mut().map(|session| &mut session.form)
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Supplier Dashboard\n");
        for banner in &self.banners {
            let _ = writeln!(out, "{}", banner);
        }
        if let Some(error) = self.error() {
            let _ = writeln!(out, "{}", Banner::error(format!("Error: {}", error)));
        }
        for hotel in self.hotels() {
            let _ = writeln!(
                out,
                "[{}] {} | {} | rating {} | {}",
                hotel.id,
                hotel.name,
                hotel.location,
                hotel.rating.unwrap_or(0.0),
                format_price(hotel.price)
            );
        }
        let _ = writeln!(out, "Showing {} of {}", self.hotels().len(), self.total());
        if self.can_load_more() {
            out.push_str("Load More\n");
        }
        out
    }
}
