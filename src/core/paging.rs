use crate::error::StorefrontError;
use crate::types::hotel::HotelPage;
use crate::types::HotelSummary;
use tracing::{debug, warn};

/// Handle for one issued page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    generation: u64,
    offset: u32,
    limit: u32,
}

impl PageTicket {
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// What `complete` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Replaced,
    Appended,
    Failed,
    /// A newer search started after this request was issued.
    Stale,
}

/// Accumulates offset/limit pages of hotels.
///
/// Offset 0 replaces the held list, any other offset appends. The total is
/// whatever the most recent response reported. Requests are serialized:
/// a fresh search supersedes in-flight requests and a load-more is refused
/// while another request is outstanding.
#[derive(Debug, Clone)]
pub struct PagedResults {
    items: Vec<HotelSummary>,
    total: u64,
    page_size: u32,
    offset: u32,
    generation: u64,
    in_flight: Option<PageTicket>,
    error: Option<String>,
    /// Held items belong to an earlier search whose replacement failed.
    stale_base: bool,
}

impl PagedResults {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page_size: page_size.max(1),
            offset: 0,
            generation: 0,
            in_flight: None,
            error: None,
            stale_base: false,
        }
    }

    /// Start a fresh search at offset 0, superseding anything in flight.
    pub fn begin_search(&mut self) -> PageTicket {
        self.generation += 1;
        self.offset = 0;
        self.error = None;
        let ticket = PageTicket {
            generation: self.generation,
            offset: 0,
            limit: self.page_size,
        };
        if self.in_flight.replace(ticket).is_some() {
            debug!(target: "storefront::paging", "superseding in-flight page request");
        }
        ticket
    }

    /// Request the page after the last requested one.
    ///
    /// Returns `None` while another request is outstanding or when nothing
    /// is left to load.
    pub fn begin_load_more(&mut self) -> Option<PageTicket> {
        if self.in_flight.is_some() {
            debug!(target: "storefront::paging", "load more ignored, request in flight");
            return None;
        }
        if !self.can_load_more() {
            return None;
        }
        self.offset = self.next_offset();
        self.error = None;
        let ticket = PageTicket {
            generation: self.generation,
            offset: self.offset,
            limit: self.page_size,
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Fold a response into the held list.
    pub fn complete(
        &mut self,
        ticket: PageTicket,
        response: Result<HotelPage, StorefrontError>,
    ) -> PageOutcome {
        if self.in_flight != Some(ticket) {
            debug!(
                target: "storefront::paging",
                offset = ticket.offset,
                "dropping stale page response"
            );
            return PageOutcome::Stale;
        }
        self.in_flight = None;

        match response {
            Ok(page) => {
                self.total = page.total_elements;
                if ticket.offset == 0 {
                    self.stale_base = false;
                    self.items = page.content;
                    PageOutcome::Replaced
                } else {
                    self.items.extend(page.content);
                    PageOutcome::Appended
                }
            }
            Err(err) => {
                warn!(target: "storefront::paging", offset = ticket.offset, "page fetch failed: {}", err);
                self.error = Some(err.to_string());
                // a failed load-more is retried from the same offset
                if ticket.offset > 0 {
                    self.offset = ticket.offset.saturating_sub(self.page_size);
                } else {
                    self.stale_base = true;
                }
                PageOutcome::Failed
            }
        }
    }

    pub fn items(&self) -> &[HotelSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Offset of the last requested page.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn next_offset(&self) -> u32 {
        self.offset + self.page_size
    }

    /// False after a failed fresh search until one succeeds: the held
    /// items no longer match the filters the next page would use.
    pub fn can_load_more(&self) -> bool {
        !self.stale_base && (self.items.len() as u64) < self.total
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True while the first page of a search is outstanding.
    pub fn is_loading_first_page(&self) -> bool {
        matches!(self.in_flight, Some(ticket) if ticket.offset == 0)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
