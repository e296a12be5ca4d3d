use super::dates::{normalize_date, parse_canonical};
use super::route::QueryParams;
use crate::types::hotel::HotelQuery;

pub const DEFAULT_GUESTS: u32 = 1;

/// Current search criteria, kept in step with the `/search` query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub keyword: String,
    pub location: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            location: String::new(),
            check_in: String::new(),
            check_out: String::new(),
            guests: DEFAULT_GUESTS,
        }
    }
}

impl SearchFilters {
    /// Populate from URL query parameters. Missing fields take their defaults.
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            keyword: query.get("keyword").unwrap_or_default().to_string(),
            location: query.get("location").unwrap_or_default().to_string(),
            check_in: query.get("checkIn").unwrap_or_default().to_string(),
            check_out: query.get("checkOut").unwrap_or_default().to_string(),
            guests: parse_guests(query.get("guests")),
        }
    }

    /// Write every non-empty field. Dates are normalized first and dropped
    /// if they do not normalize.
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if !self.keyword.is_empty() {
            query.set("keyword", &self.keyword);
        }
        if !self.location.is_empty() {
            query.set("location", &self.location);
        }
        let check_in = normalize_date(&self.check_in);
        if !check_in.is_empty() {
            query.set("checkIn", check_in);
        }
        let check_out = normalize_date(&self.check_out);
        if !check_out.is_empty() {
            query.set("checkOut", check_out);
        }
        query.set("guests", self.guests.max(DEFAULT_GUESTS).to_string());
        query
    }

    /// Request variables for one page; empty fields become `null`.
    pub fn to_hotel_query(&self, offset: u32, limit: u32) -> HotelQuery {
        HotelQuery {
            keyword: non_empty(self.keyword.trim()),
            location: non_empty(self.location.trim()),
            check_in: non_empty(&normalize_date(&self.check_in)),
            check_out: non_empty(&normalize_date(&self.check_out)),
            offset,
            limit,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Non-blocking hint when the stay looks inverted. The remote API owns
    /// the real check.
    pub fn stay_warning(&self) -> Option<&'static str> {
        stay_warning(&self.check_in, &self.check_out)
    }
}

pub(crate) fn stay_warning(check_in: &str, check_out: &str) -> Option<&'static str> {
    let check_in = parse_canonical(&normalize_date(check_in))?;
    let check_out = parse_canonical(&normalize_date(check_out))?;
    (check_out < check_in).then_some("Check-out date is before check-in date.")
}

/// Guests from text: anything missing, non-numeric or zero becomes 1.
pub fn parse_guests(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|guests| *guests >= DEFAULT_GUESTS)
        .unwrap_or(DEFAULT_GUESTS)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
