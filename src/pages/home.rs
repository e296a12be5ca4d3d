use std::fmt::Write as _;

use crate::core::{normalize_date, NavigationHistory, QueryParams, Route};

use super::search::SEARCH_PATH;

/// Cities promoted on the home page.
pub const POPULAR_DESTINATIONS: [&str; 4] = ["Goa", "Jaipur", "Manali", "Mumbai"];

/// Home page quick-search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickSearch {
    pub keyword: String,
    pub location: String,
    pub check_in: String,
    pub check_out: String,
}

impl QuickSearch {
    /// `/search?...` with the filled-in fields. Guests is left to the
    /// search page default.
    pub fn to_route(&self) -> Route {
        let mut query = QueryParams::new();
        for (key, value) in [("keyword", &self.keyword), ("location", &self.location)] {
            let value = value.trim();
            if !value.is_empty() {
                query.set(key, value);
            }
        }
        for (key, value) in [("checkIn", &self.check_in), ("checkOut", &self.check_out)] {
            let value = normalize_date(value);
            if !value.is_empty() {
                query.set(key, value);
            }
        }
        Route::with_query(SEARCH_PATH, query)
    }

    /// Submit: a new history entry, unlike the search page's in-place edits.
    pub fn submit(&self, history: &mut NavigationHistory) -> Route {
        let route = self.to_route();
        history.push(route.clone());
        route
    }
}

/// Landing page: quick search plus popular destinations.
#[derive(Debug)]
pub struct HomePage {
    form: QuickSearch,
    history: NavigationHistory,
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            form: QuickSearch::default(),
            history: NavigationHistory::new(Route::new("/")),
        }
    }

    pub fn form_mut(&mut self) -> &mut QuickSearch {
        &mut self.form
    }

    pub fn search(&mut self) -> Route {
        self.form.submit(&mut self.history)
    }

    /// Follow a destination card.
    pub fn open_destination(&mut self, city: &str) -> Route {
        let route = destination_route(city);
        self.history.push(route.clone());
        route
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Find your next stay\n\nPopular destinations\n");
        for city in POPULAR_DESTINATIONS {
            let _ = writeln!(out, "  {} -> {}", city, destination_route(city));
        }
        out
    }
}

/// Link behind a popular destination card.
pub fn destination_route(city: &str) -> Route {
    let mut query = QueryParams::new();
    query.set("location", city);
    Route::with_query(SEARCH_PATH, query)
}
