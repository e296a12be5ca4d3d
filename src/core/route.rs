use std::fmt;
use std::sync::OnceLock;

use url::{form_urlencoded, Url};

/// Ordered query-string parameters.
///
/// Keys keep insertion order so a written URL is stable and shareable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=2`, with or without a leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value for `key`, ignoring empty values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing an existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// A storefront location: a path plus its query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub query: QueryParams,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
        }
    }

    pub fn with_query(path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Parse `/search?location=Goa`. Full links such as
    /// `https://host/search?x=1` keep only their path and query; relative
    /// links resolve against the site root. The fragment is dropped.
    pub fn parse(link: &str) -> Self {
        match Url::options().base_url(Some(site_root())).parse(link.trim()) {
            Ok(url) => {
                let query = url.query().map(QueryParams::parse).unwrap_or_default();
                Self::with_query(url.path(), query)
            }
            Err(_) => Self::new("/"),
        }
    }

    /// Trailing path segment, e.g. the id in `/hotel/42`.
    pub fn last_segment(&self) -> Option<&str> {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

fn site_root() -> &'static Url {
    static ROOT: OnceLock<Url> = OnceLock::new();
    ROOT.get_or_init(|| Url::parse("http://localhost/").expect("valid site root"))
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query.to_query_string())
        }
    }
}

/// Browser-style history: `push` adds an entry, `replace` overwrites the
/// current one so back-navigation skips it.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: Vec<Route>,
}

impl NavigationHistory {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        // never empty: constructed with one entry and `back` keeps the first
        &self.entries[self.entries.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        tracing::debug!(target: "storefront::navigation", "push {}", route);
        self.entries.push(route);
    }

    pub fn replace(&mut self, route: Route) {
        tracing::debug!(target: "storefront::navigation", "replace {}", route);
        let last = self.entries.len() - 1;
        self.entries[last] = route;
    }

    /// Step back one entry. Returns `false` when already at the first entry.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
