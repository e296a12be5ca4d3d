use std::env;
use std::time::Duration;

use crate::error::{Result, StorefrontError};
use crate::services::graphql_client::DEFAULT_GRAPHQL_URL;
use crate::services::itinerary_client::DEFAULT_AI_BASE_URL;

pub const SEARCH_PAGE_SIZE: u32 = 6;
pub const DASHBOARD_PAGE_SIZE: u32 = 9;

/// Endpoints and paging knobs for the storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub graphql_url: String,
    pub ai_base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub search_page_size: u32,
    pub dashboard_page_size: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            timeout: None,
            search_page_size: SEARCH_PAGE_SIZE,
            dashboard_page_size: DASHBOARD_PAGE_SIZE,
        }
    }
}

impl StorefrontConfig {
    /// Read settings from the environment (after loading `.env` if present).
    ///
    /// * `STOREFRONT_GRAPHQL_URL`
    /// * `STOREFRONT_AI_URL`, falling back to `VITE_AI_API_URL`
    /// * `STOREFRONT_TIMEOUT_SECS`
    /// * `STOREFRONT_SEARCH_PAGE_SIZE`, `STOREFRONT_DASHBOARD_PAGE_SIZE`
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match non_empty("STOREFRONT_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_number(
                "STOREFRONT_TIMEOUT_SECS",
                &raw,
            )?)),
            None => None,
        };

        let page_size = |key: &str, default: u32| -> Result<u32> {
            match non_empty(key) {
                Some(raw) => {
                    let size = parse_number(key, &raw)?;
                    u32::try_from(size)
                        .ok()
                        .filter(|size| *size > 0)
                        .ok_or_else(|| {
                            StorefrontError::Config(format!("{} must be between 1 and {}", key, u32::MAX))
                        })
                }
                None => Ok(default),
            }
        };

        Ok(Self {
            graphql_url: non_empty("STOREFRONT_GRAPHQL_URL").unwrap_or(defaults.graphql_url),
            ai_base_url: non_empty("STOREFRONT_AI_URL")
                .or_else(|| non_empty("VITE_AI_API_URL"))
                .unwrap_or(defaults.ai_base_url),
            timeout,
            search_page_size: page_size("STOREFRONT_SEARCH_PAGE_SIZE", defaults.search_page_size)?,
            dashboard_page_size: page_size(
                "STOREFRONT_DASHBOARD_PAGE_SIZE",
                defaults.dashboard_page_size,
            )?,
        })
    }

    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = url.into();
        self
    }

    pub fn with_ai_base_url(mut self, url: impl Into<String>) -> Self {
        self.ai_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| StorefrontError::Config(format!("{} must be a whole number, got {:?}", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.search_page_size, 6);
        assert_eq!(config.dashboard_page_size, 9);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_ai_url_fallback_and_timeout() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("VITE_AI_API_URL", "http://ai.internal:9000"),
            ("STOREFRONT_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.ai_base_url, "http://ai.internal:9000");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let err = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_SEARCH_PAGE_SIZE", "0")]))
            .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_TIMEOUT_SECS", "soon")])).is_err());
    }
}
