use std::time::Duration;

use color_eyre::eyre::{eyre, Result};

pub const DEFAULT_PLACES_URL: &str = "https://www.mapquestapi.com/search/v3/prediction";
pub const DEFAULT_COLLECTIONS: &str = "address,adminArea,poi";

/// Where and how to reach the search-ahead service
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesConfig {
    pub url: String,
    pub key: String,
    pub limit: u8,
    pub collections: String,
}

impl PlacesConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let key = lookup("TRIP_PICKER_PLACES_KEY")
            .ok_or(eyre!("TRIP_PICKER_PLACES_KEY is not set"))?;
        let limit: u8 = match lookup("TRIP_PICKER_PLACES_LIMIT") {
            Some(limit) => limit
                .parse()
                .map_err(|e| eyre!("TRIP_PICKER_PLACES_LIMIT is not a number: {e}"))?,
            None => 5,
        };
        Ok(PlacesConfig {
            url: lookup("TRIP_PICKER_PLACES_URL").unwrap_or(DEFAULT_PLACES_URL.to_string()),
            key,
            limit,
            collections: lookup("TRIP_PICKER_PLACES_COLLECTIONS")
                .unwrap_or(DEFAULT_COLLECTIONS.to_string()),
        })
    }
}

/// Input handling knobs for the picker
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    /// Normalized queries shorter than this never reach the service
    pub min_query_len: usize,
    /// Quiet period before a pending search fires
    pub wait: Duration,
    /// Longest a pending search can be held back by continued typing
    pub max_wait: Duration,
    /// Width at which field values and placeholders get cut
    pub ellipsis_len: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            min_query_len: 6,
            wait: Duration::from_millis(400),
            max_wait: Duration::from_millis(1000),
            ellipsis_len: 25,
        }
    }
}
