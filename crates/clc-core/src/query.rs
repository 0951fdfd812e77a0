//! Query string assembly for API requests.

use std::fmt::Display;
use url::Url;

/// Query pairs attached to a request URL, in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// No parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key=value`.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Display) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Adds `key=true`, the form the API uses for switches such as `groupLinks`.
    #[must_use]
    pub fn with_flag(self, key: &'static str) -> Self {
        self.with(key, true)
    }

    /// Adds `key=true` only when `enabled`.
    #[must_use]
    pub fn with_flag_if(self, enabled: bool, key: &'static str) -> Self {
        if enabled {
            self.with_flag(key)
        } else {
            self
        }
    }

    /// Collected pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Writes the pairs onto `url`. An empty set leaves the URL without a `?`.
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        url.query_pairs_mut()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())));
    }
}
