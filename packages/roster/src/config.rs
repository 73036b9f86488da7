//! # Client configuration — `roster.toml`
//!
//! ```toml
//! [api]
//! base_url = ""            # empty = same origin as the page
//!
//! [pagination]
//! per_page = 5
//!
//! [search]
//! fields = ["first_name", "last_name"]
//! ```
//!
//! Every section and field has a serde default, so a missing or empty file is
//! equivalent to [`RosterConfig::default`].

use serde::{Deserialize, Serialize};

use crate::search::{SearchField, SearchPipeline};

/// Errors produced while reading or writing `roster.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid roster config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialise roster config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration stored in `roster.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Where the backend lives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Absolute base URL of the backend. Empty string means the page origin.
    #[serde(default)]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Records requested per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_per_page() -> u32 {
    5
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// Order in which search filters are tried.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_fields")]
    pub fields: Vec<SearchField>,
}

fn default_search_fields() -> Vec<SearchField> {
    vec![SearchField::FirstName, SearchField::LastName]
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fields: default_search_fields(),
        }
    }
}

impl RosterConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
            },
            ..Self::default()
        }
    }

    /// Builder method to set the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.pagination.per_page = per_page;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "roster.toml"
    }

    /// Page size actually used for requests. Zero is bumped to one.
    pub fn per_page(&self) -> u32 {
        self.pagination.per_page.max(1)
    }

    /// The search pipeline described by `[search]`; an empty list means the default.
    pub fn search_pipeline(&self) -> SearchPipeline {
        if self.search.fields.is_empty() {
            SearchPipeline::default()
        } else {
            SearchPipeline::new(self.search.fields.clone())
        }
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = RosterConfig::from_toml("").unwrap();
        assert_eq!(config, RosterConfig::default());
        assert_eq!(config.per_page(), 5);
        assert_eq!(config.api.base_url, "");
        assert_eq!(
            config.search_pipeline().fields(),
            &[SearchField::FirstName, SearchField::LastName]
        );
    }

    #[test]
    fn test_parse_all_sections() {
        let config = RosterConfig::from_toml(
            r#"
            [api]
            base_url = "http://127.0.0.1:5000"

            [pagination]
            per_page = 10

            [search]
            fields = ["last_name", "occupation"]
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.per_page(), 10);
        assert_eq!(
            config.search_pipeline().fields(),
            &[SearchField::LastName, SearchField::Occupation]
        );
    }

    #[test]
    fn test_zero_page_size_and_empty_pipeline() {
        let config = RosterConfig::from_toml("[pagination]\nper_page = 0\n[search]\nfields = []\n")
            .unwrap();
        assert_eq!(config.per_page(), 1);
        assert_eq!(config.search_pipeline(), SearchPipeline::default());
    }

    #[test]
    fn test_unknown_search_field_is_rejected() {
        let err = RosterConfig::from_toml("[search]\nfields = [\"nickname\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = RosterConfig::new("http://localhost:5000").with_per_page(3);
        let text = config.to_toml().unwrap();
        assert_eq!(RosterConfig::from_toml(&text).unwrap(), config);
    }
}
