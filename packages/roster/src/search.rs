//! Search filters and the ordered pipeline the controller walks through.
//!
//! The backend exposes one exact filter per field rather than a combined OR
//! query, so a search is a sequence of single-field requests. The first one
//! that returns data wins; each `error`/`message` signal moves on to the next.

use serde::{Deserialize, Serialize};

/// A field the backend can filter on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    FirstName,
    LastName,
    Occupation,
}

impl SearchField {
    /// Query-string key used by `GET /characters/search`.
    pub fn query_key(self) -> &'static str {
        match self {
            SearchField::FirstName => "first_name",
            SearchField::LastName => "last_name",
            SearchField::Occupation => "occupation",
        }
    }
}

/// One single-field search request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchFilter {
    pub field: SearchField,
    pub value: String,
}

impl SearchFilter {
    pub fn new(field: SearchField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Ordered list of fields tried for a search query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPipeline {
    fields: Vec<SearchField>,
}

impl Default for SearchPipeline {
    fn default() -> Self {
        Self::new(vec![SearchField::FirstName, SearchField::LastName])
    }
}

impl SearchPipeline {
    pub fn new(fields: Vec<SearchField>) -> Self {
        Self { fields }
    }

    /// Append a field to the end of the pipeline.
    pub fn then(mut self, field: SearchField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    /// The filters to issue for `query`, in order.
    pub fn filters<'a>(&'a self, query: &'a str) -> impl Iterator<Item = SearchFilter> + 'a {
        self.fields
            .iter()
            .map(move |field| SearchFilter::new(*field, query))
    }
}
