//! # List state — the pagination/search state machine
//!
//! [`ListState`] holds everything the character table shows: pagination
//! counters, the rendered rows (with any unsaved edits), and which kind of
//! view is active. It is a plain struct with no I/O, so the UI keeps it in a
//! signal and tests keep it in a `RefCell`.
//!
//! ## Request tickets
//!
//! Every request that builds a view (a page fetch or a search) first takes a
//! [`Ticket`] from [`ListState::begin_request`]. Responses are applied through
//! [`ListState::show_page`] / [`ListState::show_search_results`], which drop
//! anything whose ticket is no longer the latest issued. A slow response can
//! therefore never overwrite a view built from a newer request.

use crate::models::{Character, CharacterId, CharacterUpdate, Page};

/// Sequence number of a view-building request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Which kind of view the table currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Nothing has been loaded yet.
    Loading,
    Paged,
    SearchResults,
}

/// One editable field of a table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowField {
    FirstName,
    LastName,
    Occupation,
}

/// A rendered table row. The three text fields start as the server values and
/// then track whatever the user types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditableRow {
    pub id: CharacterId,
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
}

impl EditableRow {
    pub fn get(&self, field: RowField) -> &str {
        match field {
            RowField::FirstName => &self.first_name,
            RowField::LastName => &self.last_name,
            RowField::Occupation => &self.occupation,
        }
    }

    pub fn set(&mut self, field: RowField, value: String) {
        match field {
            RowField::FirstName => self.first_name = value,
            RowField::LastName => self.last_name = value,
            RowField::Occupation => self.occupation = value,
        }
    }

    /// Current field values as a full-replacement update body.
    pub fn to_update(&self) -> CharacterUpdate {
        CharacterUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            occupation: self.occupation.clone(),
        }
    }
}

impl From<&Character> for EditableRow {
    fn from(c: &Character) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            occupation: c.occupation.clone().unwrap_or_default(),
        }
    }
}

/// Turn records into table rows, preserving order.
pub fn render_rows(records: &[Character]) -> Vec<EditableRow> {
    records.iter().map(EditableRow::from).collect()
}

/// Outcome of applying a page response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageShown {
    Shown,
    /// A newer request was issued; the response was dropped.
    Stale,
    /// The backend answered for a page beyond the last one. Nothing was
    /// rendered; the caller should fetch `last` instead.
    PastEnd { last: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    current_page: u32,
    per_page: u32,
    total_pages: u32,
    total_records: Option<u32>,
    rows: Vec<EditableRow>,
    view: View,
    issued: u64,
}

impl ListState {
    pub fn new(per_page: u32) -> Self {
        Self {
            current_page: 1,
            per_page: per_page.max(1),
            total_pages: 1,
            total_records: None,
            rows: Vec::new(),
            view: View::Loading,
            issued: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_records(&self) -> Option<u32> {
        self.total_records
    }

    pub fn rows(&self) -> &[EditableRow] {
        &self.rows
    }

    pub fn row(&self, id: CharacterId) -> Option<&EditableRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Text for the page indicator.
    pub fn indicator(&self) -> String {
        match self.view {
            View::SearchResults => "Search Results".to_string(),
            View::Loading | View::Paged => {
                format!("Page {} of {}", self.current_page, self.total_pages)
            }
        }
    }

    /// Whether the "previous" button is enabled.
    pub fn can_retreat(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the "next" button is enabled.
    pub fn can_advance(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// The page after the shown one, if any. The counter itself only moves
    /// when that page is rendered by [`ListState::show_page`].
    pub fn next_page(&self) -> Option<u32> {
        self.can_advance().then(|| self.current_page + 1)
    }

    /// The page before the shown one, if any.
    pub fn previous_page(&self) -> Option<u32> {
        self.can_retreat().then(|| self.current_page - 1)
    }

    /// Issue a ticket for a new view-building request.
    pub fn begin_request(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply a successful page response.
    pub fn show_page(&mut self, ticket: Ticket, page: &Page) -> PageShown {
        if !self.is_latest(ticket) {
            return PageShown::Stale;
        }
        let total_pages = page.meta.total_pages.max(1);
        if page.meta.page > total_pages {
            return PageShown::PastEnd { last: total_pages };
        }
        self.rows = render_rows(&page.data);
        self.current_page = page.meta.page.max(1);
        self.total_pages = total_pages;
        self.total_records = page.meta.total_records;
        self.view = View::Paged;
        PageShown::Shown
    }

    /// Apply a successful search response. Returns false if the ticket is stale.
    pub fn show_search_results(&mut self, ticket: Ticket, records: &[Character]) -> bool {
        if !self.is_latest(ticket) {
            return false;
        }
        self.rows = render_rows(records);
        self.view = View::SearchResults;
        true
    }

    /// Record a user edit. Unknown ids are ignored.
    pub fn edit(&mut self, id: CharacterId, field: RowField, value: String) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.set(field, value);
        }
    }

    /// The update body built from a row's current field values.
    pub fn draft(&self, id: CharacterId) -> Option<CharacterUpdate> {
        self.row(id).map(EditableRow::to_update)
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(5)
    }
}
