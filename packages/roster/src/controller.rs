//! # Character list controller
//!
//! [`CharacterList`] wires a [`CharacterBackend`], a [`StateHandle`] and a
//! [`Prompter`] into the operations the admin panel exposes: page fetch and
//! navigation, search with fallback, update and delete.
//!
//! The controller never holds a borrow of the state across an `.await`; each
//! step reads or writes through [`StateHandle::update`] and lets go. That is
//! what allows the same code to drive a Dioxus signal in the browser and an
//! `Rc<RefCell<ListState>>` in tests.
//!
//! ## Error handling
//!
//! - Backend `error` / `message` bodies are shown verbatim through
//!   [`Prompter::alert`].
//! - Transport failures are logged with `tracing::error!` and otherwise
//!   swallowed: no alert, no state change, no follow-up refresh.
//! - Responses to superseded requests are dropped silently.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::CharacterBackend;
use crate::models::{Acknowledgement, CharacterId, Reply};
use crate::search::SearchPipeline;
use crate::state::{ListState, PageShown, RowField, Ticket};

/// Shared, mutable access to a [`ListState`].
pub trait StateHandle {
    fn update<R>(&self, f: impl FnOnce(&mut ListState) -> R) -> R;

    fn read<R>(&self, f: impl FnOnce(&ListState) -> R) -> R {
        self.update(|state| f(state))
    }
}

impl StateHandle for Rc<RefCell<ListState>> {
    fn update<R>(&self, f: impl FnOnce(&mut ListState) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn read<R>(&self, f: impl FnOnce(&ListState) -> R) -> R {
        f(&self.borrow())
    }
}

/// Blocking user interaction: notices and yes/no questions.
pub trait Prompter {
    fn alert(&self, message: &str);
    fn confirm(&self, question: &str) -> bool;
}

pub const DELETE_PROMPT: &str = "Delete this character?";

#[derive(Clone)]
pub struct CharacterList<B, H, P> {
    backend: B,
    state: H,
    prompter: P,
    pipeline: SearchPipeline,
}

impl<B, H, P> CharacterList<B, H, P>
where
    B: CharacterBackend,
    H: StateHandle,
    P: Prompter,
{
    pub fn new(backend: B, state: H, prompter: P) -> Self {
        Self {
            backend,
            state,
            prompter,
            pipeline: SearchPipeline::default(),
        }
    }

    /// Replace the search pipeline.
    pub fn with_pipeline(mut self, pipeline: SearchPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn is_latest(&self, ticket: Ticket) -> bool {
        self.state.read(|s| s.is_latest(ticket))
    }

    /// Fetch `page` and render it.
    ///
    /// If the backend reports the page lies past the end (typically after the
    /// last record of the last page was deleted) the last page is fetched
    /// instead.
    pub async fn fetch_page(&self, page: u32) {
        let mut target = page.max(1);
        loop {
            let ticket = self.state.update(ListState::begin_request);
            let per_page = self.state.read(ListState::per_page);
            tracing::debug!(page = target, per_page, "requesting page");

            let reply = match self.backend.list_page(target, per_page).await {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::error!("Pagination error: {err}");
                    return;
                }
            };

            let page = match reply {
                Reply::Data(page) => page,
                signal => {
                    if !self.is_latest(ticket) {
                        tracing::debug!(page = target, "dropping stale page error");
                    } else if let Some(text) = signal.signal() {
                        self.prompter.alert(text);
                    }
                    return;
                }
            };

            match self.state.update(|s| s.show_page(ticket, &page)) {
                PageShown::Shown => {
                    tracing::info!(
                        page = page.meta.page,
                        total_pages = page.meta.total_pages,
                        rows = page.data.len(),
                        "page loaded"
                    );
                    return;
                }
                PageShown::Stale => {
                    tracing::debug!(page = target, "dropping stale page response");
                    return;
                }
                PageShown::PastEnd { last } => {
                    if last >= target {
                        tracing::warn!(page = target, last, "backend reported an inconsistent last page");
                        return;
                    }
                    target = last;
                }
            }
        }
    }

    /// Initial load.
    pub async fn load(&self) {
        self.fetch_page(1).await;
    }

    /// Go to the next page; no-op on the last page.
    pub async fn advance_page(&self) {
        if let Some(page) = self.state.read(ListState::next_page) {
            self.fetch_page(page).await;
        }
    }

    /// Go to the previous page; no-op on page 1.
    pub async fn retreat_page(&self) {
        if let Some(page) = self.state.read(ListState::previous_page) {
            self.fetch_page(page).await;
        }
    }

    /// Search by each pipeline field in turn until one matches.
    ///
    /// An empty (or all-whitespace) query returns to page 1 of the paged view.
    /// When every field reports no match, the last backend signal is shown and
    /// the table is left as it was.
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.fetch_page(1).await;
            return;
        }

        let ticket = self.state.update(ListState::begin_request);
        let mut last_signal: Option<String> = None;

        for filter in self.pipeline.filters(query) {
            if !self.is_latest(ticket) {
                tracing::debug!(query, "search superseded");
                return;
            }
            match self.backend.search(&filter).await {
                Ok(Reply::Data(records)) => {
                    if self.state.update(|s| s.show_search_results(ticket, &records)) {
                        tracing::info!(
                            query,
                            field = filter.field.query_key(),
                            rows = records.len(),
                            "search matched"
                        );
                    } else {
                        tracing::debug!(query, "dropping stale search response");
                    }
                    return;
                }
                Ok(signal) => {
                    tracing::debug!(query, field = filter.field.query_key(), "no match");
                    last_signal = signal.signal().map(str::to_string);
                }
                Err(err) => {
                    tracing::error!("Search error: {err}");
                    return;
                }
            }
        }

        if !self.is_latest(ticket) {
            return;
        }
        // Only the final step's text is shown (the last-name step by default).
        if let Some(text) = last_signal {
            self.prompter.alert(&text);
        }
    }

    /// Record a user edit in the row's field.
    pub fn edit(&self, id: CharacterId, field: RowField, value: String) {
        self.state.update(|s| s.edit(id, field, value));
    }

    /// Submit the row's current field values, then refresh the page that was
    /// active when the update started.
    pub async fn update_record(&self, id: CharacterId) {
        let (page, draft) = self.state.read(|s| (s.current_page(), s.draft(id)));
        let Some(draft) = draft else {
            tracing::warn!(id, "update requested for a row that is not rendered");
            return;
        };

        match self.backend.update(id, &draft).await {
            Ok(ack) => self.acknowledge(&ack),
            Err(err) => {
                tracing::error!("Update error: {err}");
                return;
            }
        }
        self.fetch_page(page).await;
    }

    /// Ask for confirmation, delete, then refresh the page that was active
    /// when the delete started.
    pub async fn delete_record(&self, id: CharacterId) {
        if !self.prompter.confirm(DELETE_PROMPT) {
            return;
        }
        let page = self.state.read(ListState::current_page);

        match self.backend.delete(id).await {
            Ok(ack) => self.acknowledge(&ack),
            Err(err) => {
                tracing::error!("Delete error: {err}");
                return;
            }
        }
        self.fetch_page(page).await;
    }

    fn acknowledge(&self, ack: &Acknowledgement) {
        match ack.text() {
            Some(text) => self.prompter.alert(text),
            None => tracing::warn!("backend acknowledged without message or error"),
        }
    }
}
