//! This crate contains all shared UI for the character admin panel.

pub mod views;

mod provider;
pub use provider::{
    resolve_base_url, use_list_state, use_roster, PanelBackend, Roster, RosterProvider,
    SignalState,
};

mod prompter;
pub use prompter::BrowserPrompter;

mod character_table;
pub use character_table::CharacterTable;

mod search_bar;
pub use search_bar::SearchBar;

mod pagination;
pub use pagination::PaginationControls;
