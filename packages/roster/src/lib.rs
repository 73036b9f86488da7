pub mod backend;
pub mod config;
pub mod controller;
pub mod models;
pub mod search;
pub mod state;

mod memory;
pub use memory::MemoryBackend;

pub use backend::{BackendError, CharacterBackend};
pub use config::{ConfigError, RosterConfig};
pub use controller::{CharacterList, Prompter, StateHandle, DELETE_PROMPT};
pub use models::{Acknowledgement, Character, CharacterId, CharacterUpdate, Page, PageMeta, Reply};
pub use search::{SearchField, SearchFilter, SearchPipeline};
pub use state::{render_rows, EditableRow, ListState, PageShown, RowField, Ticket, View};
