//! Character list context and hooks for the UI.
//!
//! [`RosterProvider`] owns the [`ListState`] signal and the controller that
//! drives it, and starts the initial page load on mount. Components below it
//! read the state with [`use_list_state`] and trigger operations through the
//! controller returned by [`use_roster`].

use api::HttpBackend;
use dioxus::prelude::*;
use roster::{
    Acknowledgement, BackendError, Character, CharacterBackend, CharacterId, CharacterList,
    CharacterUpdate, ListState, Page, Reply, RosterConfig, SearchFilter, StateHandle,
};

use crate::BrowserPrompter;

/// A [`ListState`] kept in a Dioxus signal.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalState(pub Signal<ListState>);

impl StateHandle for SignalState {
    fn update<R>(&self, f: impl FnOnce(&mut ListState) -> R) -> R {
        let mut signal = self.0;
        let mut state = signal.write();
        f(&mut *state)
    }

    fn read<R>(&self, f: impl FnOnce(&ListState) -> R) -> R {
        f(&*self.0.peek())
    }
}

/// The backend the panel talks to. A config that does not yield a usable URL
/// still produces a backend, one whose every request fails as a transport
/// error, so the rest of the UI does not need a separate error path.
#[derive(Clone, Debug)]
pub enum PanelBackend {
    Http(HttpBackend),
    Misconfigured(String),
}

impl PanelBackend {
    pub fn from_config(config: &RosterConfig) -> Self {
        let base_url = resolve_base_url(config);
        match HttpBackend::new(&base_url) {
            Ok(backend) => {
                tracing::info!(base_url = %backend.base_url(), "using character backend");
                PanelBackend::Http(backend)
            }
            Err(e) => {
                tracing::error!("Backend unavailable: {e}");
                PanelBackend::Misconfigured(e.to_string())
            }
        }
    }

    pub fn problem(&self) -> Option<&str> {
        match self {
            PanelBackend::Http(_) => None,
            PanelBackend::Misconfigured(reason) => Some(reason),
        }
    }

    fn unavailable(reason: &str) -> BackendError {
        BackendError::Transport(reason.to_string())
    }
}

impl CharacterBackend for PanelBackend {
    async fn list_page(&self, page: u32, per_page: u32) -> Result<Reply<Page>, BackendError> {
        match self {
            PanelBackend::Http(http) => http.list_page(page, per_page).await,
            PanelBackend::Misconfigured(reason) => Err(Self::unavailable(reason)),
        }
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Reply<Vec<Character>>, BackendError> {
        match self {
            PanelBackend::Http(http) => http.search(filter).await,
            PanelBackend::Misconfigured(reason) => Err(Self::unavailable(reason)),
        }
    }

    async fn update(
        &self,
        id: CharacterId,
        body: &CharacterUpdate,
    ) -> Result<Acknowledgement, BackendError> {
        match self {
            PanelBackend::Http(http) => http.update(id, body).await,
            PanelBackend::Misconfigured(reason) => Err(Self::unavailable(reason)),
        }
    }

    async fn delete(&self, id: CharacterId) -> Result<Acknowledgement, BackendError> {
        match self {
            PanelBackend::Http(http) => http.delete(id).await,
            PanelBackend::Misconfigured(reason) => Err(Self::unavailable(reason)),
        }
    }
}

/// The controller type shared through context.
pub type Roster = CharacterList<PanelBackend, SignalState, BrowserPrompter>;

/// Configured base URL, or the page origin when the config leaves it empty.
pub fn resolve_base_url(config: &RosterConfig) -> String {
    let configured = config.api.base_url.trim();
    if !configured.is_empty() {
        return configured.to_string();
    }

    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        "http://127.0.0.1:5000".to_string()
    }
}

/// Get the character list controller.
pub fn use_roster() -> Roster {
    use_context::<Roster>()
}

/// Get the list state signal. Reading it subscribes the component.
pub fn use_list_state() -> Signal<ListState> {
    use_context::<Signal<ListState>>()
}

/// Provider component for the character list.
/// Wrap the admin views with this component.
#[component]
pub fn RosterProvider(config: RosterConfig, children: Element) -> Element {
    let per_page = config.per_page();
    let state = use_signal(move || ListState::new(per_page));

    let roster = use_context_provider(|| {
        CharacterList::new(
            PanelBackend::from_config(&config),
            SignalState(state),
            BrowserPrompter,
        )
        .with_pipeline(config.search_pipeline())
    });
    use_context_provider(|| state);

    let problem = roster.backend().problem().map(str::to_string);

    // Load page 1 on mount
    use_hook(move || {
        spawn(async move {
            roster.load().await;
        });
    });

    rsx! {
        if let Some(problem) = problem {
            div {
                class: "roster-banner roster-banner--error",
                "Backend unavailable: {problem}"
            }
        }
        {children}
    }
}
