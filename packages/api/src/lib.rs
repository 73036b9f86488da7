//! # API crate — REST client for the character backend
//!
//! Every frontend talks to the backend through [`HttpBackend`], which implements
//! [`roster::CharacterBackend`] on top of `reqwest`. The same code runs in the
//! browser (reqwest's `fetch` backend on WASM) and natively.
//!
//! ## Endpoints
//!
//! | Method | Request |
//! |--------|---------|
//! | `list_page` | `GET {base}/characters?page=&per_page=` |
//! | `search` | `GET {base}/characters/search?<field>=<value>` |
//! | `update` | `PUT {base}/characters/{id}` with a JSON body |
//! | `delete` | `DELETE {base}/characters/{id}` |
//!
//! Response bodies are decoded whatever the HTTP status: the backend reports
//! "not found" and validation outcomes as `{ "error": ... }` or
//! `{ "message": ... }` bodies with 4xx codes, and those are regular replies
//! for the controller, not failures.

mod http;

pub use http::{HttpBackend, TransportError};
pub use roster::{BackendError, CharacterBackend};
