//! # Backend port
//!
//! [`CharacterBackend`] is the async interface the controller talks to. It maps
//! one-to-one onto the REST surface:
//!
//! | Method | Request |
//! |--------|---------|
//! | [`list_page`](CharacterBackend::list_page) | `GET /characters?page=&per_page=` |
//! | [`search`](CharacterBackend::search) | `GET /characters/search?<field>=<value>` |
//! | [`update`](CharacterBackend::update) | `PUT /characters/{id}` |
//! | [`delete`](CharacterBackend::delete) | `DELETE /characters/{id}` |
//!
//! Backend-reported outcomes (`error` / `message` bodies) are ordinary values.
//! `Err(BackendError)` is reserved for transport failures: the request never
//! completed or the body could not be decoded.
//!
//! Implementations: `api::HttpBackend` (browser and native HTTP) and
//! [`crate::MemoryBackend`] (tests).

use std::future::Future;

use crate::models::{Acknowledgement, Character, CharacterId, CharacterUpdate, Page, Reply};
use crate::search::SearchFilter;

/// A request that did not produce a decodable backend response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(String),
}

impl BackendError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        BackendError::Transport(err.to_string())
    }
}

/// Async access to the character collection.
pub trait CharacterBackend {
    fn list_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Reply<Page>, BackendError>>;

    fn search(
        &self,
        filter: &SearchFilter,
    ) -> impl Future<Output = Result<Reply<Vec<Character>>, BackendError>>;

    fn update(
        &self,
        id: CharacterId,
        body: &CharacterUpdate,
    ) -> impl Future<Output = Result<Acknowledgement, BackendError>>;

    fn delete(&self, id: CharacterId)
        -> impl Future<Output = Result<Acknowledgement, BackendError>>;
}
