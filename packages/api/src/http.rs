use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use roster::{
    Acknowledgement, BackendError, Character, CharacterBackend, CharacterId, CharacterUpdate,
    Page, Reply, SearchFilter,
};

/// Failures below the level of a backend reply.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid backend base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl From<TransportError> for BackendError {
    fn from(err: TransportError) -> Self {
        BackendError::transport(err)
    }
}

/// `reqwest`-backed client for the `/characters` REST surface.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Create a client for the backend rooted at `base_url`
    /// (e.g. `"http://127.0.0.1:5000"` or `"https://host/admin/"`).
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, TransportError> {
        let trimmed = base_url.trim();
        // A trailing slash makes `Url::join` append instead of replacing the last segment.
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        let base = Url::parse(&normalized).map_err(|e| TransportError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(TransportError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|e| TransportError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: e.to_string(),
            })
    }

    fn character_url(&self, id: CharacterId) -> Result<Url, TransportError> {
        self.endpoint(&format!("characters/{id}"))
    }
}

async fn decode<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, TransportError> {
    let response = request.send().await?;
    tracing::debug!(status = %response.status(), url = %response.url(), "backend responded");
    Ok(response.json::<T>().await?)
}

impl CharacterBackend for HttpBackend {
    async fn list_page(&self, page: u32, per_page: u32) -> Result<Reply<Page>, BackendError> {
        let url = self.endpoint("characters")?;
        let request = self
            .client
            .get(url)
            .query(&[("page", page), ("per_page", per_page)]);
        Ok(decode(request).await?)
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Reply<Vec<Character>>, BackendError> {
        let url = self.endpoint("characters/search")?;
        let request = self
            .client
            .get(url)
            .query(&[(filter.field.query_key(), filter.value.as_str())]);
        Ok(decode(request).await?)
    }

    async fn update(
        &self,
        id: CharacterId,
        body: &CharacterUpdate,
    ) -> Result<Acknowledgement, BackendError> {
        let request = self.client.put(self.character_url(id)?).json(body);
        Ok(decode(request).await?)
    }

    async fn delete(&self, id: CharacterId) -> Result<Acknowledgement, BackendError> {
        let request = self.client.delete(self.character_url(id)?);
        Ok(decode(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use roster::SearchField;
    use serde_json::json;

    /// Local server that answers every route with 404 and a JSON body, the
    /// way the character service reports missing data.
    async fn serve_not_found() -> String {
        let app = Router::new()
            .route(
                "/characters",
                get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "No data found"}))) }),
            )
            .route(
                "/characters/search",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"message": "No matching characters found"})),
                    )
                }),
            )
            .route(
                "/characters/{id}",
                put(|Path(id): Path<i64>| async move {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": format!("Character with id {id} not found")})),
                    )
                })
                .delete(|Path(id): Path<i64>| async move {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": format!("Character with id {id} not found")})),
                    )
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_endpoints_from_bare_origin() {
        let backend = HttpBackend::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            backend.endpoint("characters").unwrap().as_str(),
            "http://127.0.0.1:5000/characters"
        );
        assert_eq!(
            backend.character_url(42).unwrap().as_str(),
            "http://127.0.0.1:5000/characters/42"
        );
    }

    #[test]
    fn test_endpoints_keep_base_path() {
        let backend = HttpBackend::new("https://example.com/admin").unwrap();
        assert_eq!(
            backend.endpoint("characters/search").unwrap().as_str(),
            "https://example.com/admin/characters/search"
        );

        let backend = HttpBackend::new("https://example.com/admin/").unwrap();
        assert_eq!(
            backend.character_url(7).unwrap().as_str(),
            "https://example.com/admin/characters/7"
        );
    }

    #[test]
    fn test_rejects_unusable_base_urls() {
        assert!(matches!(
            HttpBackend::new(""),
            Err(TransportError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            HttpBackend::new("/characters"),
            Err(TransportError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            HttpBackend::new("mailto:admin@example.com"),
            Err(TransportError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_search_query_is_encoded() {
        let backend = HttpBackend::new("http://localhost:5000").unwrap();
        let filter = SearchFilter::new(SearchField::LastName, "Van Houten");
        let request = backend
            .client
            .get(backend.endpoint("characters/search").unwrap())
            .query(&[(filter.field.query_key(), filter.value.as_str())])
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:5000/characters/search?last_name=Van+Houten"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) is not expected to be listening.
        let backend = HttpBackend::new("http://127.0.0.1:9").unwrap();
        let err = backend.list_page(1, 5).await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn test_not_found_bodies_are_decoded() {
        let backend = HttpBackend::new(&serve_not_found().await).unwrap();

        let reply = backend.list_page(4, 5).await.unwrap();
        assert_eq!(reply, Reply::error("No data found"));

        let filter = SearchFilter::new(SearchField::FirstName, "Zzyzx");
        let reply = backend.search(&filter).await.unwrap();
        assert_eq!(reply, Reply::message("No matching characters found"));

        let body = CharacterUpdate {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            occupation: String::new(),
        };
        let ack = backend.update(99, &body).await.unwrap();
        assert_eq!(ack, Acknowledgement::failure("Character with id 99 not found"));

        let ack = backend.delete(99).await.unwrap();
        assert_eq!(ack.error.as_deref(), Some("Character with id 99 not found"));
        assert_eq!(ack.message, None);
    }
}
