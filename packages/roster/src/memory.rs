use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::{BackendError, CharacterBackend};
use crate::models::{
    Acknowledgement, Character, CharacterId, CharacterUpdate, Page, PageMeta, Reply,
};
use crate::search::{SearchField, SearchFilter};

/// In-memory CharacterBackend that answers the way the REST server does.
///
/// Every call is appended to a request log (`"GET /characters?page=1&per_page=5"`)
/// so tests can assert exactly which requests were issued.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    records: Arc<Mutex<Vec<Character>>>,
    requests: Arc<Mutex<Vec<String>>>,
    offline: Arc<Mutex<bool>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Character>) -> Self {
        let backend = Self::new();
        *lock(&backend.records) = records;
        backend
    }

    /// Snapshot of the stored records, sorted by id.
    pub fn records(&self) -> Vec<Character> {
        let mut records = lock(&self.records).clone();
        records.sort_by_key(|c| c.id);
        records
    }

    /// Requests issued so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// While offline every call fails with a transport error.
    pub fn set_offline(&self, offline: bool) {
        *lock(&self.offline) = offline;
    }

    fn record(&self, request: String) -> Result<(), BackendError> {
        lock(&self.requests).push(request);
        if *lock(&self.offline) {
            return Err(BackendError::Transport("backend unreachable".to_string()));
        }
        Ok(())
    }
}

impl CharacterBackend for MemoryBackend {
    async fn list_page(&self, page: u32, per_page: u32) -> Result<Reply<Page>, BackendError> {
        self.record(format!("GET /characters?page={page}&per_page={per_page}"))?;

        let records = self.records();
        if records.is_empty() {
            return Ok(Reply::error("No data found"));
        }

        let per_page = per_page.max(1);
        let total = records.len();
        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page as usize);
        let data: Vec<Character> = records
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Ok(Reply::data(Page {
            data,
            meta: PageMeta {
                page,
                total_pages: total.div_ceil(per_page as usize) as u32,
                per_page: Some(per_page),
                total_records: Some(total as u32),
            },
        }))
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Reply<Vec<Character>>, BackendError> {
        self.record(format!(
            "GET /characters/search?{}={}",
            filter.field.query_key(),
            filter.value
        ))?;

        if filter.value.is_empty() {
            return Ok(Reply::error("Please provide first_name or last_name"));
        }
        let records = lock(&self.records).clone();
        if records.is_empty() {
            return Ok(Reply::error("No data found"));
        }

        let needle = filter.value.to_lowercase();
        let matches: Vec<Character> = records
            .into_iter()
            .filter(|c| {
                let haystack = match filter.field {
                    SearchField::FirstName => c.first_name.as_str(),
                    SearchField::LastName => c.last_name.as_str(),
                    SearchField::Occupation => c.occupation.as_deref().unwrap_or(""),
                };
                haystack.to_lowercase().contains(&needle)
            })
            .collect();

        if matches.is_empty() {
            return Ok(Reply::message("No matching characters found"));
        }
        Ok(Reply::data(matches))
    }

    async fn update(
        &self,
        id: CharacterId,
        body: &CharacterUpdate,
    ) -> Result<Acknowledgement, BackendError> {
        self.record(format!("PUT /characters/{id}"))?;

        let mut records = lock(&self.records);
        if records.is_empty() {
            return Ok(Acknowledgement::failure("No data found"));
        }
        let Some(record) = records.iter_mut().find(|c| c.id == id) else {
            return Ok(Acknowledgement::failure(format!(
                "Character with id {id} not found"
            )));
        };
        record.first_name = body.first_name.clone();
        record.last_name = body.last_name.clone();
        record.occupation = Some(body.occupation.clone());
        Ok(Acknowledgement::success(format!(
            "Character {id} updated successfully"
        )))
    }

    async fn delete(&self, id: CharacterId) -> Result<Acknowledgement, BackendError> {
        self.record(format!("DELETE /characters/{id}"))?;

        let mut records = lock(&self.records);
        if records.is_empty() {
            return Ok(Acknowledgement::failure("No data found"));
        }
        let before = records.len();
        records.retain(|c| c.id != id);
        if records.len() == before {
            return Ok(Acknowledgement::failure(format!(
                "Character with id {id} not found"
            )));
        }
        Ok(Acknowledgement::success(format!(
            "Character {id} deleted successfully"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(id: CharacterId, first: &str, last: &str) -> Character {
        Character {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            occupation: None,
        }
    }

    fn seven() -> MemoryBackend {
        MemoryBackend::with_records(
            (1..=7)
                .rev()
                .map(|id| character(id, &format!("First{id}"), &format!("Last{id}")))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_list_page_sorted_and_sliced() {
        let backend = seven();

        let page = backend.list_page(1, 5).await.unwrap().into_data().unwrap();
        let ids: Vec<_> = page.data.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(page.meta.total_pages, 2);
        assert_eq!(page.meta.total_records, Some(7));

        let page = backend.list_page(2, 5).await.unwrap().into_data().unwrap();
        let ids: Vec<_> = page.data.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![6, 7]);
    }

    #[tokio::test]
    async fn test_list_page_past_end_is_empty() {
        let backend = seven();
        let page = backend.list_page(4, 5).await.unwrap().into_data().unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.meta.page, 4);
        assert_eq!(page.meta.total_pages, 2);
    }

    #[tokio::test]
    async fn test_empty_backend_reports_error() {
        let backend = MemoryBackend::new();
        assert_eq!(
            backend.list_page(1, 5).await.unwrap(),
            Reply::error("No data found")
        );
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let backend = MemoryBackend::with_records(vec![
            character(1, "Monica", "Geller"),
            character(2, "Ross", "Geller"),
            character(3, "Phoebe", "Buffay"),
        ]);

        let rows = backend
            .search(&SearchFilter::new(SearchField::LastName, "gell"))
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(rows.len(), 2);

        let reply = backend
            .search(&SearchFilter::new(SearchField::FirstName, "Geller"))
            .await
            .unwrap();
        assert_eq!(reply, Reply::message("No matching characters found"));

        let reply = backend
            .search(&SearchFilter::new(SearchField::FirstName, ""))
            .await
            .unwrap();
        assert_eq!(reply, Reply::error("Please provide first_name or last_name"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let backend = seven();
        let body = CharacterUpdate {
            first_name: "Gunther".to_string(),
            last_name: "Central".to_string(),
            occupation: "Barista".to_string(),
        };

        let ack = backend.update(3, &body).await.unwrap();
        assert_eq!(ack.text(), Some("Character 3 updated successfully"));
        let updated = backend.records().into_iter().find(|c| c.id == 3).unwrap();
        assert_eq!(updated.first_name, "Gunther");
        assert_eq!(updated.occupation.as_deref(), Some("Barista"));

        let ack = backend.update(99, &body).await.unwrap();
        assert_eq!(ack.text(), Some("Character with id 99 not found"));

        let ack = backend.delete(3).await.unwrap();
        assert_eq!(ack.text(), Some("Character 3 deleted successfully"));
        assert_eq!(backend.records().len(), 6);

        let ack = backend.delete(3).await.unwrap();
        assert_eq!(ack.error.as_deref(), Some("Character with id 3 not found"));
    }

    #[tokio::test]
    async fn test_offline_records_request_and_fails() {
        let backend = seven();
        backend.set_offline(true);
        assert!(backend.delete(1).await.is_err());
        assert_eq!(backend.requests(), vec!["DELETE /characters/1".to_string()]);
        assert_eq!(backend.records().len(), 7);
    }
}
