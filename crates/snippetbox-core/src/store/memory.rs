use crate::error::{BackendError, Result, StorageError};
use crate::snippet::{NewSnippet, Snippet, SnippetId};
use crate::store::{ReadSnippetStore, SnippetStore, LATEST_LIMIT};
use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// In-memory implementation of the snippet store using DashMap.
///
/// Identifiers come from an atomic counter starting at 1, mirroring an
/// auto-increment column. Like the MySQL store, expired snippets are kept
/// and filtered out at read time.
#[derive(Debug)]
pub struct InMemorySnippetStore {
    storage: DashMap<SnippetId, Snippet>,
    next_id: AtomicU64,
}

impl InMemorySnippetStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored snippets, expired ones included.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemorySnippetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadSnippetStore for InMemorySnippetStore {
    async fn get(&self, id: SnippetId) -> Result<Option<Snippet>> {
        let now = Timestamp::now();

        let Some(entry) = self.storage.get(&id) else {
            return Ok(None);
        };

        if !entry.is_live_at(now) {
            trace!(id = %id, "snippet has expired");
            return Ok(None);
        }

        Ok(Some(entry.clone()))
    }

    async fn latest(&self) -> Result<Vec<Snippet>> {
        let now = Timestamp::now();

        let mut live: Vec<Snippet> = self
            .storage
            .iter()
            .filter(|entry| entry.is_live_at(now))
            .map(|entry| entry.value().clone())
            .collect();

        live.sort_by_key(|s| Reverse((s.created, s.id)));
        live.truncate(LATEST_LIMIT);

        Ok(live)
    }
}

#[async_trait]
impl SnippetStore for InMemorySnippetStore {
    async fn create(&self, snippet: NewSnippet) -> Result<SnippetId> {
        let created = Timestamp::now();
        let expires = created
            .checked_add(snippet.expires_in.as_duration())
            .map_err(|e| {
                StorageError::Write(BackendError::InvalidData(format!(
                    "expiry of {} is out of range: {e}",
                    snippet.expires_in
                )))
            })?;

        let id = SnippetId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.storage.insert(
            id,
            Snippet {
                id,
                title: snippet.title,
                content: snippet.content,
                created,
                expires,
            },
        );

        Ok(id)
    }
}
