pub mod memory;

use crate::error::Result;
use crate::snippet::{NewSnippet, Snippet, SnippetId};
use async_trait::async_trait;

/// Maximum number of snippets returned by [`ReadSnippetStore::latest`].
pub const LATEST_LIMIT: usize = 10;

/// A read-only view of a snippet store.
///
/// Only live snippets (expiry strictly after the store's notion of "now")
/// are ever returned. Expired snippets stay in storage but are unreachable.
#[async_trait]
pub trait ReadSnippetStore: Send + Sync + 'static {
    /// Retrieves the live snippet with the given id.
    /// Returns `None` if the id does not exist or the snippet has expired.
    async fn get(&self, id: SnippetId) -> Result<Option<Snippet>>;

    /// Returns up to [`LATEST_LIMIT`] live snippets, most recently created first.
    async fn latest(&self) -> Result<Vec<Snippet>>;
}

#[async_trait]
pub trait SnippetStore: ReadSnippetStore {
    /// Stores a new snippet stamped with the current UTC instant and returns
    /// the identifier assigned to it.
    async fn create(&self, snippet: NewSnippet) -> Result<SnippetId>;
}
