//! Core types and traits for snippetbox.
//!
//! This crate defines the snippet record model, the store contract shared
//! by every backend, and an in-memory backend.

pub mod error;
pub mod snippet;
pub mod store;

pub use error::{BackendError, CoreError, StorageError};
pub use snippet::{ExpiryDays, NewSnippet, Snippet, SnippetId, MAX_EXPIRY_DAYS};
pub use store::memory::InMemorySnippetStore;
pub use store::{ReadSnippetStore, SnippetStore, LATEST_LIMIT};
