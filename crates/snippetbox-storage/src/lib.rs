//! MySQL-backed snippet store.

pub mod error;
pub mod mysql;

pub use error::{BackendError, Result, StorageError};
pub use mysql::{MySqlSnippetStore, MySqlStoreOptions};
pub use snippetbox_core::store::{ReadSnippetStore, SnippetStore};
