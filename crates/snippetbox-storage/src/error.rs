//! Errors surfaced by the storage backends.
//!
//! The taxonomy lives in `snippetbox_core` so every backend reports the same
//! kinds; it is re-exported here for callers that only depend on storage.

pub use snippetbox_core::error::{BackendError, Result, StorageError};
