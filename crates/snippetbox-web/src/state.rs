use std::sync::Arc;

use snippetbox_core::SnippetStore;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn SnippetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SnippetStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn SnippetStore {
        self.store.as_ref()
    }
}
