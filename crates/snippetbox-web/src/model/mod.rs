mod snippet;

pub use snippet::{CreateSnippetRequest, CreateSnippetResponse, SnippetResponse};

use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
