use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use snippetbox_core::{ExpiryDays, NewSnippet, Snippet, SnippetId};

use crate::error::AppError;

/// Width of the `title` column.
pub const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct CreateSnippetRequest {
    pub title: String,
    pub content: String,
    pub expires_in_days: i64,
}

impl CreateSnippetRequest {
    /// Checks the request and turns it into store input.
    pub fn into_new_snippet(self) -> Result<NewSnippet, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be blank".to_string()));
        }

        let title_chars = self.title.chars().count();
        if title_chars > MAX_TITLE_CHARS {
            return Err(AppError::Validation(format!(
                "title must be at most {MAX_TITLE_CHARS} characters, got {title_chars}"
            )));
        }

        if self.content.trim().is_empty() {
            return Err(AppError::Validation("content must not be blank".to_string()));
        }

        let expires_in = ExpiryDays::new(self.expires_in_days)?;

        Ok(NewSnippet::new(self.title, self.content, expires_in))
    }
}

#[derive(Debug, Serialize)]
pub struct CreateSnippetResponse {
    pub id: SnippetId,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct SnippetResponse {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created: Timestamp,
    pub expires: Timestamp,
}

impl From<Snippet> for SnippetResponse {
    fn from(snippet: Snippet) -> Self {
        Self {
            id: snippet.id,
            title: snippet.title,
            content: snippet.content,
            created: snippet.created,
            expires: snippet.expires,
        }
    }
}
