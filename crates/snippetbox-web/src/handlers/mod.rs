mod health;
mod snippet;

pub use health::health_handler;
pub use snippet::{create_snippet_handler, home_handler, show_snippet_handler};
