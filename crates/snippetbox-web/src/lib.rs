//! HTTP front end for snippetbox.
//!
//! Routes requests to a [`SnippetStore`](snippetbox_core::SnippetStore)
//! shared through [`AppState`](state::AppState).

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;
