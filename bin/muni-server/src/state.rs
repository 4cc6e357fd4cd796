//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use muni_completions::CompletionsClient;

use crate::config::Config;

/// State shared across all HTTP handlers.
///
/// Everything here is immutable after startup; handlers never coordinate
/// through shared mutable state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Client for the hosted completion API.
    pub completions: CompletionsClient,
}
