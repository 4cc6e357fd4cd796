use thiserror::Error;

/// Errors that can be returned by the completions client.
///
/// An error payload returned *by* the API is not represented here: it
/// parses into [`crate::CompletionResponse::error`] and is handled by the
/// caller.
#[derive(Debug, Error)]
pub enum CompletionsError {
    /// The HTTP request failed (connect, TLS, body read, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not JSON of the expected shape.
    #[error("invalid completion response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
