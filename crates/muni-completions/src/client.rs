use reqwest::Client;
use tracing::debug;

use crate::error::CompletionsError;
use crate::types::{CompletionRequest, CompletionResponse};

/// Client for a hosted text-completion endpoint.
///
/// Holds one connection-pooled [`reqwest::Client`]; cheap to clone and
/// share across request handlers.
#[derive(Clone)]
pub struct CompletionsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for CompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The credential stays out of Debug output.
        f.debug_struct("CompletionsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CompletionsClient {
    /// Create a client for `base_url` (e.g. `https://api.openai.com/v1`),
    /// authenticating every call with `api_key` as a bearer token.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let http = Client::builder()
            .user_agent(concat!("muni-completions/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    /// Issue one completion call.
    ///
    /// No retries; the client's default timeout applies. The response body
    /// is parsed regardless of HTTP status, since the API reports failures
    /// as an `error` JSON payload on non-2xx responses.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionsError> {
        let url = format!("{}/completions", self.base_url);
        debug!(model = %request.model, prompt_len = request.prompt.len(), "completion call");

        let body = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trailing_slash_is_normalised() {
        let client = CompletionsClient::new("https://api.openai.com/v1/", "sk-test");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn debug_output_hides_the_credential() {
        let client = CompletionsClient::new("https://api.openai.com/v1", "sk-secret");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("sk-secret"));
    }
}
