//! Completion API wire types.
//!
//! These mirror the upstream REST shapes exactly; the request is sent
//! verbatim and the response is parsed with no normalisation so that the
//! relay layer sees precisely what the API produced.

use serde::{Deserialize, Serialize};

/// Request body for `POST /completions`.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model identifier, e.g. `"text-davinci-003"`.
    pub model: String,
    /// The flattened conversation context to continue.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Nucleus-sampling cutoff.
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// Generation halts when either sequence is produced.
    pub stop: [String; 2],
    /// Optional end-user identifier, forwarded for upstream abuse tracking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// One generated continuation.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
}

/// Error payload the upstream returns in place of choices.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// Response body for `POST /completions`.
///
/// The upstream returns either `choices` or `error`. Both fields live on
/// one struct so a single deserialisation covers both shapes; callers must
/// check `error` before trusting `choices`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    fn request(user: Option<&str>) -> CompletionRequest {
        CompletionRequest {
            model: "text-davinci-003".into(),
            prompt: "hi\nAI: ".into(),
            temperature: 0.9,
            max_tokens: 200,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: ["AI:".into(), "User:".into()],
            user: user.map(str::to_owned),
        }
    }

    #[test]
    fn user_is_omitted_when_absent() {
        let value = serde_json::to_value(request(None)).unwrap();
        assert!(value.get("user").is_none());
    }

    #[test]
    fn user_is_forwarded_when_present() {
        let value = serde_json::to_value(request(Some("u-123"))).unwrap();
        assert_eq!(value["user"], "u-123");
    }

    #[test]
    fn stop_serializes_as_two_element_array() {
        let value = serde_json::to_value(request(None)).unwrap();
        assert_eq!(value["stop"], serde_json::json!(["AI:", "User:"]));
    }

    #[test]
    fn success_shape_parses() {
        let body = r#"{
            "id": "cmpl-1",
            "object": "text_completion",
            "choices": [{"text": " hello there", "index": 0, "finish_reason": "stop"}]
        }"#;
        let resp: CompletionResponse = serde_json::from_str(body).unwrap();
        assert!(resp.error.is_none());
        assert_eq!(resp.choices[0].text, " hello there");
    }

    #[test]
    fn error_shape_parses() {
        let body = r#"{
            "error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}
        }"#;
        let resp: CompletionResponse = serde_json::from_str(body).unwrap();
        assert!(resp.choices.is_empty());
        assert_eq!(resp.error.unwrap().message, "You exceeded your current quota");
    }
}
