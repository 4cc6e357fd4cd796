//! Request / response types for the chat relay API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The author of one conversation turn.
///
/// A closed set: anything other than `"user"` or `"bot"` is rejected at
/// the JSON layer before a handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    /// Label used for this speaker in the assembled prompt.
    pub fn label(self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Bot => "AI",
        }
    }
}

/// A single turn in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    /// Who authored the turn.
    pub who: Speaker,
    /// The turn's text.
    pub message: String,
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Full conversation history, oldest first. The first element is the
    /// greeting placeholder and is never forwarded verbatim; see the
    /// prompt module.
    pub messages: Vec<ChatTurn>,
    /// Optional end-user identifier, forwarded to the completion API.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user: Option<String>,
}

/// Response body for `POST /api/chat`.
///
/// Upstream failures are reported in `text` with an error prefix rather
/// than through the HTTP status code, so chat clients can render them
/// inline as a bot message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    /// The model's reply, or an error description.
    pub text: String,
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn speaker_tags_deserialize_lowercase() {
        let turn: ChatTurn = serde_json::from_str(r#"{"who":"user","message":"hi"}"#).unwrap();
        assert_eq!(turn.who, Speaker::User);

        let turn: ChatTurn = serde_json::from_str(r#"{"who":"bot","message":"hello"}"#).unwrap();
        assert_eq!(turn.who, Speaker::Bot);
    }

    #[test]
    fn unknown_speaker_is_rejected() {
        let result = serde_json::from_str::<ChatTurn>(r#"{"who":"system","message":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn user_field_is_optional() {
        let req: ChatRequest = serde_json::from_str(r#"{"messages":[]}"#).unwrap();
        assert!(req.user.is_none());
        assert!(req.messages.is_empty());
    }
}
