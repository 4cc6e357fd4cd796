//! Chat relay route.
//!
//! Flattens the client-supplied conversation into a completion prompt and
//! forwards it to the hosted completion API with fixed sampling
//! parameters. Once a request is well-formed the caller always gets
//! `200 {"text": …}`: an upstream error payload is relayed inside `text`
//! rather than through the HTTP status, so chat front-ends can render it
//! inline as a bot message.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{debug, error, info};
use utoipa::OpenApi;

use muni_completions::{CompletionRequest, CompletionResponse};

use crate::error::ServerError;
use crate::prompt;
use crate::schemas::chat::{ChatReply, ChatRequest, ChatTurn, Speaker};
use crate::state::AppState;

// Fixed sampling parameters. The upstream contract pins these; they are
// deliberately not exposed to the chat client.
const TEMPERATURE: f32 = 0.9;
const MAX_TOKENS: u32 = 200;
const TOP_P: f32 = 1.0;
const FREQUENCY_PENALTY: f32 = 0.0;
const PRESENCE_PENALTY: f32 = 0.0;

/// Prefix reported to the caller when the upstream returns an error payload.
const API_ERROR_PREFIX: &str = "ERROR with API integration.";

#[derive(OpenApi)]
#[openapi(
    paths(relay_chat),
    components(schemas(ChatRequest, ChatReply, ChatTurn, Speaker))
)]
pub struct ChatApi;

/// Register the chat relay route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat", post(relay_chat))
}

/// Relay one conversation to the completion API (`POST /api/chat`).
///
/// The history must contain at least two turns: the greeting placeholder
/// and the user's opening line. Everything after that is forwarded as a
/// labelled transcript.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model reply, or an error description in `text`", body = ChatReply),
        (status = 400, description = "Fewer than two messages supplied"),
        (status = 502, description = "Completion API unreachable"),
    )
)]
pub async fn relay_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ServerError> {
    if req.messages.len() < 2 {
        return Err(ServerError::BadRequest(
            "conversation must contain at least two messages".into(),
        ));
    }

    let transcript = prompt::transcript(&req.messages);
    let full_prompt = prompt::render_prompt(
        &state.config.persona,
        &state.config.greeting,
        &transcript,
    );

    debug!(
        turns = req.messages.len(),
        prompt_len = full_prompt.len(),
        "relaying conversation"
    );

    let completion_req = CompletionRequest {
        model: state.config.model.clone(),
        prompt: full_prompt,
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
        top_p: TOP_P,
        frequency_penalty: FREQUENCY_PENALTY,
        presence_penalty: PRESENCE_PENALTY,
        stop: prompt::stop_labels(),
        user: req.user,
    };

    let response = state.completions.complete(&completion_req).await?;
    let text = relay_text(response)?;

    info!(reply_len = text.len(), "completion relayed");

    Ok(Json(ChatReply { text }))
}

/// Map an upstream response to the text relayed to the caller.
///
/// Error payloads become ordinary text with [`API_ERROR_PREFIX`], checked
/// before `choices`; a response carrying neither is an internal error.
fn relay_text(response: CompletionResponse) -> Result<String, ServerError> {
    if let Some(err) = response.error {
        error!(message = %err.message, "completion API returned an error payload");
        return Ok(format!("{API_ERROR_PREFIX} {}", err.message));
    }

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or_else(|| {
            ServerError::Internal("completion response contained neither choices nor an error".into())
        })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use muni_completions::{ApiError, CompletionChoice};

    fn success(texts: &[&str]) -> CompletionResponse {
        CompletionResponse {
            choices: texts
                .iter()
                .map(|t| CompletionChoice { text: (*t).into() })
                .collect(),
            error: None,
        }
    }

    fn failure(message: &str) -> CompletionResponse {
        CompletionResponse {
            choices: vec![],
            error: Some(ApiError {
                message: message.into(),
            }),
        }
    }

    #[test]
    fn error_payloads_are_relayed_with_prefix() {
        let text = relay_text(failure("model overloaded")).unwrap();
        assert_eq!(text, "ERROR with API integration. model overloaded");
        assert!(text.starts_with("ERROR with API integration. "));
    }

    #[test]
    fn success_text_is_relayed_unmodified() {
        assert_eq!(relay_text(success(&[" Hi there! "])).unwrap(), " Hi there! ");
    }

    #[test]
    fn first_choice_wins() {
        assert_eq!(relay_text(success(&["first", "second"])).unwrap(), "first");
    }

    #[test]
    fn error_takes_precedence_over_choices() {
        let mut response = success(&["ignored"]);
        response.error = Some(ApiError {
            message: "invalid api key".into(),
        });
        assert_eq!(
            relay_text(response).unwrap(),
            "ERROR with API integration. invalid api key"
        );
    }

    #[test]
    fn empty_response_is_an_internal_error() {
        assert!(relay_text(success(&[])).is_err());
    }

    #[test]
    fn short_histories_fail_validation() {
        let messages = vec![ChatTurn {
            who: Speaker::Bot,
            message: "placeholder".into(),
        }];
        assert!(messages.len() < 2, "one turn has no prompt to build");
    }
}
