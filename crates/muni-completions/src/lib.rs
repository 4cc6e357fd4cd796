//! Minimal client for a hosted text-completion API.
//!
//! The wire protocol is dictated by the upstream service: this crate sends
//! a [`CompletionRequest`] verbatim and hands back the parsed
//! [`CompletionResponse`] without interpretation. Upstream error payloads
//! deserialize into [`CompletionResponse::error`] so the caller decides how
//! to surface them; only transport-level failures are errors here.

pub mod client;
pub mod error;
pub mod types;

pub use client::CompletionsClient;
pub use error::CompletionsError;
pub use types::{ApiError, CompletionChoice, CompletionRequest, CompletionResponse};
