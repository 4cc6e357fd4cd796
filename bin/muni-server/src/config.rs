//! Server configuration, loaded from environment variables at startup.

use anyhow::{Context, Result};

/// Default persona block prepended to every prompt. Product content, not
/// system behaviour; override with `MUNI_PERSONA`.
pub const DEFAULT_PERSONA: &str = "You are a mental health support companion grounded in cognitive \
behavioural therapy, talking to people like a caring human being. Understand and reply in Taglish \
when the user writes in Tagalog. Do not provide answers to homework or assignment questions. If a \
user mentions suicide or expresses serious distress, share the Hopeline PH hotline (02) 804-4673 \
or 0917-558-4673 and point them to articles or resources that may be helpful. Suggest activities, \
YouTube videos, blogs, and articles that can help the user with their concern. Keep every reply \
empathetic, compassionate, and non-judgmental.";

/// Default canned opening line attributed to the bot. Override with
/// `MUNI_GREETING`.
pub const DEFAULT_GREETING: &str =
    "Hi, I'm Muni. I'm here to listen. How are you feeling today?";

/// Runtime configuration for muni-server.
///
/// Every field except the API credential has a sensible default so the
/// server works out-of-the-box; a missing `OPENAI_API_KEY` is a startup
/// error and the process refuses to serve.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// Bearer credential for the completion API. Required.
    pub api_key: String,

    /// Base URL of the completion API
    /// (default: `"https://api.openai.com/v1"`).
    pub completions_url: String,

    /// Model identifier sent with every completion request.
    pub model: String,

    /// Persona/instruction block prepended to every prompt.
    pub persona: String,

    /// Canned opening bot line reinserted ahead of the transcript.
    pub greeting: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origin allow-list; wildcard when unset.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document (default: `true`).
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("missing environment variable OPENAI_API_KEY")?;

        Ok(Self {
            bind_address: env_or("MUNI_BIND", "0.0.0.0:3000"),
            api_key,
            completions_url: env_or("MUNI_COMPLETIONS_URL", "https://api.openai.com/v1"),
            model: env_or("MUNI_MODEL", "text-davinci-003"),
            persona: env_or("MUNI_PERSONA", DEFAULT_PERSONA),
            greeting: env_or("MUNI_GREETING", DEFAULT_GREETING),
            log_level: env_or("MUNI_LOG", "info"),
            log_json: env_truthy("MUNI_LOG_JSON"),
            cors_allowed_origins: std::env::var("MUNI_CORS_ORIGINS").ok(),
            enable_swagger: std::env::var("MUNI_ENABLE_SWAGGER")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        })
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_truthy(key: &str) -> bool {
    std::env::var(key).map(|v| truthy(&v)).unwrap_or(false)
}

fn truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn truthy_accepts_one_and_true() {
        assert!(truthy("1"));
        assert!(truthy("true"));
        assert!(truthy("TRUE"));
        assert!(!truthy("0"));
        assert!(!truthy("yes"));
        assert!(!truthy(""));
    }

    #[test]
    fn env_or_falls_back_for_unset_variables() {
        assert_eq!(env_or("MUNI_TEST_NEVER_SET", "fallback"), "fallback");
    }
}
