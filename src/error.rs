//! Error taxonomy shared by every layer of the crate.
//!
//! All fallible library operations return [`AppError`]. Each command maps
//! an error to one user-visible message; only [`AppError::requires_reauth`]
//! errors trigger an automatic recovery (the stored token is cleared and a
//! fresh login starts).

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::utils;

/// Raw error bodies are cut to this many characters before they are shown.
pub const SNIPPET_LEN: usize = 100;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token exchange failed: {0}")]
    AuthExchange(String),

    #[error("Authorization was denied: {0}")]
    AuthDenied(String),

    #[error("Authorization state does not match the pending login")]
    StateMismatch,

    #[error("Missing PKCE code verifier, start the login again")]
    MissingVerifier,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Fetch(String),

    #[error("No valid tracks found with release dates.")]
    NoValidTracks,

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns true when the stored access token must be dropped and the
    /// user has to log in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            AppError::Unauthorized => true,
            AppError::Fetch(message) => {
                message.contains("Unauthorized") || message.to_lowercase().contains("expired")
            }
            _ => false,
        }
    }
}

/// Body of a non-success HTTP response.
///
/// `Structured` when the body parsed as JSON, `Raw` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    Structured { message: String },
    Raw { snippet: String },
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(json) => ErrorBody::Structured {
                message: structured_message(&json)
                    .unwrap_or_else(|| utils::truncate_chars(body.trim(), SNIPPET_LEN)),
            },
            Err(_) => ErrorBody::Raw {
                snippet: utils::truncate_chars(body.trim(), SNIPPET_LEN),
            },
        }
    }

    /// Human readable message for a response with the given status.
    ///
    /// Structured bodies yield the provider's message. Raw bodies yield the
    /// status line, followed by the snippet when there is one.
    pub fn describe(&self, status: StatusCode) -> String {
        match self {
            ErrorBody::Structured { message } => message.clone(),
            ErrorBody::Raw { snippet } if snippet.is_empty() => status.to_string(),
            ErrorBody::Raw { snippet } => format!("{status}: {snippet}"),
        }
    }
}

// Spotify resource errors look like {"error": {"status": 401, "message": ".."}},
// token endpoint errors like {"error": "invalid_grant", "error_description": ".."}.
fn structured_message(json: &Value) -> Option<String> {
    let candidates = [
        json.pointer("/error/message"),
        json.get("error_description"),
        json.get("error"),
        json.get("message"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}
