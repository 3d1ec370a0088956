use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    config::Settings,
    spotify::credentials::{self, CredentialsError},
    warning,
};

/// Shared by every proxy request. The client secret never leaves the server.
#[derive(Clone)]
pub struct ProxyState {
    pub settings: Settings,
    pub client: Client,
}

impl ProxyState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaylistQuery {
    pub playlist_id: Option<String>,
    pub offset: Option<u64>,
}

/// `GET /api/playlist?playlist_id=..&offset=..`
///
/// Fetches a client-credentials token and forwards a single page request,
/// answering with the provider's status and JSON body.
pub async fn playlist(
    Query(query): Query<PlaylistQuery>,
    Extension(state): Extension<ProxyState>,
) -> Response {
    let Some(playlist_id) = query.playlist_id.filter(|id| !id.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing playlist_id", None);
    };

    let Some((client_id, client_secret)) = state.settings.client_credentials() else {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server is missing client credentials",
            None,
        );
    };

    let token = match credentials::client_credentials_token(
        &state.client,
        &state.settings.token_url,
        client_id,
        client_secret,
    )
    .await
    {
        Ok(token) => token,
        Err(CredentialsError::Rejected(rejection)) => {
            return error_response(
                rejection.status,
                "Failed to get token",
                Some(rejection.details),
            );
        }
        Err(CredentialsError::Request(e)) => {
            warning!("Token request failed: {}", e);
            return error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to get token",
                Some(e.to_string()),
            );
        }
    };

    let page = credentials::playlist_tracks_page(
        &state.client,
        &state.settings.api_url,
        &token,
        &playlist_id,
        query.offset.unwrap_or(0),
    )
    .await;

    match page {
        Ok((status, body)) => match serde_json::from_str::<Value>(&body) {
            Ok(json) => (status, Json(json)).into_response(),
            Err(_) => error_response(
                status,
                status.canonical_reason().unwrap_or("Upstream error"),
                Some(body),
            ),
        },
        Err(e) => {
            warning!("Tracks request failed: {}", e);
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to fetch tracks",
                Some(e.to_string()),
            )
        }
    }
}

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    let body = match details {
        Some(details) => json!({ "error": error, "details": details }),
        None => json!({ "error": error }),
    };
    (status, Json(body)).into_response()
}
