use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode};

use crate::{
    error::AppError,
    spotify::playlist::PAGE_SIZE,
    types::TokenResponse,
};

/// A token endpoint rejection, kept verbatim so the proxy can forward it.
#[derive(Debug)]
pub struct TokenRejection {
    pub status: StatusCode,
    pub details: String,
}

#[derive(Debug)]
pub enum CredentialsError {
    Rejected(TokenRejection),
    Request(AppError),
}

impl From<reqwest::Error> for CredentialsError {
    fn from(err: reqwest::Error) -> Self {
        CredentialsError::Request(AppError::Http(err))
    }
}

/// `grant_type=client_credentials` with HTTP Basic client authentication.
pub async fn client_credentials_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<String, CredentialsError> {
    let basic = STANDARD.encode(format!("{client_id}:{client_secret}"));

    let res = client
        .post(token_url)
        .header(reqwest::header::AUTHORIZATION, format!("Basic {basic}"))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(CredentialsError::Rejected(TokenRejection {
            status,
            details: body,
        }));
    }

    let token: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| CredentialsError::Request(AppError::Json(e)))?;

    token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            CredentialsError::Request(AppError::AuthExchange(
                "response did not contain an access token".to_string(),
            ))
        })
}

/// Requests one page of playlist tracks and hands back status and body
/// untouched.
pub async fn playlist_tracks_page(
    client: &Client,
    api_url: &str,
    access_token: &str,
    playlist_id: &str,
    offset: u64,
) -> Result<(StatusCode, String), AppError> {
    let url = format!(
        "{api_url}/playlists/{playlist_id}/tracks",
        api_url = api_url.trim_end_matches('/'),
    );

    let res = client
        .get(&url)
        .query(&[("limit", PAGE_SIZE), ("offset", offset)])
        .bearer_auth(access_token)
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    Ok((status, body))
}
