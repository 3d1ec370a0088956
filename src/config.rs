//! Configuration management for playlist-eras.
//!
//! Configuration values come from environment variables, optionally seeded
//! from a `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults
//!
//! The values are collected once into a [`Settings`] object which is passed
//! explicitly to every component. Startup publishes the settings on a
//! `watch` channel; consumers wait on it with a bounded timeout instead of
//! polling.

use std::{env, path::PathBuf, time::Duration};

use tokio::sync::watch;

use crate::error::AppError;

/// Value shipped in `.env.example`; treated the same as an unset client id.
pub const CLIENT_ID_PLACEHOLDER: &str = "__SPOTIFY_CLIENT_ID__";

/// How long commands wait for the settings to be published.
pub const READY_TIMEOUT: Duration = Duration::from_secs(2);

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str = "playlist-read-private playlist-read-collaborative";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_PROXY_ADDRESS: &str = "127.0.0.1:3000";

/// Loads environment variables from `<data_local_dir>/playlist-eras/.env`.
///
/// Creates the directory when it is missing. A missing `.env` file is not an
/// error, the process environment alone is enough.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playlist-eras/.env`
/// - macOS: `~/Library/Application Support/playlist-eras/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-eras/.env`
pub async fn load_env() -> Result<(), AppError> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| {
            AppError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
    }

    Ok(())
}

/// Root of everything the application stores on disk.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlist-eras");
    path
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Public client id for the PKCE flow, `None` when not configured.
    pub client_id: Option<String>,
    /// Only used server side by the token proxy.
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    pub proxy_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            proxy_addr: DEFAULT_PROXY_ADDRESS.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            client_id: normalize_client_id(env::var("SPOTIFY_CLIENT_ID").ok()),
            client_secret: env::var("SPOTIFY_CLIENT_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            redirect_uri: var_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: var_or("SPOTIFY_SCOPE", DEFAULT_SCOPE),
            auth_url: var_or("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: var_or("SPOTIFY_API_URL", DEFAULT_API_URL),
            server_addr: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            proxy_addr: var_or("PROXY_ADDRESS", DEFAULT_PROXY_ADDRESS),
        }
    }

    pub fn require_client_id(&self) -> Result<&str, AppError> {
        self.client_id.as_deref().ok_or_else(|| {
            AppError::Configuration(
                "SPOTIFY_CLIENT_ID is not set, browser login is disabled".to_string(),
            )
        })
    }

    /// Client id and secret for the client-credentials exchange.
    pub fn client_credentials(&self) -> Option<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }
}

/// Maps an empty value or the un-substituted placeholder to `None`.
pub fn normalize_client_id(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && value != CLIENT_ID_PLACEHOLDER)
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub type SettingsSender = watch::Sender<Option<Settings>>;
pub type SettingsReceiver = watch::Receiver<Option<Settings>>;

pub fn settings_channel() -> (SettingsSender, SettingsReceiver) {
    watch::channel(None)
}

/// Resolves with the published settings, or `None` once `limit` elapsed.
pub async fn await_settings(mut rx: SettingsReceiver, limit: Duration) -> Option<Settings> {
    match tokio::time::timeout(limit, rx.wait_for(Option::is_some)).await {
        Ok(Ok(settings)) => (*settings).clone(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_client_id_is_not_configured() {
        assert_eq!(normalize_client_id(None), None);
        assert_eq!(normalize_client_id(Some("   ".into())), None);
        assert_eq!(
            normalize_client_id(Some(CLIENT_ID_PLACEHOLDER.into())),
            None
        );
        assert_eq!(
            normalize_client_id(Some(" abc123 ".into())),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn missing_client_id_is_a_configuration_error() {
        let settings = Settings::default();
        assert!(matches!(
            settings.require_client_id(),
            Err(AppError::Configuration(_))
        ));
        assert!(settings.client_credentials().is_none());
    }

    #[tokio::test]
    async fn await_settings_returns_published_value() {
        let (tx, rx) = settings_channel();
        let published = Settings {
            client_id: Some("abc".into()),
            ..Settings::default()
        };

        let expected = published.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(Some(published));
        });

        let settings = await_settings(rx, Duration::from_secs(2)).await;
        assert_eq!(settings, Some(expected));
    }

    #[tokio::test]
    async fn await_settings_gives_up_after_limit() {
        let (tx, rx) = settings_channel();
        let settings = await_settings(rx, Duration::from_millis(50)).await;
        assert_eq!(settings, None);
        drop(tx);
    }
}
