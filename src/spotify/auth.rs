use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::sync::{Mutex, oneshot};

use crate::{
    config::Settings,
    error::{AppError, ErrorBody},
    info,
    management::{AuthPhase, KeyValueStore, SessionManager},
    server,
    types::{CallbackParams, TokenResponse},
    utils, warning,
};

/// How long the login waits for the provider to redirect back.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Authorization redirect produced by [`Authenticator::begin_login`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub url: String,
    pub state: String,
    pub code_challenge: String,
}

/// OAuth2 authorization code flow with PKCE.
///
/// Owns the session store; state, verifier and access token live there so a
/// login survives between process runs.
pub struct Authenticator<S: KeyValueStore> {
    settings: Settings,
    session: SessionManager<S>,
    client: Client,
    phase: AuthPhase,
}

impl<S: KeyValueStore> Authenticator<S> {
    pub fn new(settings: Settings, store: S) -> Self {
        Self::with_client(settings, store, Client::new())
    }

    pub fn with_client(settings: Settings, store: S, client: Client) -> Self {
        Self {
            settings,
            session: SessionManager::new(store),
            client,
            phase: AuthPhase::Unauthenticated,
        }
    }

    /// Picks up the phase implied by the persisted session.
    pub async fn restore(&mut self) -> Result<AuthPhase, AppError> {
        self.phase = self.session.load().await?.phase();
        Ok(self.phase)
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    pub async fn access_token(&self) -> Result<Option<String>, AppError> {
        self.session.access_token().await
    }

    /// Generates and persists state and verifier, and returns the
    /// authorization URL the user agent has to open.
    ///
    /// Nothing is persisted when the client id is not configured.
    pub async fn begin_login(&mut self) -> Result<LoginRequest, AppError> {
        let client_id = self.settings.require_client_id()?.to_string();

        let state = utils::generate_state();
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let url = authorize_url(&self.settings, &client_id, &state, &code_challenge)?;

        self.session.save_pending(&state, &code_verifier).await?;
        self.phase = AuthPhase::PendingRedirect;

        Ok(LoginRequest {
            url,
            state,
            code_challenge,
        })
    }

    /// Records that the user agent was sent to the authorization endpoint.
    pub fn mark_redirected(&mut self) {
        if self.phase == AuthPhase::PendingRedirect {
            self.phase = AuthPhase::AwaitingCallback;
        }
    }

    /// Exchanges the authorization code for an access token.
    ///
    /// `returned_state` is the `state` query parameter of the callback. It
    /// has to be present and equal to the stored one, otherwise nothing is
    /// sent to the token endpoint.
    pub async fn complete_login(
        &mut self,
        code: &str,
        returned_state: Option<&str>,
    ) -> Result<String, AppError> {
        let verifier = self
            .session
            .code_verifier()
            .await?
            .ok_or(AppError::MissingVerifier)?;

        match (self.session.state().await?, returned_state) {
            (Some(stored), Some(returned)) if stored == returned => {}
            _ => return Err(AppError::StateMismatch),
        }

        let client_id = self.settings.require_client_id()?;

        let res = self
            .client
            .post(&self.settings.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", client_id),
                ("code", code),
                ("code_verifier", verifier.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(AppError::AuthExchange(
                ErrorBody::parse(&body).describe(status),
            ));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::AuthExchange(format!("unexpected token response: {e}")))?;

        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::AuthExchange("response did not contain an access token".to_string())
            })?;

        self.session.save_token(&access_token).await?;
        self.phase = AuthPhase::Authenticated;

        Ok(access_token)
    }

    /// Drops the stored token after the API rejected it.
    pub async fn invalidate(&mut self) -> Result<(), AppError> {
        self.session.clear_token().await?;
        self.phase = AuthPhase::Unauthenticated;
        Ok(())
    }
}

pub fn authorize_url(
    settings: &Settings,
    client_id: &str,
    state: &str,
    code_challenge: &str,
) -> Result<String, AppError> {
    let url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", client_id),
            ("scope", settings.scope.as_str()),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("state", state),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
        ],
    )
    .map_err(|e| AppError::Configuration(format!("invalid authorization URL: {e}")))?;

    Ok(url.into())
}

/// Obtains a fresh access token for an [`Authenticator`] whose stored token
/// is missing or was rejected.
#[async_trait]
pub trait LoginFlow: Send {
    async fn login<S: KeyValueStore>(
        &mut self,
        auth: &mut Authenticator<S>,
    ) -> Result<String, AppError>;
}

/// Interactive login through the user's browser and the local callback
/// server.
pub struct BrowserLogin;

#[async_trait]
impl LoginFlow for BrowserLogin {
    async fn login<S: KeyValueStore>(
        &mut self,
        auth: &mut Authenticator<S>,
    ) -> Result<String, AppError> {
        login(auth).await
    }
}

/// Runs the whole browser login: redirect, local callback, code exchange.
pub async fn login<S: KeyValueStore>(auth: &mut Authenticator<S>) -> Result<String, AppError> {
    let request = auth.begin_login().await?;

    let (tx, rx) = oneshot::channel();
    let sender: server::CallbackSender = Arc::new(Mutex::new(Some(tx)));
    let server = server::start_callback_server(&auth.settings.server_addr, sender).await?;

    if webbrowser::open(&request.url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            request.url
        )
    } else {
        info!("Waiting for the Spotify login to complete in your browser...");
    }
    auth.mark_redirected();

    let params = wait_for_callback(rx, CALLBACK_TIMEOUT).await;
    server.abort();
    let params = params?;

    if let Some(reason) = params.error {
        return Err(AppError::AuthDenied(reason));
    }

    let code = params.code.ok_or_else(|| {
        AppError::AuthExchange("callback did not include an authorization code".to_string())
    })?;

    auth.complete_login(&code, params.state.as_deref()).await
}

pub async fn wait_for_callback(
    rx: oneshot::Receiver<CallbackParams>,
    limit: Duration,
) -> Result<CallbackParams, AppError> {
    match tokio::time::timeout(limit, rx).await {
        Ok(Ok(params)) => Ok(params),
        Ok(Err(_)) => Err(AppError::AuthExchange(
            "callback server stopped before the login completed".to_string(),
        )),
        Err(_) => Err(AppError::Timeout("the authorization callback".to_string())),
    }
}
