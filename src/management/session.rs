use crate::{error::AppError, management::KeyValueStore};

pub const OAUTH_STATE_KEY: &str = "oauth_state";
pub const CODE_VERIFIER_KEY: &str = "code_verifier";
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Where the login currently stands.
///
/// `Unauthenticated → PendingRedirect → AwaitingCallback → Authenticated`,
/// and back to `Unauthenticated` when the token is invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated,
    PendingRedirect,
    AwaitingCallback,
    Authenticated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    pub state: Option<String>,
    pub code_verifier: Option<String>,
    pub access_token: Option<String>,
}

impl AuthSession {
    /// Phase implied by what is persisted. A stored state/verifier pair
    /// means the redirect already happened.
    pub fn phase(&self) -> AuthPhase {
        if self.access_token.is_some() {
            AuthPhase::Authenticated
        } else if self.state.is_some() && self.code_verifier.is_some() {
            AuthPhase::AwaitingCallback
        } else {
            AuthPhase::Unauthenticated
        }
    }
}

/// Typed access to the three persisted session keys.
pub struct SessionManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<AuthSession, AppError> {
        Ok(AuthSession {
            state: self.store.get(OAUTH_STATE_KEY).await?,
            code_verifier: self.store.get(CODE_VERIFIER_KEY).await?,
            access_token: self.access_token().await?,
        })
    }

    pub async fn save_pending(&self, state: &str, code_verifier: &str) -> Result<(), AppError> {
        self.store.set(OAUTH_STATE_KEY, state).await?;
        self.store.set(CODE_VERIFIER_KEY, code_verifier).await
    }

    pub async fn state(&self) -> Result<Option<String>, AppError> {
        self.store.get(OAUTH_STATE_KEY).await
    }

    pub async fn code_verifier(&self) -> Result<Option<String>, AppError> {
        self.store.get(CODE_VERIFIER_KEY).await
    }

    pub async fn access_token(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .store
            .get(ACCESS_TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    /// Stores the token and drops the now consumed state/verifier pair.
    pub async fn save_token(&self, access_token: &str) -> Result<(), AppError> {
        self.store.set(ACCESS_TOKEN_KEY, access_token).await?;
        self.store.remove(OAUTH_STATE_KEY).await?;
        self.store.remove(CODE_VERIFIER_KEY).await
    }

    pub async fn clear_token(&self) -> Result<(), AppError> {
        self.store.remove(ACCESS_TOKEN_KEY).await
    }

    pub async fn clear_all(&self) -> Result<(), AppError> {
        self.store.remove(OAUTH_STATE_KEY).await?;
        self.store.remove(CODE_VERIFIER_KEY).await?;
        self.store.remove(ACCESS_TOKEN_KEY).await
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
