//! Persisted login state.
//!
//! [`KeyValueStore`] abstracts where values live; [`SessionManager`] gives
//! typed access to the OAuth state, PKCE verifier and access token on top
//! of it.

mod session;
mod store;

pub use session::{
    ACCESS_TOKEN_KEY, AuthPhase, AuthSession, CODE_VERIFIER_KEY, OAUTH_STATE_KEY, SessionManager,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
