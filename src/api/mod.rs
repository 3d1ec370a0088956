//! # API Module
//!
//! HTTP handlers served by the local servers:
//!
//! - [`callback`] - OAuth redirect target; hands `code`/`state` to the
//!   login waiting in the CLI
//! - [`playlist`] - token proxy; performs the client-credentials exchange
//!   server side and forwards one page of playlist tracks
//! - [`health`] / [`proxy_health`] - status and version for monitoring
//!
//! Routing lives in [`crate::server`].

mod callback;
mod health;
mod proxy;

pub use callback::callback;
pub use health::{health, proxy_health};
pub use proxy::{PlaylistQuery, ProxyState, playlist};
