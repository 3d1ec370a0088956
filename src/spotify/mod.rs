//! # Spotify Integration Module
//!
//! HTTP access to the Spotify accounts service and Web API.
//!
//! ```text
//! CLI / proxy handlers
//!          ↓
//! Spotify Integration Layer
//!     ├── artists      (genre lookup in batches of 50)
//!     ├── auth         (authorization code + PKCE, local callback)
//!     ├── credentials  (client credentials, single page forwarding)
//!     └── playlist     (page sources and the pagination loop)
//!          ↓
//! reqwest
//! ```
//!
//! ## Pagination
//!
//! Pages are fetched strictly one after the other since each request
//! depends on the previous response. Two strategies share one loop:
//! following the `next` URL returned by the API (direct mode), or
//! advancing an offset by the number of items received (proxied mode).
//!
//! ## Errors
//!
//! A 401 from the Web API surfaces as [`crate::error::AppError::Unauthorized`];
//! other failures carry the provider's message when the body is JSON and a
//! truncated body snippet otherwise. Nothing is retried.

pub mod artists;
pub mod auth;
pub mod credentials;
pub mod playlist;
