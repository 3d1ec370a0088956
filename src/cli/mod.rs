//! # CLI Module
//!
//! User-facing commands. Each command takes the [`crate::config::Settings`]
//! resolved at startup, reports progress with the crate's output macros and
//! ends with a single success or error line.
//!
//! - [`auth`] - browser login (authorization code with PKCE)
//! - [`logout`] - forget the stored session
//! - [`analyze`] - fetch a playlist, aggregate by year and decade, render
//! - [`proxy`] - serve the client-credentials token proxy
//!
//! ```bash
//! playlist-eras auth
//! playlist-eras analyze https://open.spotify.com/playlist/56afGpmssmu4sR9Pz92jfE --html report.html
//! playlist-eras proxy &
//! playlist-eras analyze 56afGpmssmu4sR9Pz92jfE --proxy http://127.0.0.1:3000
//! ```

mod analyze;
mod auth;
mod proxy;

pub use analyze::{AnalyzeOptions, analyze, fetch_direct};
pub use auth::{auth, logout};
pub use proxy::proxy;
