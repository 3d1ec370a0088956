//! Playlist Eras library
//!
//! This library fetches the track list of a Spotify playlist, groups the
//! tracks by the release year of their album and renders histograms and a
//! sorted table from the result. Access is granted either through an OAuth2
//! authorization-code flow with PKCE, or through a small local proxy that
//! performs a client-credentials exchange on the caller's behalf.
//!
//! # Modules
//!
//! - `analysis` - Turns raw playlist items into year/decade records and statistics
//! - `api` - HTTP handlers for the local callback server and the token proxy
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading and the settings readiness signal
//! - `error` - Error taxonomy and provider error body parsing
//! - `management` - Persistent session storage behind a key-value interface
//! - `render` - Terminal, HTML and CSV presentation
//! - `server` - Local HTTP servers (OAuth callback, proxy)
//! - `spotify` - Spotify Web API client (PKCE, client credentials, pagination)
//! - `types` - Wire types and table rows
//! - `utils` - PKCE generators and input helpers
//!
//! # Example
//!
//! ```
//! use playlist_eras::{analysis, types::RawTrackItem};
//!
//! fn years(items: &[RawTrackItem]) -> playlist_eras::Res<Vec<i32>> {
//!     let tracks = analysis::aggregate(items)?;
//!     Ok(tracks.iter().map(|t| t.year).collect())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod render;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for binary glue code.
///
/// Library operations return [`error::AppError`]; this alias is for places
/// that only need to bubble any error up to the user.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Report written to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the top level of a command: it terminates the process
/// with exit code 1, so nothing after it runs.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser, open this URL manually:\n{}", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
