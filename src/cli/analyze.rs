use std::{path::PathBuf, time::Duration};

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    analysis::{self, Analysis},
    config::Settings,
    error,
    error::AppError,
    info,
    management::{FileStore, KeyValueStore},
    render,
    spotify::{
        artists,
        auth::{Authenticator, BrowserLogin, LoginFlow},
        playlist::{self as fetcher, DirectSource, FetchProgress, PageSource, ProxySource},
    },
    success,
    types::RawTrackItem,
    utils, warning,
};

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub playlist: String,
    pub proxy: Option<String>,
    pub html: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub top: usize,
}

pub async fn analyze(settings: &Settings, opts: AnalyzeOptions) {
    let Some(playlist_id) = utils::playlist_id_from_input(&opts.playlist) else {
        error!("'{}' is not a playlist id or link", opts.playlist);
    };

    match run(settings, &opts, &playlist_id).await {
        Ok(analysis) => success!(
            "Analyzed {} tracks from playlist {}",
            analysis.summary.total,
            playlist_id
        ),
        Err(e) => error!("Error: {}", e),
    }
}

async fn run(
    settings: &Settings,
    opts: &AnalyzeOptions,
    playlist_id: &str,
) -> Result<Analysis, AppError> {
    info!("Fetching playlist {}...", playlist_id);

    let client = Client::new();

    // The proxy only forwards playlist pages, so genres need the user token.
    let (items, token) = match &opts.proxy {
        Some(proxy_url) => {
            let source = ProxySource::new(client.clone(), proxy_url, playlist_id);
            (fetch_with_progress(&source).await?, None)
        }
        None => {
            let mut auth = Authenticator::new(settings.clone(), FileStore::default_location());
            let items = fetch_direct(
                &mut auth,
                &mut BrowserLogin,
                &client,
                &settings.api_url,
                playlist_id,
            )
            .await?;
            (items, auth.access_token().await?)
        }
    };

    let records = analysis::aggregate(&items)?;
    let skipped = items.len() - records.len();
    if skipped > 0 {
        warning!("Skipped {} tracks without a release date", skipped);
    }

    let mut analysis = Analysis::new(records, opts.top)?;

    if let Some(token) = token {
        let ids = analysis::unique_artist_ids(&analysis.tracks);
        info!("Fetching details for {} artists...", ids.len());
        let genres = artists::artist_genres(&client, &settings.api_url, &token, &ids).await?;
        analysis = analysis.with_genres(&genres, opts.top);
    }

    println!("{}", render::terminal::report(&analysis));

    if let Some(path) = &opts.html {
        let generated_at = Local::now().format("%Y-%m-%d %H:%M").to_string();
        let page = render::html::report(&analysis, playlist_id, &generated_at);
        async_fs::write(path, page).await?;
        success!("HTML report saved to {}", path.display());
    }

    if let Some(path) = &opts.csv {
        async_fs::write(path, render::csv::to_csv(&analysis.tracks)).await?;
        success!("Data saved to {}", path.display());
    }

    Ok(analysis)
}

/// Direct mode. A missing token runs `login`; a rejected token is cleared
/// and `login` runs once more before the rejection is reported.
pub async fn fetch_direct<S, L>(
    auth: &mut Authenticator<S>,
    login: &mut L,
    client: &Client,
    api_url: &str,
    playlist_id: &str,
) -> Result<Vec<RawTrackItem>, AppError>
where
    S: KeyValueStore,
    L: LoginFlow,
{
    let mut attempts = 0;

    loop {
        attempts += 1;

        let token = match auth.access_token().await? {
            Some(token) => token,
            None => {
                info!("No stored token, logging in with Spotify.");
                login.login(auth).await?
            }
        };

        let source = DirectSource::new(client.clone(), api_url, playlist_id, &token);
        match fetch_with_progress(&source).await {
            Err(e) if e.requires_reauth() => {
                auth.invalidate().await?;
                if attempts > 1 {
                    return Err(e);
                }
                warning!("Spotify rejected the stored token ({}), logging in again.", e);
            }
            result => return result,
        }
    }
}

async fn fetch_with_progress<P: PageSource>(source: &P) -> Result<Vec<RawTrackItem>, AppError> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = fetcher::fetch_all(source, |progress: FetchProgress| {
        pb.set_message(match progress.total {
            Some(total) => format!("Fetching tracks... ({}/{})", progress.fetched, total),
            None => format!("Fetching tracks... ({})", progress.fetched),
        });
    })
    .await;

    pb.finish_and_clear();
    result
}
