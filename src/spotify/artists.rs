use std::collections::HashMap;

use reqwest::{Client, StatusCode};

use crate::{
    error::{AppError, ErrorBody},
    types::ArtistsResponse,
    warning,
};

/// Most ids the artists endpoint accepts in one request.
pub const ARTIST_BATCH: usize = 50;

/// Genres per artist id, resolved in sequential batches of [`ARTIST_BATCH`].
///
/// A batch that fails is reported and skipped so the remaining genres are
/// still charted; only a rejected token aborts the lookup.
pub async fn artist_genres(
    client: &Client,
    api_url: &str,
    access_token: &str,
    ids: &[String],
) -> Result<HashMap<String, Vec<String>>, AppError> {
    let url = format!("{}/artists", api_url.trim_end_matches('/'));
    let mut genres = HashMap::new();

    for batch in ids.chunks(ARTIST_BATCH) {
        let res = client
            .get(&url)
            .query(&[("ids", batch.join(","))])
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized);
        }

        let body = res.text().await?;
        if !status.is_success() {
            warning!(
                "Error fetching artists batch: {}",
                ErrorBody::parse(&body).describe(status)
            );
            continue;
        }

        match serde_json::from_str::<ArtistsResponse>(&body) {
            Ok(page) => {
                for artist in page.artists.into_iter().flatten() {
                    genres.insert(artist.id, artist.genres);
                }
            }
            Err(e) => warning!("Error reading artists batch: {}", e),
        }
    }

    Ok(genres)
}
