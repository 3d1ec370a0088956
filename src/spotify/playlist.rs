use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use crate::{
    error::{AppError, ErrorBody},
    types::{RawTrackItem, TracksPage},
};

/// Items requested per page.
pub const PAGE_SIZE: u64 = 50;

/// Upper bound on requests for one playlist, whatever the pages claim.
pub const MAX_PAGES: usize = 1_000;

/// Position of the next page to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Server supplied `next` URL.
    Url(String),
    /// Client computed offset.
    Offset(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Follow the `next` URL until it is null.
    Cursor,
    /// Advance the offset by the number of items received while `next` is
    /// set and fewer than `total` items have been collected.
    Offset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProgress {
    pub fetched: usize,
    pub total: Option<u64>,
}

/// Something that can serve pages of a single playlist.
#[async_trait]
pub trait PageSource: Send + Sync {
    fn pagination(&self) -> Pagination;

    /// `None` requests the first page.
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<TracksPage, AppError>;
}

/// Accumulated result of the pagination loop.
#[derive(Debug, Clone, Default)]
pub struct PlaylistFetchState {
    pub items: Vec<RawTrackItem>,
    pub cursor: Option<Cursor>,
    /// Taken from the first page and never revised.
    pub total: Option<u64>,
    pub pages: usize,
    /// Every `next` URL followed so far.
    pub visited: HashSet<String>,
}

impl PlaylistFetchState {
    pub fn progress(&self) -> FetchProgress {
        FetchProgress {
            fetched: self.items.len(),
            total: self.total,
        }
    }

    /// Appends a page and moves the cursor. Returns whether another page
    /// has to be requested.
    pub fn absorb(&mut self, page: TracksPage, pagination: Pagination) -> bool {
        if self.pages == 0 {
            self.total = page.total;
        }
        self.pages += 1;

        let received = page.items.len() as u64;
        self.items.extend(page.items);

        let Some(next) = page.next else {
            self.cursor = None;
            return false;
        };

        // A page claiming more data but carrying none would never advance.
        if received == 0 {
            self.cursor = None;
            return false;
        }

        if let Some(total) = self.total {
            if self.items.len() as u64 >= total {
                self.cursor = None;
                return false;
            }
        }

        if self.pages >= MAX_PAGES {
            self.cursor = None;
            return false;
        }

        match pagination {
            Pagination::Cursor => {
                // Any URL seen before means the chain is cyclic.
                if !self.visited.insert(next.clone()) {
                    self.cursor = None;
                    return false;
                }
                self.cursor = Some(Cursor::Url(next));
                true
            }
            Pagination::Offset => {
                if self.total.is_none() {
                    self.cursor = None;
                    return false;
                }
                let offset = match self.cursor {
                    Some(Cursor::Offset(offset)) => offset,
                    _ => 0,
                };
                self.cursor = Some(Cursor::Offset(offset + received));
                true
            }
        }
    }
}

/// Retrieves every item of the playlist, one page after the other.
///
/// `on_progress` is called after each page. Any page failure aborts the
/// whole fetch.
pub async fn fetch_all<P, F>(source: &P, mut on_progress: F) -> Result<Vec<RawTrackItem>, AppError>
where
    P: PageSource + ?Sized,
    F: FnMut(FetchProgress),
{
    let pagination = source.pagination();
    let mut state = PlaylistFetchState::default();

    loop {
        let page = source.fetch_page(state.cursor.as_ref()).await?;
        let more = state.absorb(page, pagination);
        on_progress(state.progress());

        if !more {
            break;
        }
    }

    Ok(state.items)
}

/// Talks to the Spotify Web API with the user's bearer token.
pub struct DirectSource {
    client: Client,
    api_url: String,
    playlist_id: String,
    access_token: String,
}

impl DirectSource {
    pub fn new(client: Client, api_url: &str, playlist_id: &str, access_token: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            playlist_id: playlist_id.to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn page_url(&self, offset: u64) -> String {
        format!(
            "{api}/playlists/{id}/tracks?limit={limit}&offset={offset}",
            api = self.api_url,
            id = self.playlist_id,
            limit = PAGE_SIZE,
        )
    }
}

#[async_trait]
impl PageSource for DirectSource {
    fn pagination(&self) -> Pagination {
        Pagination::Cursor
    }

    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<TracksPage, AppError> {
        let url = match cursor {
            None => self.page_url(0),
            Some(Cursor::Url(url)) => url.clone(),
            Some(Cursor::Offset(offset)) => self.page_url(*offset),
        };

        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        read_page(res).await
    }
}

/// Talks to the token proxy, which injects the credentials itself.
pub struct ProxySource {
    client: Client,
    endpoint: String,
    playlist_id: String,
}

impl ProxySource {
    pub fn new(client: Client, proxy_url: &str, playlist_id: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/playlist", proxy_url.trim_end_matches('/')),
            playlist_id: playlist_id.to_string(),
        }
    }
}

#[async_trait]
impl PageSource for ProxySource {
    fn pagination(&self) -> Pagination {
        Pagination::Offset
    }

    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<TracksPage, AppError> {
        let offset = match cursor {
            Some(Cursor::Offset(offset)) => *offset,
            _ => 0,
        };
        let offset = offset.to_string();

        let res = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("playlist_id", self.playlist_id.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await?;

        read_page(res).await
    }
}

async fn read_page(res: Response) -> Result<TracksPage, AppError> {
    let status = res.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::Unauthorized);
    }

    let body = res.text().await?;
    if !status.is_success() {
        return Err(AppError::Fetch(ErrorBody::parse(&body).describe(status)));
    }

    Ok(serde_json::from_str(&body)?)
}
