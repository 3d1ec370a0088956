use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One page of `GET /playlists/{id}/tracks`.
///
/// Every field is optional on the wire: a page without `next` and `total`
/// is still a valid, final page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<RawTrackItem>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// A playlist entry. `track` is null for removed or unavailable tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrackItem {
    #[serde(default)]
    pub track: Option<RawTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    #[serde(default)]
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// `GET /artists?ids=..`. Unknown ids come back as `null` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistsResponse {
    #[serde(default)]
    pub artists: Vec<Option<FullArtist>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullArtist {
    pub id: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Successful response of the token endpoint, for both grant types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Query string the OAuth provider appends to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "Year")]
    pub year: i32,
    #[tabled(rename = "Song Name")]
    pub name: String,
    #[tabled(rename = "Author")]
    pub artist: String,
    #[tabled(rename = "Album")]
    pub album: String,
    #[tabled(rename = "Decade")]
    pub decade: String,
}
