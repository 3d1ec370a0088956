#![allow(dead_code)]

use axum::Router;
use playlist_eras::{
    config::Settings,
    types::{ExternalUrls, RawAlbum, RawArtist, RawTrack, RawTrackItem},
};
use reqwest::Client;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Binds first so routes can embed their own base URL.
pub async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

pub fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

pub fn local_client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

pub fn settings_for(base: &str) -> Settings {
    Settings {
        client_id: Some("test-client".to_string()),
        client_secret: Some("test-secret".to_string()),
        auth_url: format!("{base}/authorize"),
        token_url: format!("{base}/api/token"),
        api_url: format!("{base}/v1"),
        ..Settings::default()
    }
}

pub fn item(name: &str, artists: &[&str], album: &str, release_date: Option<&str>) -> RawTrackItem {
    RawTrackItem {
        track: Some(RawTrack {
            name: Some(name.to_string()),
            artists: artists
                .iter()
                .map(|a| RawArtist {
                    id: Some(a.to_lowercase()),
                    name: Some(a.to_string()),
                })
                .collect(),
            album: Some(RawAlbum {
                name: Some(album.to_string()),
                release_date: release_date.map(str::to_string),
            }),
            external_urls: Some(ExternalUrls {
                spotify: Some(format!("https://open.spotify.com/track/{name}")),
            }),
        }),
    }
}

pub fn removed_item() -> RawTrackItem {
    RawTrackItem { track: None }
}
