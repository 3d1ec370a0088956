use crate::{api::ProxyState, config::Settings, error, info, server, warning};

pub async fn proxy(settings: &Settings) {
    if settings.client_credentials().is_none() {
        warning!(
            "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET are not both set, every request will fail."
        );
    }

    info!(
        "Serving the playlist proxy on http://{}/api/playlist",
        settings.proxy_addr
    );

    if let Err(e) = server::serve_proxy(&settings.proxy_addr, ProxyState::new(settings.clone())).await
    {
        error!("Proxy server failed: {}", e);
    }
}
