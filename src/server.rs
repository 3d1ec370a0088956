use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
    task::JoinHandle,
};

use crate::{api, error::AppError, types::CallbackParams};

/// Hands the OAuth callback parameters to the waiting login exactly once.
pub type CallbackSender = Arc<Mutex<Option<oneshot::Sender<CallbackParams>>>>;

pub fn callback_router(sender: CallbackSender) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(sender)))
}

pub fn proxy_router(state: api::ProxyState) -> Router {
    Router::new()
        .route("/health", get(api::proxy_health))
        .route("/api/playlist", get(api::playlist))
        .layer(Extension(state))
}

/// Binds the callback listener and serves it in the background.
///
/// Binding happens before returning so a busy port is reported to the
/// caller instead of being lost in the spawned task.
pub async fn start_callback_server(
    addr: &str,
    sender: CallbackSender,
) -> Result<JoinHandle<()>, AppError> {
    let listener = bind(addr).await?;
    let app = callback_router(sender);

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            crate::warning!("Callback server stopped: {}", e);
        }
    }))
}

pub async fn serve_proxy(addr: &str, state: api::ProxyState) -> Result<(), AppError> {
    let listener = bind(addr).await?;
    axum::serve(listener, proxy_router(state)).await?;
    Ok(())
}

async fn bind(addr: &str) -> Result<TcpListener, AppError> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| AppError::Configuration(format!("invalid server address {addr}: {e}")))?;
    Ok(TcpListener::bind(&addr).await?)
}
