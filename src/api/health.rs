use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::api::ProxyState;

fn status(role: &str) -> Value {
    json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "role": role,
        "version": env!("CARGO_PKG_VERSION")
    })
}

pub async fn health() -> Json<Value> {
    Json(status("callback"))
}

/// Also reports whether the proxy can perform the token exchange at all.
pub async fn proxy_health(Extension(state): Extension<ProxyState>) -> Json<Value> {
    let mut body = status("proxy");
    body["credentials"] = Value::Bool(state.settings.client_credentials().is_some());
    Json(body)
}
