use axum::{Extension, extract::Query, response::Html};

use crate::{server::CallbackSender, types::CallbackParams};

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(sender): Extension<CallbackSender>,
) -> Html<&'static str> {
    let Some(tx) = sender.lock().await.take() else {
        return Html("<h4>No login is pending.</h4>");
    };

    let page = if params.error.is_some() {
        Html("<h4>Login failed.</h4><p>Return to the terminal for details.</p>")
    } else if params.code.is_some() {
        Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
    } else {
        Html("<h4>Missing authorization code.</h4>")
    };

    // The login may have timed out already; nothing is waiting then.
    let _ = tx.send(params);
    page
}
