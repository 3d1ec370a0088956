use crate::{
    config::Settings,
    error,
    management::{AuthPhase, FileStore},
    spotify::{self, auth::Authenticator},
    success, warning,
};

pub async fn auth(settings: &Settings) {
    let mut authenticator = Authenticator::new(settings.clone(), FileStore::default_location());

    match authenticator.restore().await {
        Ok(AuthPhase::Authenticated) => {
            warning!("Already logged in, replacing the stored token.")
        }
        Ok(_) => {}
        Err(e) => warning!("Cannot read the stored session: {}", e),
    }

    match spotify::auth::login(&mut authenticator).await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed: {}", e),
    }
}

pub async fn logout() {
    let store = FileStore::default_location();
    let session = crate::management::SessionManager::new(store);

    match session.clear_all().await {
        Ok(_) => success!("Stored session removed."),
        Err(e) => error!("Cannot remove the stored session: {}", e),
    }
}
