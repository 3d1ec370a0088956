use playlist_eras::management::{
    AuthPhase, AuthSession, FileStore, KeyValueStore, MemoryStore, SessionManager,
};

#[tokio::test]
async fn test_file_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/cache/session.json");
    let store = FileStore::new(path.clone());

    assert_eq!(store.get("access_token").await.unwrap(), None);

    store.set("access_token", "token-1").await.unwrap();
    store.set("oauth_state", "state-1").await.unwrap();
    assert!(path.is_file());

    // a second handle sees the persisted values
    let reopened = FileStore::new(path.clone());
    assert_eq!(
        reopened.get("access_token").await.unwrap().as_deref(),
        Some("token-1")
    );

    reopened.remove("access_token").await.unwrap();
    assert_eq!(store.get("access_token").await.unwrap(), None);
    assert_eq!(store.get("oauth_state").await.unwrap().as_deref(), Some("state-1"));

    // removing a missing key is a no-op
    reopened.remove("access_token").await.unwrap();
}

#[tokio::test]
async fn test_file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(path);
    assert!(store.get("access_token").await.is_err());
}

#[tokio::test]
async fn test_session_lifecycle() {
    let session = SessionManager::new(MemoryStore::new());
    assert_eq!(session.load().await.unwrap(), AuthSession::default());
    assert_eq!(session.load().await.unwrap().phase(), AuthPhase::Unauthenticated);

    session.save_pending("state", "verifier").await.unwrap();
    let pending = session.load().await.unwrap();
    assert_eq!(pending.state.as_deref(), Some("state"));
    assert_eq!(pending.code_verifier.as_deref(), Some("verifier"));
    assert_eq!(pending.phase(), AuthPhase::AwaitingCallback);

    session.save_token("token").await.unwrap();
    let authenticated = session.load().await.unwrap();
    assert_eq!(
        authenticated,
        AuthSession {
            state: None,
            code_verifier: None,
            access_token: Some("token".to_string()),
        }
    );
    assert_eq!(authenticated.phase(), AuthPhase::Authenticated);

    session.clear_token().await.unwrap();
    assert_eq!(session.load().await.unwrap().phase(), AuthPhase::Unauthenticated);
}

#[tokio::test]
async fn test_empty_token_counts_as_missing() {
    let store = MemoryStore::new();
    store.set("access_token", "").await.unwrap();
    let session = SessionManager::new(store);

    assert_eq!(session.access_token().await.unwrap(), None);
}

#[tokio::test]
async fn test_clear_all_removes_every_key() {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionManager::new(FileStore::new(dir.path().join("session.json")));

    session.save_pending("state", "verifier").await.unwrap();
    session.store().set("access_token", "token").await.unwrap();
    session.clear_all().await.unwrap();

    assert_eq!(session.load().await.unwrap(), AuthSession::default());
}
