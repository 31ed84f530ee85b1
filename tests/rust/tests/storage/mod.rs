//! Storage integration tests
//!
//! The file-backed store is what a real deployment uses; these tests drive
//! it through the same `Session` wrapper the client does.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;

use creatorpulse_client::Session;
use creatorpulse_core::UserId;
use creatorpulse_storage::FileSessionStore;

#[tokio::test]
async fn test_session_survives_process_restart() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");

    {
        let session = Session::new(Arc::new(FileSessionStore::new(&path)));
        session
            .store_login("IGQVJtoken", Some(&UserId::from("17841400000")))
            .await
            .unwrap();
    }

    // A fresh store over the same file sees the login
    let session = Session::new(Arc::new(FileSessionStore::new(&path)));
    assert!(session.is_logged_in().await);
    assert_eq!(
        session.access_token().await.unwrap(),
        Some("IGQVJtoken".to_string())
    );
    assert_eq!(
        session.user_id().await.unwrap(),
        Some("17841400000".to_string())
    );
}

#[tokio::test]
async fn test_logout_clears_the_file_backed_session() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");

    let session = Session::new(Arc::new(FileSessionStore::new(&path)));
    session.store_login("tok", None).await.unwrap();
    session.clear().await.unwrap();

    let reopened = Session::new(Arc::new(FileSessionStore::new(&path)));
    assert!(!reopened.is_logged_in().await);
}

#[tokio::test]
async fn test_missing_file_means_logged_out() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let session = Session::new(Arc::new(FileSessionStore::new(
        dir.path().join("never-written.json"),
    )));

    assert!(!session.is_logged_in().await);
}
