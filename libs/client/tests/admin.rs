mod common;

use client::{
    admin::{AdminSession, EventDraft, FormState, MediaFile, TOKEN_KEY},
    ClientError, LocalStore,
};
use axum::{http::StatusCode, routing::get, Json, Router};
use entity::prelude::*;
use serde_json::json;

use common::{listen, spawn, ADMIN_PASSWORD, ADMIN_USER};

async fn logged_in(server: &common::TestServer) -> AdminSession {
    let mut session =
        AdminSession::resume(server.client.clone(), LocalStore::memory())
            .await
            .unwrap();
    session.login(ADMIN_USER, ADMIN_PASSWORD).await.unwrap();
    session
}

#[tokio::test]
async fn test_login_persists_token_and_resume_verifies_it() {
    // Arrange
    let server = spawn().await;
    let path = server.dir.path().join("local.json");
    let mut session = AdminSession::resume(
        server.client.clone(),
        LocalStore::open(&path).await.unwrap(),
    )
    .await
    .unwrap();
    assert!(!session.is_logged_in());

    // Act
    session.login(ADMIN_USER, ADMIN_PASSWORD).await.unwrap();
    let resumed = AdminSession::resume(
        server.client.clone(),
        LocalStore::open(&path).await.unwrap(),
    )
    .await
    .unwrap();

    // Assert
    assert!(resumed.is_logged_in());
    assert_eq!(resumed.token(), session.token());
    assert!(resumed.error().is_none());
}

#[tokio::test]
async fn test_resume_with_failing_list_ends_session() {
    // Arrange
    let router = Router::new()
        .route(
            "/api/admin",
            get(|| async {
                Json(json!({
                    "ok": true,
                    "message": "Admin panel active",
                    "user": { "username": ADMIN_USER, "iat": 0, "exp": 0 },
                    "info": { "eventCount": 0, "tokenExpiresAt": "" }
                }))
            }),
        )
        .route(
            "/api/events",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error." })),
                )
            }),
        );
    let client = listen(router).await;
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("local.json");
    let mut store = LocalStore::open(&path).await.unwrap();
    store.set(TOKEN_KEY, "valid-token").await.unwrap();

    // Act
    let session = AdminSession::resume(client, store).await.unwrap();

    // Assert
    assert!(!session.is_logged_in());
    assert!(session.events().is_empty());
    assert_eq!(session.error(), Some("No se pudieron cargar los eventos."));
    let reopened = LocalStore::open(&path).await.unwrap();
    assert_eq!(reopened.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn test_resume_drops_a_rejected_token() {
    let server = spawn().await;
    let path = server.dir.path().join("local.json");
    let mut store = LocalStore::open(&path).await.unwrap();
    store.set(TOKEN_KEY, "stale-token").await.unwrap();

    let session = AdminSession::resume(server.client.clone(), store)
        .await
        .unwrap();

    assert!(!session.is_logged_in());
    assert!(session.error().is_some());
    let reopened = LocalStore::open(&path).await.unwrap();
    assert_eq!(reopened.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let server = spawn().await;
    let mut session =
        AdminSession::resume(server.client.clone(), LocalStore::memory())
            .await
            .unwrap();

    let result = session.login(ADMIN_USER, "wrong").await;

    assert!(matches!(result, Err(ClientError::Api { status: 401, .. })));
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_create_uploads_media_in_order() {
    // Arrange
    let server = spawn().await;
    let mut session = logged_in(&server).await;
    session.open_new();

    // Act
    let saved = session
        .submit(EventDraft {
            title: "Concierto".to_string(),
            description: "Live coding".to_string(),
            cover_image: Some(MediaFile::new("cover.jpg", b"cover".to_vec())),
            images: vec![
                MediaFile::new("a.jpg", b"a".to_vec()),
                MediaFile::new("b.jpg", b"b".to_vec()),
            ],
            pdfs: vec![MediaFile::new("score.pdf", b"pdf".to_vec())],
            ..Default::default()
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(session.form(), &FormState::Closed);
    assert_eq!(session.events(), &[saved.clone()]);

    let cover = saved.cover_image.clone().unwrap();
    assert!(cover.src.ends_with("-cover.jpg"));
    assert_eq!(cover.alt, "Concierto");
    assert_eq!(saved.images.len(), 2);
    assert!(saved.images[0].src.ends_with("-a.jpg"));
    assert!(saved.images[1].src.ends_with("-b.jpg"));
    assert!(saved.images.iter().all(|i| i.alt == "Concierto"));
    assert!(saved.pdfs[0].src.ends_with("-score.pdf"));
    assert!(saved.videos.is_empty());
    assert!(saved.files.is_empty());

    let stored = cover.src.trim_start_matches("/uploads/");
    let bytes =
        std::fs::read(server.dir.path().join("uploads").join(stored)).unwrap();
    assert_eq!(bytes, b"cover");
}

#[tokio::test]
async fn test_edit_keeps_existing_media() {
    // Arrange
    let server = spawn().await;
    let mut session = logged_in(&server).await;
    session.open_new();
    let created = session
        .submit(EventDraft {
            title: "Old".to_string(),
            images: vec![MediaFile::new("a.jpg", b"a".to_vec())],
            ..Default::default()
        })
        .await
        .unwrap();

    // Act
    assert!(session.open_edit(&created.id));
    let updated = session
        .submit(EventDraft {
            title: "New".to_string(),
            description: "D".to_string(),
            images: vec![MediaFile::new("b.jpg", b"b".to_vec())],
            ..Default::default()
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "New");
    assert_eq!(updated.images.len(), 2);
    assert_eq!(updated.images[0].src, created.images[0].src);
    assert!(updated.images.iter().all(|i| i.alt == "New"));
    assert_eq!(session.events().len(), 1);
    assert_eq!(session.form(), &FormState::Closed);
}

#[tokio::test]
async fn test_list_is_newest_first_and_delete_refreshes() {
    let server = spawn().await;
    let mut session = logged_in(&server).await;
    for title in ["first", "second"] {
        session.open_new();
        session
            .submit(EventDraft {
                title: title.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let titles: Vec<_> = session.events().iter().map(|e| e.title.clone()).collect();
    assert_eq!(titles, vec!["second", "first"]);

    let id = session.events()[0].id.clone();
    session.delete(&id).await.unwrap();

    let remaining: Vec<Event> = server.client.list_events().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(session.events(), remaining.as_slice());
}

#[tokio::test]
async fn test_delete_missing_event_keeps_session() {
    let server = spawn().await;
    let mut session = logged_in(&server).await;

    let result = session.delete("0").await;

    assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));
    assert!(session.is_logged_in());
    assert_eq!(session.error(), Some("API error (404): Event not found."));
}
