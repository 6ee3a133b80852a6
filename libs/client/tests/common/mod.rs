#![allow(dead_code)]

use axum::Router;
use client::Client;
use tempfile::TempDir;
use tokio::net::TcpListener;
use toml::{map::Map, Value};

pub const ADMIN_USER: &str = "client-test-admin";
pub const ADMIN_PASSWORD: &str = "client-test-password";

pub struct TestServer {
    pub client: Client,
    pub dir: TempDir,
}

/// Starts the real API on an ephemeral port backed by a temporary
/// directory.
pub async fn spawn() -> TestServer {
    let dir = TempDir::new().unwrap();

    let config: Map<String, Value> = toml::from_str(&format!(
        r#"
        [storage]
        events_file = '{}'
        uploads_dir = '{}'
        "#,
        dir.path().join("db.json").display(),
        dir.path().join("uploads").display(),
    ))
    .unwrap();
    let secrets: Map<String, Value> = toml::from_str(&format!(
        r#"
        JWT_SECRET = "client-test-secret"
        ADMIN_USER = "{ADMIN_USER}"
        ADMIN_PASSWORD = "{ADMIN_PASSWORD}"
        "#,
    ))
    .unwrap();
    let config = api::Config::from_tables(&config, &secrets).unwrap();

    let router = api::serve(config).await.unwrap();

    TestServer {
        client: listen(router).await,
        dir,
    }
}

/// Serves `router` on an ephemeral port and returns a client pointed at it.
pub async fn listen(router: Router) -> Client {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Client::new(&format!("http://{address}"))
}
