#![allow(dead_code)]

use api::Config;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use toml::{map::Map, Value as TomlValue};
use tower::ServiceExt;

pub const ADMIN_USER: &str = "api-test-admin";
pub const ADMIN_PASSWORD: &str = "api-test-password";
pub const JWT_SECRET: &str = "api-test-secret";

pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

pub fn config(dir: &TempDir) -> Config {
    let config: Map<String, TomlValue> = toml::from_str(&format!(
        r#"
        [storage]
        events_file = '{}'
        uploads_dir = '{}'

        [cors]
        allowed_origins = ["https://sdcarr.netlify.app"]
        "#,
        dir.path().join("data").join("db.json").display(),
        dir.path().join("uploads").display(),
    ))
    .unwrap();
    let secrets: Map<String, TomlValue> = toml::from_str(&format!(
        r#"
        JWT_SECRET = "{JWT_SECRET}"
        ADMIN_USER = "{ADMIN_USER}"
        ADMIN_PASSWORD = "{ADMIN_PASSWORD}"
        "#,
    ))
    .unwrap();

    Config::from_tables(&config, &secrets).unwrap()
}

pub async fn setup() -> TestApp {
    let dir = TempDir::new().unwrap();
    let router = api::serve(config(&dir)).await.unwrap();

    TestApp { router, dir }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    pub async fn login(&self) -> String {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/api/login",
                None,
                json!({ "username": ADMIN_USER, "password": ADMIN_PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);

        body["token"].as_str().unwrap().to_string()
    }

    pub async fn create(&self, token: &str, event: Value) -> Value {
        let (status, body) = self
            .send(json_request(Method::POST, "/api/events", Some(token), event))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        body
    }

    pub async fn list(&self) -> Vec<Value> {
        let (status, body) = self.send(get("/api/events", None)).await;
        assert_eq!(status, StatusCode::OK);

        body.as_array().unwrap().clone()
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::DELETE, uri, token)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Request<Body> {
    raw_json_request(method, uri, token, &body.to_string())
}

pub fn raw_json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: &str,
) -> Request<Body> {
    request(method, uri, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn multipart_request(
    token: Option<&str>,
    field: &str,
    file_name: &str,
    content: &[u8],
) -> Request<Body> {
    let boundary = "portfolio-test-boundary";
    let mut body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    request(Method::POST, "/api/upload", token)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);

    match token {
        Some(token) => {
            builder.header(header::AUTHORIZATION, format!("Bearer {token}"))
        }
        None => builder,
    }
}
