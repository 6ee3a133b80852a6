use entity::prelude::*;
use reqwest::{
    multipart::{Form, Part},
    RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::ClientError;

/// Body sent by the admin panel when creating or replacing an event.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaItem>,
    pub images: Vec<MediaItem>,
    pub videos: Vec<MediaItem>,
    pub pdfs: Vec<MediaItem>,
    pub files: Vec<MediaItem>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AdminStatus {
    pub ok: bool,
    pub message: String,
    pub user: AdminUser,
    pub info: AdminInfo,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AdminUser {
    pub username: String,
    pub exp: i64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub event_count: usize,
    pub token_expires_at: String,
}

#[derive(Deserialize)]
struct LoginResp {
    token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResp {
    file_path: String,
}

#[derive(Deserialize)]
struct ErrorResp {
    error: String,
}

#[derive(Clone, Debug)]
pub struct Client {
    api_base: String,
    asset_origin: String,
    http: reqwest::Client,
}

impl Client {
    /// `origin` is the service root, e.g. `http://localhost:3001`. Media is
    /// fetched from the same origin unless [`Client::with_asset_origin`]
    /// says otherwise.
    pub fn new(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');

        Self {
            api_base: format!("{origin}/api"),
            asset_origin: origin.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_asset_origin(mut self, origin: &str) -> Self {
        self.asset_origin = origin.trim_end_matches('/').to_string();
        self
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, leading_slash(path))
    }

    /// Absolute URL for a stored media `src`. Absolute sources pass through.
    pub fn asset_url(&self, src: &str) -> String {
        if src.is_empty()
            || src.starts_with("http://")
            || src.starts_with("https://")
        {
            return src.to_string();
        }

        format!("{}{}", self.asset_origin, leading_slash(src))
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let request = self
            .http
            .post(self.api_url("/login"))
            .json(&json!({ "username": username, "password": password }));

        let resp: LoginResp = self.send(request).await?;
        Ok(resp.token)
    }

    pub async fn verify_admin(
        &self,
        token: &str,
    ) -> Result<AdminStatus, ClientError> {
        let request = self.http.get(self.api_url("/admin")).bearer_auth(token);

        self.send(request).await
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.send(self.http.get(self.api_url("/events"))).await
    }

    pub async fn create_event(
        &self,
        token: &str,
        payload: &EventPayload,
    ) -> Result<Event, ClientError> {
        let request = self
            .http
            .post(self.api_url("/events"))
            .bearer_auth(token)
            .json(payload);

        self.send(request).await
    }

    pub async fn update_event(
        &self,
        token: &str,
        id: &str,
        payload: &EventPayload,
    ) -> Result<Event, ClientError> {
        let request = self
            .http
            .put(self.api_url(&format!("/events/{id}")))
            .bearer_auth(token)
            .json(payload);

        self.send(request).await
    }

    pub async fn delete_event(
        &self,
        token: &str,
        id: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.api_url(&format!("/events/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT
            || response.status() == StatusCode::OK
        {
            return Ok(());
        }

        Err(api_error(response).await)
    }

    /// Uploads one file and returns its public path (`/uploads/...`).
    pub async fn upload(
        &self,
        token: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ClientError> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let request = self
            .http
            .post(self.api_url("/upload"))
            .bearer_auth(token)
            .multipart(form);

        let resp: UploadResp = self.send(request).await?;
        debug!(task = "upload", file_path = %resp.file_path);
        Ok(resp.file_path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;

        if response.status().is_success() {
            return Ok(response.json().await?);
        }

        Err(api_error(response).await)
    }
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorResp>(&text)
        .map(|e| e.error)
        .unwrap_or(text);

    ClientError::Api { status, message }
}

fn leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
