use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use repository::{init_repository, Repository};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::auth::TokenIssuer;

pub mod admin;
pub mod auth;
pub mod config;
mod cors;
pub mod event;
mod healthz;
pub mod login;
mod not_found;
mod response;
pub mod upload;

pub use config::Config;

/// Public URL prefix under which uploaded media is served.
pub const UPLOADS_PATH: &str = "/uploads";

#[derive(Debug)]
pub enum ApiError {
    AuthError(String),
    Forbidden(String),
    ClientError(String),
    NotFound(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    repo: Repository,
    tokens: Arc<TokenIssuer>,
    config: Arc<Config>,
}

impl ApiState {
    pub fn new(repo: Repository, config: Config) -> Self {
        let tokens =
            TokenIssuer::new(&config.auth.jwt_secret, config.auth.token_ttl);

        Self {
            repo,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        login::post_login,
        event::get_events,
        event::get_event,
        event::post_event,
        event::put_event,
        event::delete_event,
        upload::post_upload,
        admin::get_admin,
    ),
    components(schemas(
        login::request::LoginReq,
        login::response::LoginResp,
        event::request::MediaItemReq,
        event::request::CreateEventReq,
        event::request::UpdateEventReq,
        event::response::MediaItemResp,
        event::response::EventResp,
        upload::request::UploadForm,
        upload::response::UploadResp,
        admin::response::AdminResp,
        admin::response::AdminInfo,
        auth::Claims,
        response::ErrorResp,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "portfolio", description = "Portfolio events API")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

async fn get_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Opens the storage named by `config` and builds the application router.
pub async fn serve(config: Config) -> anyhow::Result<Router> {
    info!(task = "start api serving");

    let repository = init_repository(
        config.storage.events_file.clone(),
        config.storage.uploads_dir.clone(),
        UPLOADS_PATH,
    )
    .await
    .context("failed to open storage")?;

    Ok(router(ApiState::new(repository, config)))
}

pub fn router(state: ApiState) -> Router {
    // anonymous
    let public_router = Router::new()
        .route("/login", post(login::post_login))
        .route("/events", get(event::get_events))
        .route("/events/:id", get(event::get_event));

    // bearer token required
    let admin_router = Router::new()
        .route("/events", post(event::post_event))
        .route(
            "/events/:id",
            put(event::put_event).delete(event::delete_event),
        )
        .route(
            "/upload",
            post(upload::post_upload)
                .layer(DefaultBodyLimit::max(state.config.upload.max_bytes)),
        )
        .route("/admin", get(admin::get_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::auth));

    let api_router = public_router
        .merge(admin_router)
        .fallback(not_found::get_404)
        .with_state(state.clone());

    Router::new()
        .route("/healthz", get(healthz::get_health))
        .route("/api-docs/openapi.json", get(get_openapi))
        .nest("/api", api_router)
        .nest_service(UPLOADS_PATH, ServeDir::new(state.repo.media.dir()))
        .fallback(not_found::get_404)
        .layer(cors::layer(&state.config.cors))
        .layer(TraceLayer::new_for_http())
}
