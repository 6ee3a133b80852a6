use axum::http::{header, request::Parts, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::config::Cors;

pub fn layer(config: &Cors) -> CorsLayer {
    info!(
        task = "configure cors",
        origins = ?config.allowed_origins,
        allow_localhost = config.allow_localhost
    );

    let allowed_origins = config.allowed_origins.clone();
    let allow_localhost = config.allow_localhost;

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _: &Parts| {
                let Ok(origin) = origin.to_str() else {
                    return false;
                };
                allowed_origins.iter().any(|o| o == origin)
                    || (allow_localhost && is_localhost(origin))
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Whether `origin` (`scheme://host[:port]`) points at the local machine.
pub fn is_localhost(origin: &str) -> bool {
    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };

    let host = if rest.starts_with('[') {
        match rest.find(']') {
            Some(end) => &rest[..=end],
            None => return false,
        }
    } else {
        rest.split(':').next().unwrap_or_default()
    };
    let after_host = &rest[host.len()..];

    let port_ok = after_host.is_empty()
        || after_host
            .strip_prefix(':')
            .is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));

    matches!(host, "localhost" | "127.0.0.1" | "[::1]") && port_ok
}
