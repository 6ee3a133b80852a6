use anyhow::Context;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::{ApiError, ApiState};

/// Claims carried by an admin token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies admin tokens (HS256).
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, username: &str) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("failed to encode token")
    }

    /// Checks signature and expiry. `exp` is enforced to the second.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .context("invalid token")?;

        Ok(token_data.claims)
    }
}

/// Rejects requests without a bearer token (401) or with a token that does
/// not verify (403). Verified claims are handed to the handler as an
/// extension.
pub async fn auth(
    State(state): State<ApiState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(ApiError::AuthError(
            "Authorization header is missing".to_string(),
        ));
    };

    let claims = state.tokens.verify(bearer.token()).map_err(|e| {
        debug!(task = "verify token", err = %e);
        ApiError::Forbidden("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
