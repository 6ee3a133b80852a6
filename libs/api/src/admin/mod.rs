use axum::{extract::State, Extension, Json};
use chrono::{TimeZone, Utc};

pub mod response;

use crate::{
    auth::Claims,
    response::{ApiResponse, ErrorResp, IntoApiResponse},
    ApiState,
};

use self::response::{AdminInfo, AdminResp};

/// Check an admin token and report the panel status
#[utoipa::path(
    get,
    path = "/api/admin",
    responses(
        (status = 200, description = "Token accepted", body = AdminResp),
        (status = 401, description = "Token missing", body = ErrorResp),
        (status = 403, description = "Token invalid or expired", body = ErrorResp)
    ),
    security(("bearer" = []))
)]
pub async fn get_admin(
    State(state): State<ApiState>,
    Extension(claims): Extension<Claims>,
) -> ApiResponse<Json<AdminResp>> {
    let events = state
        .repo
        .event
        .find_all()
        .await
        .into_response("500-001")?;

    let token_expires_at = Utc
        .timestamp_opt(claims.exp, 0)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();

    Ok(Json(AdminResp {
        ok: true,
        message: "Admin panel active".to_string(),
        user: claims,
        info: AdminInfo {
            event_count: events.len(),
            token_expires_at,
        },
    }))
}
