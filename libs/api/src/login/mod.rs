use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use tracing::{info, warn};

pub mod request;
pub mod response;

use crate::{
    response::{error_message, ApiResponse, ErrorResp, IntoApiResponse},
    ApiError, ApiState,
};

use self::{request::LoginReq, response::LoginResp};

/// Exchange the admin credential for a bearer token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Logged in successfully", body = LoginResp),
        (status = 400, description = "Malformed body", body = ErrorResp),
        (status = 401, description = "Invalid credentials", body = ErrorResp)
    )
)]
pub async fn post_login(
    State(state): State<ApiState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginReq>, ApiError>,
) -> ApiResponse<Json<LoginResp>> {
    if !state.config.auth.admin.verify(&body.username, &body.password) {
        warn!(task = "login", username = %body.username, "rejected");
        return Err(ApiError::AuthError(error_message("401-001")));
    }

    let token = state
        .tokens
        .issue(&body.username)
        .into_response("500-007")?;

    info!(task = "login", username = %body.username);
    Ok(Json(LoginResp { token }))
}
