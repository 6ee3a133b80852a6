use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use tracing::{info, warn};

pub mod request;
pub mod response;

use crate::{
    auth::Claims,
    response::{error_message, ApiResponse, ErrorResp, IntoApiResponse},
    ApiError, ApiState,
};

use self::{request::UploadForm, response::UploadResp};

pub const FILE_FIELD: &str = "file";

/// Upload one media file
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored the file successfully", body = UploadResp),
        (status = 400, description = "No file in the form", body = ErrorResp),
        (status = 401, description = "Token missing", body = ErrorResp),
        (status = 403, description = "Token invalid or expired", body = ErrorResp)
    ),
    security(("bearer" = []))
)]
pub async fn post_upload(
    State(state): State<ApiState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> ApiResponse<Json<UploadResp>> {
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            warn!(task = "read multipart", err = %e);
            ApiError::ClientError(error_message("400-003"))
        })?;

        let Some(field) = field else {
            return Err(ApiError::ClientError(error_message("400-002")));
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| {
            warn!(task = "read multipart", err = %e);
            ApiError::ClientError(error_message("400-003"))
        })?;

        let file_path = state
            .repo
            .media
            .save(&file_name, &bytes)
            .await
            .into_response("500-006")?;

        info!(
            task = "upload",
            file_path = %file_path,
            size = bytes.len(),
            username = %claims.username
        );
        return Ok(Json(UploadResp { file_path }));
    }
}
