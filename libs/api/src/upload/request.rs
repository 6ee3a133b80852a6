use utoipa::ToSchema;

/// Multipart form accepted by `POST /api/upload`. Only used for the
/// OpenAPI document; the handler reads the stream directly.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
