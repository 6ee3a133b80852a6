use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Claims;

#[derive(Serialize, ToSchema)]
pub struct AdminResp {
    pub ok: bool,
    pub message: String,
    pub user: Claims,
    pub info: AdminInfo,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub event_count: usize,
    pub token_expires_at: String,
}
