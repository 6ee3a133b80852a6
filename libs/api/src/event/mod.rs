use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use entity::prelude::*;
use tracing::info;

pub mod request;
pub mod response;

use crate::{
    auth::Claims,
    response::{error_message, ApiResponse, ErrorResp, IntoApiResponse},
    ApiError, ApiState,
};

use self::{
    request::{CreateEventReq, UpdateEventReq},
    response::EventResp,
};

/// List all events
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "List all events successfully", body = [EventResp]),
        (status = 500, description = "Events file unreadable", body = ErrorResp)
    )
)]
pub async fn get_events(
    State(state): State<ApiState>,
) -> ApiResponse<Json<Vec<EventResp>>> {
    let events = state
        .repo
        .event
        .find_all()
        .await
        .into_response("500-001")?;

    Ok(Json(events.into_iter().map(EventResp::from).collect()))
}

/// Get an event
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    responses(
        (status = 200, description = "Get an event successfully", body = EventResp),
        (status = 404, description = "Event not found", body = ErrorResp)
    ),
    params(
        ("id" = String, Path, description = "event id"),
    )
)]
pub async fn get_event(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResponse<Json<EventResp>> {
    let event = state
        .repo
        .event
        .find_by_id(&id)
        .await
        .into_response("500-002")?;

    let Some(event) = event else {
        return Err(ApiError::NotFound(error_message("404-001")));
    };

    Ok(Json(EventResp::from(event)))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventReq,
    responses(
        (status = 201, description = "Created an event successfully", body = EventResp),
        (status = 400, description = "Title missing or malformed body", body = ErrorResp),
        (status = 401, description = "Token missing", body = ErrorResp),
        (status = 403, description = "Token invalid or expired", body = ErrorResp)
    ),
    security(("bearer" = []))
)]
pub async fn post_event(
    State(state): State<ApiState>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(body), _): WithRejection<Json<CreateEventReq>, ApiError>,
) -> ApiResponse<(StatusCode, Json<EventResp>)> {
    let new = NewEvent::try_from(body)?;

    let event = state.repo.event.save(new).await.into_response("500-003")?;

    info!(task = "create event", id = %event.id, username = %claims.username);
    Ok((StatusCode::CREATED, Json(EventResp::from(event))))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    request_body = UpdateEventReq,
    responses(
        (status = 200, description = "Updated an event successfully", body = EventResp),
        (status = 400, description = "Malformed body", body = ErrorResp),
        (status = 401, description = "Token missing", body = ErrorResp),
        (status = 403, description = "Token invalid or expired", body = ErrorResp),
        (status = 404, description = "Event not found", body = ErrorResp)
    ),
    params(
        ("id" = String, Path, description = "event id"),
    ),
    security(("bearer" = []))
)]
pub async fn put_event(
    State(state): State<ApiState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateEventReq>, ApiError>,
) -> ApiResponse<Json<EventResp>> {
    let event = state
        .repo
        .event
        .update(&id, EventPatch::from(body))
        .await
        .into_response("500-004")?;

    info!(task = "update event", id = %id, username = %claims.username);
    Ok(Json(EventResp::from(event)))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    responses(
        (status = 204, description = "Deleted an event successfully"),
        (status = 401, description = "Token missing", body = ErrorResp),
        (status = 403, description = "Token invalid or expired", body = ErrorResp),
        (status = 404, description = "Event not found", body = ErrorResp)
    ),
    params(
        ("id" = String, Path, description = "event id"),
    ),
    security(("bearer" = []))
)]
pub async fn delete_event(
    State(state): State<ApiState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResponse<StatusCode> {
    state
        .repo
        .event
        .delete(&id)
        .await
        .into_response("500-005")?;

    info!(task = "delete event", id = %id, username = %claims.username);
    Ok(StatusCode::NO_CONTENT)
}
