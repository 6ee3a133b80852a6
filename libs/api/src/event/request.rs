use entity::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{response::error_message, ApiError};

#[derive(Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct MediaItemReq {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// Body of `POST /api/events`. Media lists left out default to empty.
#[derive(Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventReq {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<MediaItemReq>,
    pub images: Option<Vec<MediaItemReq>>,
    pub videos: Option<Vec<MediaItemReq>>,
    pub pdfs: Option<Vec<MediaItemReq>>,
    pub files: Option<Vec<MediaItemReq>>,
}

/// Body of `PUT /api/events/{id}`. Absent, `null` and empty-string fields
/// keep their stored value.
#[derive(Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventReq {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<MediaItemReq>,
    pub images: Option<Vec<MediaItemReq>>,
    pub videos: Option<Vec<MediaItemReq>>,
    pub pdfs: Option<Vec<MediaItemReq>>,
    pub files: Option<Vec<MediaItemReq>>,
}

impl From<MediaItemReq> for MediaItem {
    fn from(value: MediaItemReq) -> Self {
        Self {
            src: value.src,
            alt: value.alt,
        }
    }
}

fn media_list(items: Option<Vec<MediaItemReq>>) -> Option<Vec<MediaItem>> {
    items.map(|items| items.into_iter().map(MediaItem::from).collect())
}

impl TryFrom<CreateEventReq> for NewEvent {
    type Error = ApiError;

    fn try_from(value: CreateEventReq) -> Result<Self, Self::Error> {
        let Some(title) = value.title.filter(|t| !t.trim().is_empty()) else {
            return Err(ApiError::ClientError(error_message("400-001")));
        };

        Ok(Self {
            title,
            description: value.description.unwrap_or_default(),
            cover_image: value.cover_image.map(MediaItem::from),
            images: media_list(value.images).unwrap_or_default(),
            videos: media_list(value.videos).unwrap_or_default(),
            pdfs: media_list(value.pdfs).unwrap_or_default(),
            files: media_list(value.files).unwrap_or_default(),
        })
    }
}

impl From<UpdateEventReq> for EventPatch {
    fn from(value: UpdateEventReq) -> Self {
        Self {
            title: value.title,
            description: value.description,
            cover_image: value.cover_image.map(MediaItem::from),
            images: media_list(value.images),
            videos: media_list(value.videos),
            pdfs: media_list(value.pdfs),
            files: media_list(value.files),
        }
    }
}
