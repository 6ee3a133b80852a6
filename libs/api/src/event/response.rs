use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct MediaItemResp {
    pub src: String,
    pub alt: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResp {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaItemResp>,
    pub images: Vec<MediaItemResp>,
    pub videos: Vec<MediaItemResp>,
    pub pdfs: Vec<MediaItemResp>,
    pub files: Vec<MediaItemResp>,
}

impl From<MediaItem> for MediaItemResp {
    fn from(value: MediaItem) -> Self {
        Self {
            src: value.src,
            alt: value.alt,
        }
    }
}

fn media_list(items: Vec<MediaItem>) -> Vec<MediaItemResp> {
    items.into_iter().map(MediaItemResp::from).collect()
}

impl From<Event> for EventResp {
    fn from(value: Event) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            cover_image: value.cover_image.map(MediaItemResp::from),
            images: media_list(value.images),
            videos: media_list(value.videos),
            pdfs: media_list(value.pdfs),
            files: media_list(value.files),
        }
    }
}
