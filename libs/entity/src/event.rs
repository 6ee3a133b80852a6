use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::media::MediaItem;

/// A portfolio event as persisted in the events file.
///
/// Older records may lack some of the media lists; they deserialize as empty.
/// Keys this type does not know about are kept in `extra` so that rewriting
/// the file never drops them.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<MediaItem>,
    #[serde(default)]
    pub images: Vec<MediaItem>,
    #[serde(default)]
    pub videos: Vec<MediaItem>,
    #[serde(default)]
    pub pdfs: Vec<MediaItem>,
    #[serde(default)]
    pub files: Vec<MediaItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields of an event about to be created. The id is assigned by the store.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub cover_image: Option<MediaItem>,
    pub images: Vec<MediaItem>,
    pub videos: Vec<MediaItem>,
    pub pdfs: Vec<MediaItem>,
    pub files: Vec<MediaItem>,
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<MediaItem>,
    pub images: Option<Vec<MediaItem>>,
    pub videos: Option<Vec<MediaItem>>,
    pub pdfs: Option<Vec<MediaItem>>,
    pub files: Option<Vec<MediaItem>>,
}

impl Event {
    pub fn new(id: String, new: NewEvent) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            cover_image: new.cover_image,
            images: new.images,
            videos: new.videos,
            pdfs: new.pdfs,
            files: new.files,
            extra: Map::new(),
        }
    }

    /// Shallow-merges `patch` into the event.
    ///
    /// Empty strings count as unspecified. Lists are replaced whenever they
    /// are present, so an empty list clears a gallery.
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        if let Some(description) = patch.description.filter(|d| !d.is_empty()) {
            self.description = description;
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = Some(cover_image);
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(videos) = patch.videos {
            self.videos = videos;
        }
        if let Some(pdfs) = patch.pdfs {
            self.pdfs = pdfs;
        }
        if let Some(files) = patch.files {
            self.files = files;
        }
    }
}
