use serde::{Deserialize, Serialize};

/// A reference to an uploaded file, as stored on an event.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl MediaItem {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}
