pub mod event;
pub mod media;

pub mod prelude {
    pub use crate::event::{Event, EventPatch, NewEvent};
    pub use crate::media::MediaItem;
}
