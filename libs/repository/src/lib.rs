use std::path::PathBuf;

use event::EventRepository;
use media::MediaRepository;

pub mod event;
pub mod media;

#[derive(Clone, Debug)]
pub struct Repository {
    pub event: EventRepository,
    pub media: MediaRepository,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("in file operation: {}: {}", message, source)]
    InIo {
        message: String,
        source: std::io::Error,
    },

    #[error("in serde_json while handling the events file: {}: {}", message, source)]
    InSerdeJson {
        message: String,
        source: serde_json::Error,
    },

    #[error("event not found: {0}")]
    NotFound(String),
}

pub type Response<T> = Result<T, RepositoryError>;

pub trait IntoResponse<T> {
    fn into_response(self, message: &str) -> Response<T>;
}

impl<T> IntoResponse<T> for Result<T, std::io::Error> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| RepositoryError::InIo {
            message: message.to_string(),
            source: e,
        })
    }
}

impl<T> IntoResponse<T> for Result<T, serde_json::Error> {
    fn into_response(self, message: &str) -> Response<T> {
        self.map_err(|e| RepositoryError::InSerdeJson {
            message: message.to_string(),
            source: e,
        })
    }
}

/// Opens the events file and the uploads directory, creating them when
/// they do not exist yet.
pub async fn init_repository(
    events_file: impl Into<PathBuf>,
    uploads_dir: impl Into<PathBuf>,
    public_prefix: &str,
) -> Response<Repository> {
    let repository = Repository {
        event: EventRepository::open(events_file.into()).await?,
        media: MediaRepository::open(uploads_dir.into(), public_prefix)
            .await?,
    };

    Ok(repository)
}
