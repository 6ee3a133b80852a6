use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;
use tokio::{
    fs,
    io::{AsyncWrite, AsyncWriteExt},
};
use tracing::{debug, warn};

use crate::{IntoResponse, RepositoryError, Response};

/// Uploaded files, stored flat under one public directory.
#[derive(Clone, Debug)]
pub struct MediaRepository {
    dir: Arc<PathBuf>,
    public_prefix: String,
}

impl MediaRepository {
    pub async fn open(dir: PathBuf, public_prefix: &str) -> Response<Self> {
        fs::create_dir_all(&dir)
            .await
            .into_response("in create uploads directory")?;

        Ok(Self {
            dir: Arc::new(dir),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_ref()
    }

    /// Stores `bytes` as `<millis>-<file name>` and returns the public path.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Response<String> {
        let name = sanitize_file_name(original_name);
        let mut millis = Utc::now().timestamp_millis();

        loop {
            let stored = format!("{millis}-{name}");
            let result = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&stored))
                .await;

            let file = match result {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    millis += 1;
                    continue;
                }
                Err(e) => {
                    return Err(RepositoryError::InIo {
                        message: format!("in create upload {stored}"),
                        source: e,
                    })
                }
            };

            write_or_remove(file, &self.dir.join(&stored), bytes).await?;

            debug!(task = "save upload", stored = %stored, size = bytes.len());
            return Ok(format!("{}/{}", self.public_prefix, stored));
        }
    }
}

/// Writes `bytes` into the freshly created `path`. A failed write removes
/// the partial file.
async fn write_or_remove<W: AsyncWrite + Unpin>(
    mut file: W,
    path: &Path,
    bytes: &[u8],
) -> Response<()> {
    let result = match file.write_all(bytes).await {
        Ok(()) => file.flush().await.into_response("in flush upload"),
        Err(e) => Err(e).into_response("in write upload"),
    };
    drop(file);

    if result.is_err() {
        if let Err(e) = fs::remove_file(path).await {
            warn!(task = "remove partial upload", path = %path.display(), err = %e);
        }
    }

    result
}

/// Reduces a client supplied file name to a single safe path component.
pub fn sanitize_file_name(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let sanitized: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        sanitized
    }
}
