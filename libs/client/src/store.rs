use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::ClientError;

/// Small string key/value store kept in one JSON file, the client-side
/// counterpart of browser local storage. A store without a path lives in
/// memory only.
#[derive(Debug, Default, Clone)]
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    pub fn memory() -> Self {
        Self::default()
    }

    /// Opens the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();

        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ClientError::InSerdeJson {
                    message: format!("in parse {}", path.display()),
                    source: e,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                BTreeMap::new()
            }
            Err(e) => {
                return Err(ClientError::InStore {
                    message: format!("in read {}", path.display()),
                    source: e,
                })
            }
        };

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub async fn set(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.entries.insert(key.to_string(), value.into());
        self.persist().await
    }

    pub async fn remove(&mut self, key: &str) -> Result<(), ClientError> {
        if self.entries.remove(key).is_some() {
            self.persist().await?;
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(&self.entries).map_err(|e| {
            ClientError::InSerdeJson {
                message: "in serialize local store".to_string(),
                source: e,
            }
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ClientError::InStore {
                    message: format!("in create {}", parent.display()),
                    source: e,
                }
            })?;
        }

        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| ClientError::InStore {
                message: format!("in write {}", path.display()),
                source: e,
            })
    }
}
