use std::{path::PathBuf, sync::Arc};

use chrono::Utc;
use entity::prelude::*;
use tokio::{fs, sync::Mutex};
use tracing::{debug, info};

use crate::{IntoResponse, RepositoryError, Response};

/// The event collection, kept as one JSON array in one file.
///
/// Every mutation reads the whole file, changes it in memory and replaces
/// the file. The mutex serializes those cycles within the process, and the
/// replacement goes through a sibling temporary file and a rename so readers
/// never observe a half-written array.
#[derive(Clone, Debug)]
pub struct EventRepository {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl EventRepository {
    pub async fn open(path: PathBuf) -> Response<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)
                .await
                .into_response("in create events directory")?;
        }

        let exists = fs::try_exists(&path)
            .await
            .into_response("in check events file")?;
        if !exists {
            info!(task = "create events file", path = %path.display());
            fs::write(&path, b"[]")
                .await
                .into_response("in create events file")?;
        }

        Ok(Self {
            path: Arc::new(path),
            lock: Arc::new(Mutex::new(())),
        })
    }
}

impl EventRepository {
    pub async fn find_all(&self) -> Response<Vec<Event>> {
        self.read().await
    }

    pub async fn find_by_id(&self, id: &str) -> Response<Option<Event>> {
        let events = self.read().await?;

        Ok(events.into_iter().find(|e| e.id == id))
    }

    pub async fn save(&self, new: NewEvent) -> Response<Event> {
        let _guard = self.lock.lock().await;
        let mut events = self.read().await?;

        let mut millis = Utc::now().timestamp_millis();
        while events.iter().any(|e| e.id == millis.to_string()) {
            millis += 1;
        }

        let event = Event::new(millis.to_string(), new);
        events.push(event.clone());
        self.write(&events).await?;

        debug!(task = "save event", id = %event.id);
        Ok(event)
    }

    pub async fn update(&self, id: &str, patch: EventPatch) -> Response<Event> {
        let _guard = self.lock.lock().await;
        let mut events = self.read().await?;

        let Some(event) = events.iter_mut().find(|e| e.id == id) else {
            return Err(RepositoryError::NotFound(id.to_string()));
        };
        event.apply(patch);
        let event = event.clone();

        self.write(&events).await?;

        debug!(task = "update event", id = %id);
        Ok(event)
    }

    pub async fn delete(&self, id: &str) -> Response<()> {
        let _guard = self.lock.lock().await;
        let mut events = self.read().await?;

        let Some(index) = events.iter().position(|e| e.id == id) else {
            return Err(RepositoryError::NotFound(id.to_string()));
        };
        events.remove(index);

        self.write(&events).await?;

        debug!(task = "delete event", id = %id);
        Ok(())
    }

    async fn read(&self) -> Response<Vec<Event>> {
        let text = fs::read_to_string(self.path.as_ref())
            .await
            .into_response("in read events file")?;

        serde_json::from_str(&text).into_response("in parse events file")
    }

    async fn write(&self, events: &[Event]) -> Response<()> {
        let text = serde_json::to_vec_pretty(events)
            .into_response("in serialize events")?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, text)
            .await
            .into_response("in write temporary events file")?;
        fs::rename(&tmp, self.path.as_ref())
            .await
            .into_response("in replace events file")
    }
}
