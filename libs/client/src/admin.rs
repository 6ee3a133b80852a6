//! State of the admin panel: the session token, the event list and the
//! create/edit form.

use entity::prelude::*;
use tracing::{info, warn};

use crate::{Client, ClientError, EventPayload, LocalStore};

pub const TOKEN_KEY: &str = "adminToken";

const SESSION_EXPIRED: &str = "Sesión expirada, vuelve a iniciar sesión.";
const LOAD_FAILED: &str = "No se pudieron cargar los eventos.";

#[derive(Debug, Default, Clone, PartialEq)]
pub enum FormState {
    #[default]
    Closed,
    Creating,
    Editing(Event),
}

/// A file picked in the form, not uploaded yet.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// What the form holds at submit time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub cover_image: Option<MediaFile>,
    pub images: Vec<MediaFile>,
    pub videos: Vec<MediaFile>,
    pub pdfs: Vec<MediaFile>,
    pub files: Vec<MediaFile>,
}

#[derive(Debug)]
pub struct AdminSession {
    client: Client,
    store: LocalStore,
    token: Option<String>,
    events: Vec<Event>,
    form: FormState,
    error: Option<String>,
}

impl AdminSession {
    /// Picks up a token left in `store` by an earlier session and checks it
    /// against the server. A rejected token is dropped.
    pub async fn resume(
        client: Client,
        store: LocalStore,
    ) -> Result<Self, ClientError> {
        let token = store.get(TOKEN_KEY).map(ToString::to_string);
        let mut session = Self {
            client,
            store,
            token: None,
            events: vec![],
            form: FormState::Closed,
            error: None,
        };

        let Some(token) = token else {
            return Ok(session);
        };

        if let Err(message) = session.validate_and_load(token).await {
            session.logout().await?;
            session.error = Some(message.to_string());
        }

        Ok(session)
    }

    /// Verifies `token`, then loads the list. Either failure ends the
    /// session with the message to show.
    async fn validate_and_load(
        &mut self,
        token: String,
    ) -> Result<(), &'static str> {
        let status = self.client.verify_admin(&token).await.map_err(|e| {
            warn!(task = "resume session", err = %e);
            SESSION_EXPIRED
        })?;
        info!(task = "resume session", username = %status.user.username);
        self.token = Some(token);

        self.refresh().await.map_err(|e| {
            warn!(task = "load events", err = %e);
            LOAD_FAILED
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Newest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let token = self.client.login(username, password).await?;

        self.store.set(TOKEN_KEY, token.as_str()).await?;
        self.token = Some(token);
        self.error = None;
        info!(task = "login", username = %username);

        self.refresh().await
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.token = None;
        self.events.clear();
        self.form = FormState::Closed;
        self.store.remove(TOKEN_KEY).await
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let mut events = self.client.list_events().await?;
        events.reverse();
        self.events = events;

        Ok(())
    }

    pub fn open_new(&mut self) {
        self.form = FormState::Creating;
    }

    /// Opens the form on an event of the current list.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(event) = self.events.iter().find(|e| e.id == id) else {
            return false;
        };

        self.form = FormState::Editing(event.clone());
        true
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
    }

    /// Uploads the draft's files one by one (cover, images, videos, pdfs,
    /// files), then creates or updates the event, reloads the list and
    /// closes the form. Editing keeps the media already on the event.
    pub async fn submit(&mut self, draft: EventDraft) -> Result<Event, ClientError> {
        let result = self.submit_draft(draft).await;
        self.check(result).await
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ClientError> {
        let result = self.delete_event(id).await;
        self.check(result).await
    }

    async fn submit_draft(
        &mut self,
        draft: EventDraft,
    ) -> Result<Event, ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotLoggedIn)?;
        let editing = match &self.form {
            FormState::Editing(event) => Some(event.clone()),
            _ => None,
        };
        let title = draft.title.clone();

        let mut payload = EventPayload {
            title: draft.title,
            description: draft.description,
            ..Default::default()
        };
        if let Some(event) = &editing {
            payload.cover_image = event.cover_image.clone();
            payload.images = event.images.clone();
            payload.videos = event.videos.clone();
            payload.pdfs = event.pdfs.clone();
            payload.files = event.files.clone();
        }

        if let Some(cover) = draft.cover_image {
            let src = self.client.upload(&token, &cover.name, cover.bytes).await?;
            payload.cover_image = Some(MediaItem::new(src, ""));
        }
        for (files, list) in [
            (draft.images, &mut payload.images),
            (draft.videos, &mut payload.videos),
            (draft.pdfs, &mut payload.pdfs),
            (draft.files, &mut payload.files),
        ] {
            for file in files {
                let src = self.client.upload(&token, &file.name, file.bytes).await?;
                list.push(MediaItem::new(src, ""));
            }
        }

        for item in payload
            .cover_image
            .iter_mut()
            .chain(payload.images.iter_mut())
            .chain(payload.videos.iter_mut())
            .chain(payload.pdfs.iter_mut())
            .chain(payload.files.iter_mut())
        {
            item.alt = title.clone();
        }

        let saved = match editing {
            Some(event) => {
                self.client.update_event(&token, &event.id, &payload).await?
            }
            None => self.client.create_event(&token, &payload).await?,
        };
        info!(task = "save event", id = %saved.id);

        self.refresh().await?;
        self.close_form();
        Ok(saved)
    }

    async fn delete_event(&mut self, id: &str) -> Result<(), ClientError> {
        let token = self.token.clone().ok_or(ClientError::NotLoggedIn)?;

        self.client.delete_event(&token, id).await?;
        info!(task = "delete event", id = %id);

        if matches!(&self.form, FormState::Editing(event) if event.id == id) {
            self.close_form();
        }
        self.refresh().await
    }

    /// A refused token ends the session.
    async fn check<T>(
        &mut self,
        result: Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        if let Err(e) = &result {
            if e.is_auth_failure() {
                warn!(task = "check session", err = %e);
                self.logout().await?;
                self.error = Some(SESSION_EXPIRED.to_string());
            } else {
                self.error = Some(e.to_string());
            }
        }

        result
    }
}
