//! State of the public site: the section on screen, locale, colour theme,
//! the portfolio listing and its detail modal.

use entity::prelude::*;
use strum::{Display, EnumIter, EnumString};
use tracing::{info, warn};

use crate::{Client, ClientError, LocalStore};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum View {
    #[strum(serialize = "sobre-mi")]
    AboutMe,
    Works,
    Research,
    Portfolio,
    Contact,
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
    Gl,
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Locale {
    pub fn nav_label(self, view: View) -> &'static str {
        match (self, view) {
            (Locale::Es, View::AboutMe) => "sobre mí",
            (Locale::En, View::AboutMe) => "about me",
            (Locale::Gl, View::AboutMe) => "sobre min",
            (Locale::Es | Locale::Gl, View::Works) => "obras",
            (Locale::En, View::Works) => "works",
            (Locale::Es | Locale::Gl, View::Research) => "investigación",
            (Locale::En, View::Research) => "research",
            (_, View::Portfolio) => "portfolio",
            (Locale::Es | Locale::Gl, View::Contact) => "contacto",
            (Locale::En, View::Contact) => "contact",
        }
    }

    /// Generic message shown when the event list cannot be fetched.
    pub fn load_error(self) -> &'static str {
        match self {
            Locale::Es => "No se pudieron cargar los eventos.",
            Locale::En => "The events could not be loaded.",
            Locale::Gl => "Non se puideron cargar os eventos.",
        }
    }
}

#[derive(Debug)]
pub struct Site {
    client: Client,
    store: LocalStore,
    view: Option<View>,
    locale: Locale,
    theme: Theme,
    events: Vec<Event>,
    loaded: bool,
    load_failed: bool,
    selected: Option<String>,
}

impl Site {
    /// Restores the persisted theme, falling back to the OS preference.
    pub fn new(client: Client, store: LocalStore, prefers_dark: bool) -> Self {
        let theme = match store.get(THEME_KEY).map(str::parse::<Theme>) {
            Some(Ok(theme)) => theme,
            _ if prefers_dark => Theme::Dark,
            _ => Theme::Light,
        };

        Self {
            client,
            store,
            view: None,
            locale: Locale::default(),
            theme,
            events: vec![],
            loaded: false,
            load_failed: false,
            selected: None,
        }
    }

    /// Fetches the portfolio once, newest first. Later calls are no-ops.
    pub async fn load_events(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        match self.client.list_events().await {
            Ok(mut events) => {
                events.reverse();
                info!(task = "load events", count = events.len());
                self.events = events;
            }
            Err(e) => {
                warn!(task = "load events", err = %e);
                self.load_failed = true;
            }
        }
    }

    pub fn view(&self) -> Option<View> {
        self.view
    }

    pub fn show(&mut self, view: View) {
        self.view = Some(view);
    }

    pub fn home(&mut self) {
        self.view = None;
        self.selected = None;
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub async fn toggle_theme(&mut self) -> Result<Theme, ClientError> {
        self.theme = self.theme.toggled();
        self.store.set(THEME_KEY, self.theme.to_string()).await?;

        Ok(self.theme)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Localized message when loading failed.
    pub fn error(&self) -> Option<&'static str> {
        self.load_failed.then(|| self.locale.load_error())
    }

    /// Opens the detail modal for `id`. Unknown ids leave it closed.
    pub fn select_event(&mut self, id: &str) -> bool {
        if self.events.iter().any(|e| e.id == id) {
            self.selected = Some(id.to_string());
            return true;
        }
        false
    }

    pub fn selected_event(&self) -> Option<&Event> {
        let id = self.selected.as_deref()?;
        self.events.iter().find(|e| e.id == id)
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
    }

    /// Keyboard handling while the modal is open. `key` follows the DOM
    /// `KeyboardEvent.key` names.
    pub fn on_key_down(&mut self, key: &str) {
        if key == "Escape" {
            self.close_modal();
        }
    }

    pub fn asset_url(&self, src: &str) -> String {
        self.client.asset_url(src)
    }
}
