//! Session and Theme
//!
//! Both are persisted in localStorage and handed to components through
//! [`crate::context::AppContext`].

use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "crm_access_token";
const THEME_KEY: &str = "crm_theme";

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Signed-in user, as far as the dashboard cares
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
}

impl Session {
    /// Session saved by a previous visit, if any
    pub fn restore() -> Self {
        Self {
            access_token: local_storage().and_then(|s| s.get_item(ACCESS_TOKEN_KEY).ok().flatten()),
        }
    }

    /// Bearer credential for REST calls, falling back to the public key
    pub fn bearer<'a>(&'a self, api_key: &'a str) -> &'a str {
        self.access_token.as_deref().unwrap_or(api_key)
    }

    pub fn clear() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn restore() -> Self {
        match local_storage().and_then(|s| s.get_item(THEME_KEY).ok().flatten()).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Persist and apply to the document root
    pub fn apply(self) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(THEME_KEY, self.class());
        }
        if let Some(root) = window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = root.set_attribute("data-theme", self.class());
        }
    }
}
