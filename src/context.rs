//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::app::Page;
use crate::commands::Backend;
use crate::config::AppConfig;
use crate::session::{Session, Theme};

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub session: RwSignal<Session>,
    pub theme: RwSignal<Theme>,
    /// Page shown in the main area
    pub page: RwSignal<Page>,
    backend: Backend,
    /// Bumped to refetch every list from the backend
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig, session: Session, theme: Theme, backend: Backend) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        Self {
            config: Arc::new(config),
            session: RwSignal::new(session),
            theme: RwSignal::new(theme),
            page: RwSignal::new(Page::Pipeline),
            backend,
            reload_trigger,
            set_reload_trigger,
        }
    }

    /// Backend handle for use inside a spawned task
    pub fn backend(&self) -> Backend {
        Arc::clone(&self.backend)
    }

    pub fn navigate(&self, page: Page) {
        self.page.set(page);
    }

    /// Trigger a reload of all lists
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn toggle_theme(&self) {
        self.theme.update(|theme| *theme = theme.toggled());
        self.theme.get_untracked().apply();
    }

    /// Drop the stored token and restart with the public key
    pub fn sign_out(&self) {
        Session::clear();
        self.session.set(Session::default());
        if let Some(win) = web_sys::window() {
            let _ = win.location().reload();
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
