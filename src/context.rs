//! Application Context
//!
//! Shared state provided via Leptos Context API: session, toasts, and the
//! per-account configuration cache.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::models::UserConfig;
use crate::session::{self, Session};
use crate::view_config::{VisibleColumns, VisibleFormFields};

const TOAST_MILLIS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload guest data from the API - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload guest data from the API - write
    set_reload_trigger: WriteSignal<u32>,
    /// Logged-in session, None on the public site or after logout - read
    pub session: ReadSignal<Option<Session>>,
    /// Logged-in session - write
    set_session: WriteSignal<Option<Session>>,
    /// Visible toasts - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible toasts - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::with_session(session::load())
    }

    pub fn with_session(initial: Option<Session>) -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (session, set_session) = signal(initial);
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        Self {
            reload_trigger,
            set_reload_trigger,
            session,
            set_session,
            toasts,
            set_toasts,
            next_toast_id: StoredValue::new(0),
        }
    }

    /// Trigger a reload of guest data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// Persist and publish a fresh login
    pub fn sign_in(&self, new_session: Session) {
        if let Err(e) = session::save(&new_session) {
            log::error!("[SESSION] Could not persist session: {}", e);
        }
        self.set_session.set(Some(new_session));
    }

    pub fn sign_out(&self) {
        session::clear();
        self.set_session.set(None);
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message.into());
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Error, message.into());
    }

    /// Toast an API failure; an expired token also ends the session
    pub fn report(&self, error: &ApiError) {
        log::error!("[API] {}", error);
        if error.is_unauthorized() {
            self.sign_out();
        }
        self.notify_error(error.user_message());
    }

    pub fn dismiss(&self, toast_id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != toast_id));
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id.wrapping_add(1));
        self.set_toasts.update(|toasts| toasts.push(Toast { id, kind, message }));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MILLIS).await;
            ctx.dismiss(id);
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

// ========================
// User Configuration
// ========================

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigStatus {
    Loading,
    Ready(UserConfig),
    Failed(String),
}

/// Cached account configuration with async load and update-through-API
#[derive(Clone, Copy)]
pub struct UserConfigContext {
    pub status: RwSignal<ConfigStatus>,
}

impl UserConfigContext {
    pub fn new() -> Self {
        Self { status: RwSignal::new(ConfigStatus::Loading) }
    }

    pub fn load(&self) {
        let status = self.status;
        status.set(ConfigStatus::Loading);
        spawn_local(async move {
            match api::get_user_config().await {
                Ok(config) => status.set(ConfigStatus::Ready(config)),
                Err(e) => {
                    log::error!("[CONFIG] Load failed: {}", e);
                    status.set(ConfigStatus::Failed(e.user_message()));
                }
            }
        });
    }

    pub fn config(&self) -> Option<UserConfig> {
        match self.status.get() {
            ConfigStatus::Ready(config) => Some(config),
            _ => None,
        }
    }

    /// Save through the API and cache the server's answer
    pub async fn save(&self, config: &UserConfig) -> Result<(), ApiError> {
        let saved = api::save_user_config(config).await?;
        self.status.set(ConfigStatus::Ready(saved));
        Ok(())
    }

    pub async fn set_background_image(&self, url: &str) -> Result<(), ApiError> {
        let saved = api::set_background_image(url).await?;
        self.status.set(ConfigStatus::Ready(saved));
        Ok(())
    }

    /// Table columns from the stored map; an invalid map falls back to defaults
    pub fn visible_columns(&self) -> VisibleColumns {
        let Some(config) = self.config() else {
            return VisibleColumns::default();
        };
        VisibleColumns::from_map(&config.guest_table_columns).unwrap_or_else(|e| {
            log::warn!("[CONFIG] Ignoring stored columns: {}", e);
            VisibleColumns::default()
        })
    }

    pub fn visible_form_fields(&self) -> VisibleFormFields {
        let Some(config) = self.config() else {
            return VisibleFormFields::default();
        };
        VisibleFormFields::from_map(&config.guest_form_fields).unwrap_or_else(|e| {
            log::warn!("[CONFIG] Ignoring stored form fields: {}", e);
            VisibleFormFields::default()
        })
    }
}

pub fn use_user_config() -> UserConfigContext {
    expect_context::<UserConfigContext>()
}
