//! Wedding Console App
//!
//! Root component. `/admin` paths get the guest console behind the login
//! guard; every other path is the public RSVP site.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{
    CatalogKind, CatalogPage, ContactsPage, GuestsPage, LocationsPage, LoginForm, Navbar, Page, PublicSite,
    SettingsPage, TagsPage, ToastHost,
};
use crate::context::{use_app_context, use_user_config, AppContext, UserConfigContext};
use crate::store::AppState;

const ADMIN_PREFIX: &str = "/admin";

fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX || path.starts_with("/admin/")
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

#[component]
fn AdminConsole() -> impl IntoView {
    let ctx = use_app_context();
    let config = use_user_config();
    let page = RwSignal::new(Page::Guests);

    // Check the stored token and (re)load the account config for each new session
    Effect::new(move |_| {
        if !ctx.is_authenticated() {
            return;
        }
        config.load();
        spawn_local(async move {
            match api::current_user().await {
                Ok(user) => log::debug!("[AUTH] Session valid for {}", user.username),
                Err(e) => ctx.report(&e),
            }
        });
    });

    view! {
        <Show when=move || ctx.is_authenticated() fallback=|| view! { <LoginForm /> }>
            <div class="admin-layout">
                <Navbar page=page />
                <main class="admin-content">
                    {move || match page.get() {
                        Page::Guests => view! { <GuestsPage /> }.into_any(),
                        Page::Tags => view! { <TagsPage /> }.into_any(),
                        Page::Menus => view! { <CatalogPage kind=CatalogKind::Menus /> }.into_any(),
                        Page::Allergies => view! { <CatalogPage kind=CatalogKind::Allergies /> }.into_any(),
                        Page::Locations => view! { <LocationsPage /> }.into_any(),
                        Page::Contacts => view! { <ContactsPage /> }.into_any(),
                        Page::Settings => view! { <SettingsPage /> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext::new());
    provide_context(Store::new(AppState::default()));
    provide_context(UserConfigContext::new());

    let path = current_path();
    log::debug!("[APP] Starting at {}", path);

    view! {
        {if is_admin_path(&path) {
            view! { <AdminConsole /> }.into_any()
        } else {
            view! { <PublicSite /> }.into_any()
        }}
        <ToastHost />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_paths() {
        assert!(is_admin_path("/admin"));
        assert!(is_admin_path("/admin/guests"));
        assert!(!is_admin_path("/administrator"));
        assert!(!is_admin_path("/"));
        assert!(!is_admin_path("/rsvp"));
    }
}
