//! Navbar Component
//!
//! Admin console navigation and logout.

use leptos::prelude::*;

use crate::context::use_app_context;

/// Admin console pages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Guests,
    Tags,
    Menus,
    Allergies,
    Locations,
    Contacts,
    Settings,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Guests,
        Page::Tags,
        Page::Menus,
        Page::Allergies,
        Page::Locations,
        Page::Contacts,
        Page::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Guests => "Invitados",
            Page::Tags => "Etiquetas",
            Page::Menus => "Menús",
            Page::Allergies => "Alergias",
            Page::Locations => "Lugares",
            Page::Contacts => "Contactos",
            Page::Settings => "Ajustes",
        }
    }
}

#[component]
pub fn Navbar(page: RwSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();
    let user_name = move || {
        ctx.session
            .get()
            .map(|s| s.display_name().to_string())
            .unwrap_or_default()
    };

    view! {
        <nav class="navbar">
            <div class="navbar-links">
                {Page::ALL.into_iter().map(|p| {
                    view! {
                        <button
                            class=move || if page.get() == p { "nav-link active" } else { "nav-link" }
                            on:click=move |_| page.set(p)
                        >
                            {p.title()}
                        </button>
                    }
                }).collect_view()}
            </div>
            <div class="navbar-user">
                <span class="navbar-user-name">{user_name}</span>
                <button class="logout-btn" on:click=move |_| ctx.sign_out()>"Salir"</button>
            </div>
        </nav>
    }
}
