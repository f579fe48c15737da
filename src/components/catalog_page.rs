//! Catalog Page
//!
//! Shared editor for the two simple catalogs: menus and allergies.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::run_mutation;
use crate::api::{self, ApiError};
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, AppContext};
use crate::store::{store_set_allergies, store_set_menus, use_app_store, AppStateStoreFields, AppStore};
use crate::text::capitalize_words;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogKind {
    Menus,
    Allergies,
}

impl CatalogKind {
    fn title(self) -> &'static str {
        match self {
            CatalogKind::Menus => "Menús",
            CatalogKind::Allergies => "Alergias",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            CatalogKind::Menus => "Nuevo menú...",
            CatalogKind::Allergies => "Nueva alergia...",
        }
    }

    /// Entries currently cached for this catalog
    fn entries(self, store: &AppStore) -> Vec<(u32, String)> {
        match self {
            CatalogKind::Menus => store.menus().get().into_iter().map(|m| (m.id, m.name)).collect(),
            CatalogKind::Allergies => store.allergies().get().into_iter().map(|a| (a.id, a.name)).collect(),
        }
    }

    /// Refetch this catalog into the store
    async fn reload(self, store: AppStore) -> Result<(), ApiError> {
        match self {
            CatalogKind::Menus => store_set_menus(&store, api::list_menus().await?),
            CatalogKind::Allergies => store_set_allergies(&store, api::list_allergies().await?),
        }
        Ok(())
    }

    async fn create(self, name: &str) -> Result<(), ApiError> {
        match self {
            CatalogKind::Menus => api::create_menu(name).await.map(|_| ()),
            CatalogKind::Allergies => api::create_allergy(name).await.map(|_| ()),
        }
    }

    async fn rename(self, id: u32, name: &str) -> Result<(), ApiError> {
        match self {
            CatalogKind::Menus => api::update_menu(id, name).await.map(|_| ()),
            CatalogKind::Allergies => api::update_allergy(id, name).await.map(|_| ()),
        }
    }

    async fn delete(self, id: u32) -> Result<(), ApiError> {
        match self {
            CatalogKind::Menus => api::delete_menu(id).await,
            CatalogKind::Allergies => api::delete_allergy(id).await,
        }
    }
}

/// Whether `name` is free to use, ignoring case and the entry being renamed
fn name_available(entries: &[(u32, String)], name: &str, except: Option<u32>) -> bool {
    let wanted = name.to_lowercase();
    !entries
        .iter()
        .any(|(id, existing)| Some(*id) != except && existing.to_lowercase() == wanted)
}

async fn reload_into(kind: CatalogKind, store: AppStore, ctx: AppContext) {
    if let Err(e) = kind.reload(store).await {
        log::error!("[CATALOG] Reload of {} failed: {}", kind.title(), e);
        ctx.report(&e);
    }
}

#[component]
fn CatalogRow(kind: CatalogKind, id: u32, name: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(name.clone());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_name = capitalize_words(draft.get_untracked().trim());
        if new_name.is_empty() {
            return;
        }
        if !name_available(&kind.entries(&store), &new_name, Some(id)) {
            ctx.notify_error(format!("\"{}\" ya existe", new_name));
            return;
        }
        set_editing.set(false);
        spawn_local(async move {
            if run_mutation(ctx, "Cambios guardados", kind.rename(id, &new_name)).await.is_some() {
                reload_into(kind, store, ctx).await;
            }
        });
    };

    let delete = move |_| {
        spawn_local(async move {
            if run_mutation(ctx, "Eliminado", kind.delete(id)).await.is_some() {
                reload_into(kind, store, ctx).await;
            }
        });
    };

    view! {
        <li class="entity-row">
            <Show
                when=move || editing.get()
                fallback=move || {
                    let name = name.clone();
                    view! {
                        <span class="entity-name">{name}</span>
                        <button class="edit-btn" title="Renombrar" on:click=move |_| set_editing.set(true)>"✎"</button>
                        <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
                    }
                }
            >
                <form class="inline-edit" on:submit=save>
                    <input
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button type="submit">"Guardar"</button>
                    <button type="button" on:click=move |_| set_editing.set(false)>"Cancelar"</button>
                </form>
            </Show>
        </li>
    }
}

#[component]
pub fn CatalogPage(kind: CatalogKind) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (new_name, set_new_name) = signal(String::new());

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        spawn_local(reload_into(kind, store, ctx));
    });

    let add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = capitalize_words(new_name.get_untracked().trim());
        if name.is_empty() {
            return;
        }
        if !name_available(&kind.entries(&store), &name, None) {
            ctx.notify_error(format!("\"{}\" ya existe", name));
            return;
        }
        spawn_local(async move {
            if run_mutation(ctx, "Añadido", kind.create(&name)).await.is_some() {
                set_new_name.set(String::new());
                reload_into(kind, store, ctx).await;
            }
        });
    };

    view! {
        <section class="page catalog-page">
            <header class="page-header">
                <h1>{kind.title()}</h1>
            </header>
            <form class="entity-add-form" on:submit=add>
                <input
                    type="text"
                    placeholder=kind.placeholder()
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit">"+"</button>
            </form>
            <ul class="entity-list">
                <For
                    each=move || kind.entries(&store)
                    key=|entry| entry.clone()
                    children=move |(id, name)| view! { <CatalogRow kind=kind id=id name=name /> }
                />
            </ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_available() {
        let entries = vec![(1, "Vegano".to_string()), (2, "Infantil".to_string())];
        assert!(!name_available(&entries, "vegano", None));
        assert!(name_available(&entries, "vegano", Some(1)));
        assert!(name_available(&entries, "Carne", None));
    }
}
