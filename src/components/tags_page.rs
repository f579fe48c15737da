//! Tags Page
//!
//! Create, rename, and delete tags. Each tag shows how many guests carry it.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{refresh_guest_data, run_mutation};
use crate::api::{self, TagArgs};
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, AppContext};
use crate::models::{Guest, Tag};
use crate::store::{store_remove_tag, store_upsert_tag, use_app_store, AppStateStoreFields, AppStore};
use crate::text::capitalize_words;

/// Number of guests carrying each tag id
fn tag_guest_counts(guests: &[Guest]) -> HashMap<u32, usize> {
    let mut counts = HashMap::new();
    for tag in guests.iter().flat_map(|g| g.tags.iter()) {
        *counts.entry(tag.id).or_insert(0) += 1;
    }
    counts
}

/// Existing tag with the same name, ignoring case
fn find_tag_by_name<'a>(tags: &'a [Tag], name: &str) -> Option<&'a Tag> {
    let wanted = name.trim().to_lowercase();
    tags.iter().find(|t| t.name.to_lowercase() == wanted)
}

/// Cache a created or renamed tag, then refetch guests so their tag names follow
fn apply_saved_tag(store: &AppStore, ctx: AppContext, tag: Tag) {
    store_upsert_tag(store, tag);
    ctx.reload();
}

#[component]
fn TagRow(tag: Tag, #[prop(into)] count: Signal<usize>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = tag.id;
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(tag.name.clone());
    let name = tag.name;

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let new_name = capitalize_words(draft.get_untracked().trim());
        if new_name.is_empty() {
            return;
        }
        spawn_local(async move {
            if let Some(tag) = run_mutation(ctx, "Etiqueta actualizada", api::update_tag(id, &TagArgs { name: &new_name })).await {
                apply_saved_tag(&store, ctx, tag);
            }
        });
        set_editing.set(false);
    };

    let delete = move |_| {
        spawn_local(async move {
            if run_mutation(ctx, "Etiqueta eliminada", api::delete_tag(id)).await.is_some() {
                store_remove_tag(&store, id);
                ctx.reload();
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
                        <span class="entity-name" on:dblclick=move |_| set_editing.set(true)>{name}</span>
                        <span class="entity-count">{move || format!("{} invitados", count.get())}</span>
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
pub fn TagsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (new_name, set_new_name) = signal(String::new());

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        spawn_local(refresh_guest_data(store, ctx));
    });

    let counts = Memo::new(move |_| store.guests().with(|g| tag_guest_counts(g)));

    let add_tag = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = capitalize_words(new_name.get_untracked().trim());
        if name.is_empty() {
            return;
        }
        if store.tags().with_untracked(|tags| find_tag_by_name(tags, &name).is_some()) {
            ctx.notify_error(format!("La etiqueta \"{}\" ya existe", name));
            return;
        }
        spawn_local(async move {
            if let Some(tag) = run_mutation(ctx, "Etiqueta creada", api::create_tag(&TagArgs { name: &name })).await {
                apply_saved_tag(&store, ctx, tag);
                set_new_name.set(String::new());
            }
        });
    };

    view! {
        <section class="page tags-page">
            <header class="page-header">
                <h1>"Etiquetas"</h1>
            </header>
            <form class="entity-add-form" on:submit=add_tag>
                <input
                    type="text"
                    placeholder="Nueva etiqueta..."
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit">"+"</button>
            </form>
            <ul class="entity-list">
                <For
                    each=move || store.tags().get()
                    key=|tag| (tag.id, tag.name.clone())
                    children=move |tag| {
                        let id = tag.id;
                        view! { <TagRow tag=tag count=Signal::derive(move || counts.with(|c| c.get(&id).copied().unwrap_or(0))) /> }
                    }
                />
            </ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NamedRef;
    use crate::store::AppState;
    use reactive_stores::Store;

    fn make_guest(id: u32, tag_ids: &[u32]) -> Guest {
        Guest {
            id,
            tags: tag_ids.iter().map(|t| NamedRef { id: *t, name: format!("t{}", t) }).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tag_guest_counts() {
        let counts = tag_guest_counts(&[make_guest(1, &[1, 2]), make_guest(2, &[2]), make_guest(3, &[])]);
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&2));
        assert_eq!(counts.get(&3), None);
    }

    #[test]
    fn test_saved_tag_is_cached_and_triggers_reload() {
        let store = Store::new(AppState::default());
        let ctx = AppContext::with_session(None);

        apply_saved_tag(&store, ctx, Tag { id: 4, name: "Amigos".to_string() });
        assert_eq!(store.tags().get_untracked(), vec![Tag { id: 4, name: "Amigos".to_string() }]);
        assert_eq!(ctx.reload_trigger.get_untracked(), 1);

        apply_saved_tag(&store, ctx, Tag { id: 4, name: "Amigos Novio".to_string() });
        assert_eq!(store.tags().get_untracked().len(), 1);
        assert_eq!(store.tags().get_untracked()[0].name, "Amigos Novio");
        assert_eq!(ctx.reload_trigger.get_untracked(), 2);
    }

    #[test]
    fn test_find_tag_by_name_ignores_case() {
        let tags = vec![Tag { id: 1, name: "Familia Novia".to_string() }];
        assert_eq!(find_tag_by_name(&tags, "  familia novia ").map(|t| t.id), Some(1));
        assert!(find_tag_by_name(&tags, "amigos").is_none());
    }
}
