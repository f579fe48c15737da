//! Bulk Actions Bar Component
//!
//! Validate, tag, or untag every selected guest with a single call each.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{run_bulk_action, selected_guest_ids, BulkAction};
use crate::api::{self, TagArgs};
use crate::components::TagAutocomplete;
use crate::context::use_app_context;
use crate::models::GuestRow;
use crate::store::{store_upsert_tag, use_app_store, AppStateStoreFields};

#[component]
pub fn BulkActionsBar(
    #[prop(into)] rows: Signal<Vec<GuestRow>>,
    selection: RwSignal<HashSet<(bool, u32)>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (busy, set_busy) = signal(false);
    let (remove_tag_id, set_remove_tag_id) = signal::<Option<u32>>(None);

    let guest_ids = move || selection.with(|s| rows.with(|r| selected_guest_ids(r, s)));

    let run = move |action: BulkAction| {
        let ids = guest_ids();
        if ids.is_empty() {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            if run_bulk_action(store, ctx, action, ids).await {
                selection.set(HashSet::new());
            }
            set_busy.set(false);
        });
    };

    // Existing tag by name (case-insensitive), otherwise create it first
    let assign_tag_by_name = move |name: String| {
        let ids = guest_ids();
        if ids.is_empty() {
            return;
        }
        let existing = store
            .tags()
            .get_untracked()
            .into_iter()
            .find(|t| t.name.to_lowercase() == name.to_lowercase());
        set_busy.set(true);
        spawn_local(async move {
            let tag_id = match existing {
                Some(tag) => tag.id,
                None => match api::create_tag(&TagArgs { name: &name }).await {
                    Ok(tag) => {
                        let id = tag.id;
                        store_upsert_tag(&store, tag);
                        id
                    }
                    Err(e) => {
                        ctx.report(&e);
                        set_busy.set(false);
                        return;
                    }
                },
            };
            if run_bulk_action(store, ctx, BulkAction::AssignTag(tag_id), ids).await {
                selection.set(HashSet::new());
            }
            set_busy.set(false);
        });
    };

    view! {
        <Show when=move || selection.with(|s| !s.is_empty())>
            <div class="bulk-bar">
                <span class="bulk-count">{move || format!("{} invitados seleccionados", guest_ids().len())}</span>
                <button disabled=move || busy.get() on:click=move |_| run(BulkAction::Validate)>"Validar"</button>

                <TagAutocomplete
                    all_tags=Signal::derive(move || store.tags().get())
                    on_select=assign_tag_by_name
                    placeholder="Asignar etiqueta..."
                />

                <select
                    class="bulk-remove-select"
                    on:change=move |ev| set_remove_tag_id.set(event_target_value(&ev).parse().ok())
                >
                    <option value="">"Quitar etiqueta..."</option>
                    <For
                        each=move || store.tags().get()
                        key=|tag| tag.id
                        children=move |tag| view! { <option value=tag.id.to_string()>{tag.name}</option> }
                    />
                </select>
                <button
                    disabled=move || busy.get() || remove_tag_id.get().is_none()
                    on:click=move |_| {
                        if let Some(tag_id) = remove_tag_id.get() {
                            run(BulkAction::RemoveTag(tag_id));
                        }
                    }
                >
                    "Quitar"
                </button>
                <button class="bulk-clear" on:click=move |_| selection.set(HashSet::new())>"Cancelar"</button>
            </div>
        </Show>
    }
}
