//! Guests Page
//!
//! Filterable table of guests and plus-ones, with bulk actions, Excel export,
//! and the create/edit modal.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{delete_guest, refresh_guest_data};
use crate::components::{BulkActionsBar, GuestFilterBar, GuestFormModal, GuestListMobile, GuestTable};
use crate::context::{use_app_context, use_user_config};
use crate::export::{build_sheet, download, write_xlsx, EXPORT_FILE_NAME};
use crate::filter::{apply_filters, Filters};
use crate::guest_rows::group_rows;
use crate::models::Guest;
use crate::store::{store_find_guest, use_app_store, AppStateStoreFields};

/// Which guest the form modal is open for
#[derive(Clone, Debug, PartialEq)]
enum FormTarget {
    New,
    Existing(Guest),
}

#[component]
pub fn GuestsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let config = use_user_config();

    let filters = RwSignal::new(Filters::new());
    let selection = RwSignal::new(HashSet::<(bool, u32)>::new());
    let (form_target, set_form_target) = signal::<Option<FormTarget>>(None);

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        spawn_local(refresh_guest_data(store, ctx));
    });

    let filtered = Memo::new(move |_| {
        let rows = store.rows().get();
        filters.with(|f| apply_filters(&rows, f))
    });
    let groups = Signal::derive(move || group_rows(&filtered.get()));
    let columns = Signal::derive(move || config.visible_columns());

    let guest_count = move || store.guests().with(|g| g.len());
    let row_count = move || store.rows().with(|r| r.len());

    let open_edit = Callback::new(move |guest_id: u32| match store_find_guest(&store, guest_id) {
        Some(guest) => set_form_target.set(Some(FormTarget::Existing(guest))),
        None => log::warn!("[GUESTS] Guest {} not in cache", guest_id),
    });

    let on_delete = Callback::new(move |guest_id: u32| {
        spawn_local(async move {
            if delete_guest(store, ctx, guest_id).await {
                selection.update(|s| s.retain(|(_, id)| *id != guest_id));
            }
        });
    });

    let export = move |_| {
        let sheet = build_sheet(&filtered.get_untracked(), &columns.get_untracked().columns());
        let result = write_xlsx(&sheet)
            .map_err(|e| e.to_string())
            .and_then(|bytes| download(&bytes, EXPORT_FILE_NAME));
        match result {
            Ok(()) => log::info!("[EXPORT] Exported {} rows", sheet.rows.len()),
            Err(e) => {
                log::error!("[EXPORT] {}", e);
                ctx.notify_error("No se pudo exportar el Excel");
            }
        }
    };

    view! {
        <section class="page guests-page">
            <header class="page-header">
                <h1>"Invitados"</h1>
                <span class="page-count">
                    {move || format!("{} de {} filas · {} invitados", filtered.with(|r| r.len()), row_count(), guest_count())}
                </span>
                <div class="page-actions">
                    <button class="secondary" on:click=export>"Exportar Excel"</button>
                    <button class="primary" on:click=move |_| set_form_target.set(Some(FormTarget::New))>
                        "+ Nuevo invitado"
                    </button>
                </div>
            </header>

            <GuestFilterBar filters=filters />

            {move || store.error().get().map(|msg| view! { <p class="page-error">{msg}</p> })}

            <Show
                when=move || !(store.loading().get() && store.rows().with(|r| r.is_empty()))
                fallback=|| view! { <p class="loading">"Cargando invitados..."</p> }
            >
                <BulkActionsBar rows=filtered selection=selection />
                <div class="desktop-only">
                    <GuestTable
                        rows=filtered
                        columns=columns
                        selection=selection
                        on_edit=open_edit
                        on_delete=on_delete
                    />
                </div>
                <div class="mobile-only">
                    <GuestListMobile groups=groups on_edit=open_edit />
                </div>
                <Show when=move || filtered.with(|r| r.is_empty())>
                    <p class="empty-state">"No hay invitados que coincidan"</p>
                </Show>
            </Show>

            {move || form_target.get().map(|target| {
                let guest = match target {
                    FormTarget::New => None,
                    FormTarget::Existing(guest) => Some(guest),
                };
                view! { <GuestFormModal guest=guest on_close=move |_| set_form_target.set(None) /> }
            })}
        </section>
    }
}
