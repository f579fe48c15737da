//! Locations Page
//!
//! Event venues shown on the public site.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::run_mutation;
use crate::api;
use crate::components::form_fields::TextField;
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, AppContext};
use crate::models::Location;
use crate::text::non_empty;

async fn load_locations(ctx: AppContext, set_locations: WriteSignal<Vec<Location>>) {
    match api::list_locations().await {
        Ok(list) => {
            log::debug!("[LOCATIONS] Loaded {}", list.len());
            set_locations.set(list);
        }
        Err(e) => ctx.report(&e),
    }
}

#[component]
fn LocationForm(location: Location, #[prop(into)] on_saved: Callback<()>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let is_new = location.id == 0;
    let form = RwSignal::new(location);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut location = form.get_untracked();
        location.name = location.name.trim().to_string();
        if location.name.is_empty() {
            ctx.notify_error("El nombre es obligatorio");
            return;
        }
        spawn_local(async move {
            let saved = if is_new {
                run_mutation(ctx, "Lugar creado", api::create_location(&location)).await
            } else {
                run_mutation(ctx, "Lugar actualizado", api::update_location(&location)).await
            };
            if saved.is_some() {
                on_saved.run(());
                on_close.run(());
            }
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <form class="modal" on:click=|ev| ev.stop_propagation() on:submit=on_submit>
                <h2>{if is_new { "Nuevo lugar" } else { "Editar lugar" }}</h2>
                <TextField
                    label="Nombre"
                    value=Signal::derive(move || form.with(|l| l.name.clone()))
                    on_input=move |v: String| form.update(|l| l.name = v)
                />
                <TextField
                    label="Dirección"
                    value=Signal::derive(move || form.with(|l| l.address.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|l| l.address = non_empty(&v))
                />
                <TextField
                    label="Enlace al mapa"
                    input_type="url"
                    value=Signal::derive(move || form.with(|l| l.map_url.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|l| l.map_url = non_empty(&v))
                />
                <TextField
                    label="Hora"
                    value=Signal::derive(move || form.with(|l| l.starts_at.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|l| l.starts_at = non_empty(&v))
                />
                <TextField
                    label="Descripción"
                    multiline=true
                    value=Signal::derive(move || form.with(|l| l.description.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|l| l.description = non_empty(&v))
                />
                <div class="modal-footer">
                    <button type="button" on:click=move |_| on_close.run(())>"Cancelar"</button>
                    <button type="submit" class="primary">"Guardar"</button>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn LocationsPage() -> impl IntoView {
    let ctx = use_app_context();
    let (locations, set_locations) = signal(Vec::<Location>::new());
    let (editing, set_editing) = signal::<Option<Location>>(None);

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        spawn_local(load_locations(ctx, set_locations));
    });

    let reload = Callback::new(move |_| spawn_local(load_locations(ctx, set_locations)));

    view! {
        <section class="page locations-page">
            <header class="page-header">
                <h1>"Lugares"</h1>
                <button class="primary" on:click=move |_| set_editing.set(Some(Location::default()))>"+ Nuevo lugar"</button>
            </header>
            <ul class="card-list">
                <For
                    each=move || locations.get()
                    key=|location| format!("{:?}", location)
                    children=move |location| {
                        let id = location.id;
                        let for_edit = location.clone();
                        view! {
                            <li class="card">
                                <div class="card-title">{location.name}</div>
                                {location.starts_at.map(|t| view! { <div class="card-meta">{t}</div> })}
                                {location.address.map(|a| view! { <div class="card-meta">{a}</div> })}
                                {location.map_url.map(|url| view! {
                                    <a class="card-link" href=url target="_blank" rel="noopener">"Ver mapa"</a>
                                })}
                                {location.description.map(|d| view! { <p class="card-body">{d}</p> })}
                                <div class="card-actions">
                                    <button class="edit-btn" on:click=move |_| set_editing.set(Some(for_edit.clone()))>"✎"</button>
                                    <DeleteConfirmButton
                                        button_class="delete-btn"
                                        on_confirm=move |_| spawn_local(async move {
                                            if run_mutation(ctx, "Lugar eliminado", api::delete_location(id)).await.is_some() {
                                                reload.run(());
                                            }
                                        })
                                    />
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
            {move || editing.get().map(|location| view! {
                <LocationForm location=location on_saved=reload on_close=move |_| set_editing.set(None) />
            })}
        </section>
    }
}
