//! Settings Page
//!
//! Event details for the public site and guest view visibility toggles.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::form_fields::{CheckField, TextField};
use crate::context::{use_app_context, use_user_config, ConfigStatus};
use crate::countdown::{format_datetime_local, parse_datetime_local};
use crate::models::UserConfig;
use crate::text::non_empty;
use crate::view_config::{GuestColumn, GuestFormField, VisibleColumns, VisibleFormFields};

#[component]
fn SettingsForm(initial: UserConfig) -> impl IntoView {
    let ctx = use_app_context();
    let config_ctx = use_user_config();

    let columns = RwSignal::new(config_ctx.visible_columns());
    let fields = RwSignal::new(config_ctx.visible_form_fields());
    let (background, set_background) = signal(initial.background_image_url.clone().unwrap_or_default());
    let form = RwSignal::new(initial);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut config = form.get_untracked();
        config.couple_names = config.couple_names.trim().to_string();
        config.guest_table_columns = columns.get_untracked().to_map();
        config.guest_form_fields = fields.get_untracked().to_map();
        set_saving.set(true);
        spawn_local(async move {
            match config_ctx.save(&config).await {
                Ok(()) => ctx.notify_success("Ajustes guardados"),
                Err(e) => ctx.report(&e),
            }
            set_saving.set(false);
        });
    };

    let save_background = move |_| {
        let url = background.get_untracked().trim().to_string();
        spawn_local(async move {
            match config_ctx.set_background_image(&url).await {
                Ok(()) => ctx.notify_success("Imagen de fondo actualizada"),
                Err(e) => ctx.report(&e),
            }
        });
    };

    view! {
        <form class="settings-form" on:submit=on_submit>
            <fieldset>
                <legend>"Evento"</legend>
                <TextField
                    label="Nombres de los novios"
                    value=Signal::derive(move || form.with(|c| c.couple_names.clone()))
                    on_input=move |v: String| form.update(|c| c.couple_names = v)
                />
                <TextField
                    label="Fecha del evento"
                    input_type="datetime-local"
                    value=Signal::derive(move || form.with(|c| format_datetime_local(c.event_date)))
                    on_input=move |v: String| form.update(|c| c.event_date = parse_datetime_local(&v))
                />
                <TextField
                    label="Fecha límite de confirmación"
                    input_type="datetime-local"
                    value=Signal::derive(move || form.with(|c| format_datetime_local(c.rsvp_deadline)))
                    on_input=move |v: String| form.update(|c| c.rsvp_deadline = parse_datetime_local(&v))
                />
                <TextField
                    label="Mensaje de bienvenida"
                    multiline=true
                    value=Signal::derive(move || form.with(|c| c.welcome_message.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|c| c.welcome_message = non_empty(&v))
                />
            </fieldset>

            <fieldset>
                <legend>"Imagen de fondo"</legend>
                <TextField
                    label="URL"
                    input_type="url"
                    value=background
                    on_input=move |v: String| set_background.set(v)
                />
                <button type="button" on:click=save_background>"Aplicar imagen"</button>
            </fieldset>

            <fieldset class="settings-toggles">
                <legend>"Columnas de la tabla"</legend>
                {GuestColumn::ALL.into_iter().map(|column| view! {
                    <CheckField
                        label=column.header()
                        checked=Signal::derive(move || columns.with(|c| c.is_visible(column)))
                        on_change=move |shown: bool| columns.update(|c| c.set(column, shown))
                    />
                }).collect_view()}
                <button type="button" class="link-btn" on:click=move |_| columns.set(VisibleColumns::default())>
                    "Restablecer"
                </button>
            </fieldset>

            <fieldset class="settings-toggles">
                <legend>"Campos del formulario"</legend>
                {GuestFormField::ALL.into_iter().map(|field| view! {
                    <CheckField
                        label=field.label()
                        checked=Signal::derive(move || fields.with(|f| f.is_visible(field)))
                        on_change=move |shown: bool| fields.update(|f| f.set(field, shown))
                    />
                }).collect_view()}
                <button type="button" class="link-btn" on:click=move |_| fields.set(VisibleFormFields::default())>
                    "Restablecer"
                </button>
            </fieldset>

            <div class="form-actions">
                <button type="submit" class="primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Guardando..." } else { "Guardar ajustes" }}
                </button>
            </div>
        </form>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let config_ctx = use_user_config();

    view! {
        <section class="page settings-page">
            <header class="page-header">
                <h1>"Ajustes"</h1>
            </header>
            {move || match config_ctx.status.get() {
                ConfigStatus::Loading => view! { <p class="loading">"Cargando ajustes..."</p> }.into_any(),
                ConfigStatus::Failed(msg) => view! {
                    <div class="page-error">
                        <p>{msg}</p>
                        <button on:click=move |_| config_ctx.load()>"Reintentar"</button>
                    </div>
                }.into_any(),
                ConfigStatus::Ready(config) => view! { <SettingsForm initial=config /> }.into_any(),
            }}
        </section>
    }
}
