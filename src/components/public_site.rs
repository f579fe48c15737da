//! Public Site
//!
//! What invitees see: event details, a countdown, the venues, and the RSVP
//! form. No login.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::form_fields::{toggle_id, CheckField, OptionChecklist, OptionSelect, TextField};
use crate::context::use_app_context;
use crate::countdown::{format_event_date, now_utc, remaining, validate_rsvp};
use crate::models::{Location, PlusOneInput, PublicEvent, RsvpSubmission};
use crate::text::{capitalize_words, non_empty};

#[component]
fn CountdownView(target: chrono::DateTime<chrono::Utc>) -> impl IntoView {
    let (now, set_now) = signal(now_utc());

    match set_interval_with_handle(move || set_now.set(now_utc()), Duration::from_secs(1)) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::warn!("[PUBLIC] Countdown timer unavailable: {:?}", e),
    }

    let countdown = move || remaining(now.get(), target);

    view! {
        <div class="countdown">
            <Show
                when=move || !countdown().is_over()
                fallback=|| view! { <p class="countdown-over">"¡Ha llegado el gran día!"</p> }
            >
                <div class="countdown-unit"><span>{move || countdown().days}</span>"días"</div>
                <div class="countdown-unit"><span>{move || countdown().hours}</span>"horas"</div>
                <div class="countdown-unit"><span>{move || countdown().minutes}</span>"min"</div>
                <div class="countdown-unit"><span>{move || countdown().seconds}</span>"seg"</div>
            </Show>
        </div>
    }
}

#[component]
fn LocationCard(location: Location) -> impl IntoView {
    view! {
        <div class="location-card">
            <h3>{location.name}</h3>
            {location.starts_at.map(|t| view! { <p class="location-time">{t}</p> })}
            {location.address.map(|a| view! { <p class="location-address">{a}</p> })}
            {location.description.map(|d| view! { <p class="location-description">{d}</p> })}
            {location.map_url.map(|url| view! {
                <a class="location-map" href=url target="_blank" rel="noopener">"Cómo llegar"</a>
            })}
        </div>
    }
}

/// Companion being entered on the RSVP form
#[derive(Clone, Copy)]
struct CompanionDraft {
    key: u32,
    data: RwSignal<PlusOneInput>,
}

#[component]
fn RsvpForm(event: PublicEvent) -> impl IntoView {
    let ctx = use_app_context();
    let deadline = event.rsvp_deadline;
    let menu_options: Vec<(u32, String)> = event.menus.into_iter().map(|m| (m.id, m.name)).collect();
    let allergy_options: Vec<(u32, String)> = event.allergies.into_iter().map(|a| (a.id, a.name)).collect();
    let menu_options = Signal::derive(move || menu_options.clone());
    let allergy_options = Signal::derive(move || allergy_options.clone());

    let form = RwSignal::new(RsvpSubmission { attending: true, ..Default::default() });
    let companions = RwSignal::new(Vec::<CompanionDraft>::new());
    let next_key = StoredValue::new(0u32);
    let (error, set_error) = signal::<Option<String>>(None);
    let (sending, set_sending) = signal(false);
    let (sent, set_sent) = signal(false);

    let closed = deadline.is_some_and(|d| now_utc() > d);

    let add_companion = move |_| {
        let key = next_key.get_value();
        next_key.set_value(key + 1);
        companions.update(|list| list.push(CompanionDraft { key, data: RwSignal::new(PlusOneInput::default()) }));
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut submission = form.get_untracked();
        submission.first_name = capitalize_words(submission.first_name.trim());
        submission.last_name = capitalize_words(submission.last_name.trim());
        submission.plus_ones = if submission.attending {
            companions.get_untracked().iter().map(|c| c.data.get_untracked()).collect()
        } else {
            Vec::new()
        };

        if let Err(e) = validate_rsvp(&submission, now_utc(), deadline) {
            set_error.set(Some(e.to_string()));
            return;
        }

        set_error.set(None);
        set_sending.set(true);
        spawn_local(async move {
            match api::submit_rsvp(&submission).await {
                Ok(()) => {
                    log::info!("[PUBLIC] RSVP sent for {} {}", submission.first_name, submission.last_name);
                    set_sent.set(true);
                }
                Err(e) => {
                    log::error!("[PUBLIC] RSVP failed: {}", e);
                    set_error.set(Some(e.user_message()));
                    ctx.notify_error(e.user_message());
                }
            }
            set_sending.set(false);
        });
    };

    if closed {
        return view! { <p class="rsvp-closed">"El plazo de confirmación ha terminado."</p> }.into_any();
    }

    let attending = Signal::derive(move || form.with(|f| f.attending));

    view! {
        <Show
            when=move || !sent.get()
            fallback=|| view! { <p class="rsvp-thanks">"¡Gracias! Hemos recibido tu respuesta."</p> }
        >
            <form class="rsvp-form" on:submit=on_submit>
                <TextField
                    label="Nombre"
                    value=Signal::derive(move || form.with(|f| f.first_name.clone()))
                    on_input=move |v: String| form.update(|f| f.first_name = v)
                />
                <TextField
                    label="Apellidos"
                    value=Signal::derive(move || form.with(|f| f.last_name.clone()))
                    on_input=move |v: String| form.update(|f| f.last_name = v)
                />
                <TextField
                    label="Teléfono"
                    input_type="tel"
                    value=Signal::derive(move || form.with(|f| f.phone.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|f| f.phone = non_empty(&v))
                />
                <TextField
                    label="Email"
                    input_type="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|f| f.email = non_empty(&v))
                />

                <div class="rsvp-attending">
                    <label>
                        <input
                            type="radio"
                            name="attending"
                            prop:checked=move || attending.get()
                            on:change=move |_| form.update(|f| f.attending = true)
                        />
                        "Asistiré"
                    </label>
                    <label>
                        <input
                            type="radio"
                            name="attending"
                            prop:checked=move || !attending.get()
                            on:change=move |_| form.update(|f| f.attending = false)
                        />
                        "No podré asistir"
                    </label>
                </div>

                <Show when=move || attending.get()>
                    <OptionSelect
                        label="Menú"
                        options=menu_options
                        selected=Signal::derive(move || form.with(|f| f.menu_id))
                        on_change=move |id| form.update(|f| f.menu_id = id)
                    />
                    <OptionChecklist
                        label="Alergias"
                        options=allergy_options
                        selected=Signal::derive(move || form.with(|f| f.allergy_ids.clone()))
                        on_toggle=move |id: u32| form.update(|f| toggle_id(&mut f.allergy_ids, id))
                    />
                    <CheckField
                        label="Necesito hotel"
                        checked=Signal::derive(move || form.with(|f| f.needs_hotel))
                        on_change=move |v: bool| form.update(|f| f.needs_hotel = v)
                    />
                    <CheckField
                        label="Necesito transporte de ida"
                        checked=Signal::derive(move || form.with(|f| f.needs_transport))
                        on_change=move |v: bool| form.update(|f| f.needs_transport = v)
                    />
                    <CheckField
                        label="Necesito transporte de vuelta"
                        checked=Signal::derive(move || form.with(|f| f.needs_transport_back))
                        on_change=move |v: bool| form.update(|f| f.needs_transport_back = v)
                    />

                    <fieldset class="plus-ones">
                        <legend>"Acompañantes"</legend>
                        <For
                            each=move || companions.get()
                            key=|draft| draft.key
                            children=move |draft| {
                                let data = draft.data;
                                let key = draft.key;
                                view! {
                                    <div class="plus-one-row">
                                        <TextField
                                            label="Nombre"
                                            value=Signal::derive(move || data.with(|p| p.first_name.clone()))
                                            on_input=move |v: String| data.update(|p| p.first_name = v)
                                        />
                                        <TextField
                                            label="Apellidos"
                                            value=Signal::derive(move || data.with(|p| p.last_name.clone()))
                                            on_input=move |v: String| data.update(|p| p.last_name = v)
                                        />
                                        <OptionSelect
                                            label="Menú"
                                            options=menu_options
                                            selected=Signal::derive(move || data.with(|p| p.menu_id))
                                            on_change=move |id| data.update(|p| p.menu_id = id)
                                        />
                                        <OptionChecklist
                                            label="Alergias"
                                            options=allergy_options
                                            selected=Signal::derive(move || data.with(|p| p.allergy_ids.clone()))
                                            on_toggle=move |id: u32| data.update(|p| toggle_id(&mut p.allergy_ids, id))
                                        />
                                        <button
                                            type="button"
                                            class="remove-plus-one-btn"
                                            on:click=move |_| companions.update(|list| list.retain(|d| d.key != key))
                                        >
                                            "Quitar"
                                        </button>
                                    </div>
                                }
                            }
                        />
                        <button type="button" class="add-plus-one-btn" on:click=add_companion>"+ Añadir acompañante"</button>
                    </fieldset>
                </Show>

                <TextField
                    label="Comentarios"
                    multiline=true
                    value=Signal::derive(move || form.with(|f| f.observations.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|f| f.observations = non_empty(&v))
                />

                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <button type="submit" class="primary" disabled=move || sending.get()>
                    {move || if sending.get() { "Enviando..." } else { "Enviar respuesta" }}
                </button>
            </form>
        </Show>
    }
    .into_any()
}

#[component]
pub fn PublicSite() -> impl IntoView {
    let (event, set_event) = signal::<Option<PublicEvent>>(None);
    let (failed, set_failed) = signal(false);

    spawn_local(async move {
        match api::get_public_event().await {
            Ok(info) => set_event.set(Some(info)),
            Err(e) => {
                log::error!("[PUBLIC] Event info failed: {}", e);
                set_failed.set(true);
            }
        }
    });

    view! {
        <main class="public-site">
            {move || {
                if failed.get() {
                    return view! { <p class="page-error">"No se pudo cargar la información del evento."</p> }.into_any();
                }
                let Some(info) = event.get() else {
                    return view! { <p class="loading">"Cargando..."</p> }.into_any();
                };
                let style = info
                    .background_image_url
                    .as_ref()
                    .map(|url| format!("background-image: url('{}');", url))
                    .unwrap_or_default();
                let couple_names = info.couple_names.clone();
                let event_date = info.event_date;
                let rsvp_deadline = info.rsvp_deadline;
                let welcome = info.welcome_message.clone();
                let locations = info.locations.clone();
                view! {
                    <header class="public-hero" style=style>
                        <h1>{couple_names}</h1>
                        {event_date.map(|d| view! { <p class="public-date">{format_event_date(d)}</p> })}
                        {welcome.map(|m| view! { <p class="public-welcome">{m}</p> })}
                        {event_date.map(|d| view! { <CountdownView target=d /> })}
                    </header>
                    <section class="public-locations">
                        {locations.into_iter().map(|l| view! { <LocationCard location=l /> }).collect_view()}
                    </section>
                    <section class="public-rsvp">
                        <h2>"Confirma tu asistencia"</h2>
                        {rsvp_deadline.map(|d| view! { <p class="rsvp-deadline">{format!("Antes del {}", format_event_date(d))}</p> })}
                        <RsvpForm event=info />
                    </section>
                }
                .into_any()
            }}
        </main>
    }
}
