//! Contacts Page
//!
//! Suppliers and helpers for the day, each shareable as a vCard QR code.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::run_mutation;
use crate::api;
use crate::components::form_fields::TextField;
use crate::components::DeleteConfirmButton;
use crate::context::{use_app_context, AppContext};
use crate::models::Contact;
use crate::text::non_empty;
use crate::vcard::{qr_svg, to_vcard};

async fn load_contacts(ctx: AppContext, set_contacts: WriteSignal<Vec<Contact>>) {
    match api::list_contacts().await {
        Ok(list) => set_contacts.set(list),
        Err(e) => ctx.report(&e),
    }
}

#[component]
fn ContactQrModal(contact: Contact, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let card = to_vcard(&contact);
    let body = match qr_svg(&card) {
        Ok(svg) => view! { <div class="qr-code" inner_html=svg></div> }.into_any(),
        Err(e) => {
            log::error!("[CONTACTS] QR for {} failed: {}", contact.id, e);
            view! { <p class="form-error">"No se pudo generar el código QR"</p> }.into_any()
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal qr-modal" on:click=|ev| ev.stop_propagation()>
                <h2>{contact.name}</h2>
                {body}
                <pre class="vcard-text">{card}</pre>
                <div class="modal-footer">
                    <button type="button" on:click=move |_| on_close.run(())>"Cerrar"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ContactForm(contact: Contact, #[prop(into)] on_saved: Callback<()>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let is_new = contact.id == 0;
    let form = RwSignal::new(contact);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut contact = form.get_untracked();
        contact.name = contact.name.trim().to_string();
        if contact.name.is_empty() {
            ctx.notify_error("El nombre es obligatorio");
            return;
        }
        spawn_local(async move {
            let saved = if is_new {
                run_mutation(ctx, "Contacto creado", api::create_contact(&contact)).await
            } else {
                run_mutation(ctx, "Contacto actualizado", api::update_contact(&contact)).await
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
                <h2>{if is_new { "Nuevo contacto" } else { "Editar contacto" }}</h2>
                <TextField
                    label="Nombre"
                    value=Signal::derive(move || form.with(|c| c.name.clone()))
                    on_input=move |v: String| form.update(|c| c.name = v)
                />
                <TextField
                    label="Función"
                    value=Signal::derive(move || form.with(|c| c.role.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|c| c.role = non_empty(&v))
                />
                <TextField
                    label="Teléfono"
                    input_type="tel"
                    value=Signal::derive(move || form.with(|c| c.phone.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|c| c.phone = non_empty(&v))
                />
                <TextField
                    label="Email"
                    input_type="email"
                    value=Signal::derive(move || form.with(|c| c.email.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|c| c.email = non_empty(&v))
                />
                <TextField
                    label="Notas"
                    multiline=true
                    value=Signal::derive(move || form.with(|c| c.notes.clone().unwrap_or_default()))
                    on_input=move |v: String| form.update(|c| c.notes = non_empty(&v))
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
pub fn ContactsPage() -> impl IntoView {
    let ctx = use_app_context();
    let (contacts, set_contacts) = signal(Vec::<Contact>::new());
    let (editing, set_editing) = signal::<Option<Contact>>(None);
    let (sharing, set_sharing) = signal::<Option<Contact>>(None);

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        spawn_local(load_contacts(ctx, set_contacts));
    });

    let reload = Callback::new(move |_| spawn_local(load_contacts(ctx, set_contacts)));

    view! {
        <section class="page contacts-page">
            <header class="page-header">
                <h1>"Contactos"</h1>
                <button class="primary" on:click=move |_| set_editing.set(Some(Contact::default()))>"+ Nuevo contacto"</button>
            </header>
            <ul class="card-list">
                <For
                    each=move || contacts.get()
                    key=|contact| format!("{:?}", contact)
                    children=move |contact| {
                        let id = contact.id;
                        let for_edit = contact.clone();
                        let for_share = contact.clone();
                        view! {
                            <li class="card">
                                <div class="card-title">{contact.name}</div>
                                {contact.role.map(|r| view! { <div class="card-meta">{r}</div> })}
                                {contact.phone.map(|p| view! { <a class="card-link" href=format!("tel:{}", p)>{p.clone()}</a> })}
                                {contact.email.map(|e| view! { <a class="card-link" href=format!("mailto:{}", e)>{e.clone()}</a> })}
                                <div class="card-actions">
                                    <button class="qr-btn" title="Código QR" on:click=move |_| set_sharing.set(Some(for_share.clone()))>"QR"</button>
                                    <button class="edit-btn" on:click=move |_| set_editing.set(Some(for_edit.clone()))>"✎"</button>
                                    <DeleteConfirmButton
                                        button_class="delete-btn"
                                        on_confirm=move |_| spawn_local(async move {
                                            if run_mutation(ctx, "Contacto eliminado", api::delete_contact(id)).await.is_some() {
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
            {move || editing.get().map(|contact| view! {
                <ContactForm contact=contact on_saved=reload on_close=move |_| set_editing.set(None) />
            })}
            {move || sharing.get().map(|contact| view! {
                <ContactQrModal contact=contact on_close=move |_| set_sharing.set(None) />
            })}
        </section>
    }
}
