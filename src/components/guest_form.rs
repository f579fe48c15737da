//! Guest Form Modal
//!
//! Create or edit a guest together with their plus-ones. Removing a plus-one
//! here deletes it on save.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{handle_guest_submitted, save_guest};
use crate::components::form_fields::{toggle_id, CheckField, OptionChecklist, OptionSelect, TextField};
use crate::context::{use_app_context, use_user_config};
use crate::models::{Guest, GuestInput, PlusOneInput};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::text::non_empty;
use crate::view_config::GuestFormField;

/// Plus-one being edited, keyed for the list
#[derive(Clone, Copy)]
struct PlusOneDraft {
    key: u32,
    data: RwSignal<PlusOneInput>,
}

/// Drop unnamed companions and trim names before sending
fn finalize_input(mut input: GuestInput, plus_ones: Vec<PlusOneInput>) -> GuestInput {
    input.first_name = input.first_name.trim().to_string();
    input.last_name = input.last_name.trim().to_string();
    input.plus_ones = plus_ones
        .into_iter()
        .filter(|p| !p.first_name.trim().is_empty())
        .map(|mut p| {
            p.first_name = p.first_name.trim().to_string();
            p.last_name = p.last_name.trim().to_string();
            p
        })
        .collect();
    input
}

#[component]
pub fn GuestFormModal(
    /// None to create a new guest
    guest: Option<Guest>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let fields = use_user_config().visible_form_fields();

    let guest_id = guest.as_ref().map(|g| g.id);
    let initial = guest.as_ref().map(GuestInput::from).unwrap_or_default();
    let next_key = StoredValue::new(initial.plus_ones.len() as u32);
    let plus_ones = RwSignal::new(
        initial
            .plus_ones
            .iter()
            .enumerate()
            .map(|(i, p)| PlusOneDraft { key: i as u32, data: RwSignal::new(p.clone()) })
            .collect::<Vec<_>>(),
    );
    let form = RwSignal::new(initial);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let menu_options = Signal::derive(move || store.menus().get().into_iter().map(|m| (m.id, m.name)).collect::<Vec<_>>());
    let allergy_options =
        Signal::derive(move || store.allergies().get().into_iter().map(|a| (a.id, a.name)).collect::<Vec<_>>());
    let tag_options = Signal::derive(move || store.tags().get().into_iter().map(|t| (t.id, t.name)).collect::<Vec<_>>());

    let add_plus_one = move |_| {
        let key = next_key.get_value();
        next_key.set_value(key + 1);
        plus_ones.update(|list| list.push(PlusOneDraft { key, data: RwSignal::new(PlusOneInput::default()) }));
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let companions = plus_ones.get_untracked().iter().map(|d| d.data.get_untracked()).collect();
        let input = finalize_input(form.get_untracked(), companions);
        if input.first_name.is_empty() {
            set_error.set(Some("El nombre es obligatorio".to_string()));
            return;
        }

        set_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match save_guest(guest_id, &input).await {
                Ok(saved) => {
                    log::info!("[GUESTS] Saved guest {}", saved.id);
                    ctx.notify_success(if guest_id.is_some() { "Invitado actualizado" } else { "Invitado creado" });
                    handle_guest_submitted(store, ctx, saved);
                    on_close.run(());
                }
                Err(e) => {
                    ctx.report(&e);
                    set_error.set(Some(e.user_message()));
                    set_saving.set(false);
                }
            }
        });
    };

    let show = move |field: GuestFormField| fields.is_visible(field);
    let title = if guest_id.is_some() { "Editar invitado" } else { "Nuevo invitado" };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <form class="modal guest-form" on:click=|ev| ev.stop_propagation() on:submit=on_submit>
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button type="button" class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
                </div>

                <div class="form-grid">
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
                    {show(GuestFormField::Phone).then(|| view! {
                        <TextField
                            label="Teléfono"
                            input_type="tel"
                            value=Signal::derive(move || form.with(|f| f.phone.clone().unwrap_or_default()))
                            on_input=move |v: String| form.update(|f| f.phone = non_empty(&v))
                        />
                    })}
                    {show(GuestFormField::Email).then(|| view! {
                        <TextField
                            label="Email"
                            input_type="email"
                            value=Signal::derive(move || form.with(|f| f.email.clone().unwrap_or_default()))
                            on_input=move |v: String| form.update(|f| f.email = non_empty(&v))
                        />
                    })}
                    {show(GuestFormField::Menu).then(|| view! {
                        <OptionSelect
                            label="Menú"
                            options=menu_options
                            selected=Signal::derive(move || form.with(|f| f.menu_id))
                            on_change=move |id| form.update(|f| f.menu_id = id)
                        />
                    })}
                    {show(GuestFormField::AccommodationPlan).then(|| view! {
                        <TextField
                            label="Alojamiento"
                            value=Signal::derive(move || form.with(|f| f.accommodation_plan.clone().unwrap_or_default()))
                            on_input=move |v: String| form.update(|f| f.accommodation_plan = non_empty(&v))
                        />
                    })}
                </div>

                <div class="form-checks">
                    <CheckField
                        label="Validado"
                        checked=Signal::derive(move || form.with(|f| f.validated))
                        on_change=move |v: bool| form.update(|f| f.validated = v)
                    />
                    {show(GuestFormField::Logistics).then(|| view! {
                        <CheckField
                            label="Necesita hotel"
                            checked=Signal::derive(move || form.with(|f| f.needs_hotel))
                            on_change=move |v: bool| form.update(|f| f.needs_hotel = v)
                        />
                        <CheckField
                            label="Transporte ida"
                            checked=Signal::derive(move || form.with(|f| f.needs_transport))
                            on_change=move |v: bool| form.update(|f| f.needs_transport = v)
                        />
                        <CheckField
                            label="Transporte vuelta"
                            checked=Signal::derive(move || form.with(|f| f.needs_transport_back))
                            on_change=move |v: bool| form.update(|f| f.needs_transport_back = v)
                        />
                    })}
                    {show(GuestFormField::Disability).then(|| view! {
                        <CheckField
                            label="Movilidad reducida"
                            checked=Signal::derive(move || form.with(|f| f.disability))
                            on_change=move |v: bool| form.update(|f| f.disability = v)
                        />
                    })}
                </div>

                {show(GuestFormField::Allergies).then(|| view! {
                    <OptionChecklist
                        label="Alergias"
                        options=allergy_options
                        selected=Signal::derive(move || form.with(|f| f.allergy_ids.clone()))
                        on_toggle=move |id: u32| form.update(|f| toggle_id(&mut f.allergy_ids, id))
                    />
                })}
                {show(GuestFormField::Tags).then(|| view! {
                    <OptionChecklist
                        label="Etiquetas"
                        options=tag_options
                        selected=Signal::derive(move || form.with(|f| f.tag_ids.clone()))
                        on_toggle=move |id: u32| form.update(|f| toggle_id(&mut f.tag_ids, id))
                    />
                })}
                {show(GuestFormField::Observations).then(|| view! {
                    <TextField
                        label="Observaciones"
                        multiline=true
                        value=Signal::derive(move || form.with(|f| f.observations.clone().unwrap_or_default()))
                        on_input=move |v: String| form.update(|f| f.observations = non_empty(&v))
                    />
                })}

                {show(GuestFormField::PlusOnes).then(|| view! {
                    <fieldset class="plus-ones">
                        <legend>"Acompañantes"</legend>
                        <For
                            each=move || plus_ones.get()
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
                                        <CheckField
                                            label="Movilidad reducida"
                                            checked=Signal::derive(move || data.with(|p| p.disability))
                                            on_change=move |v: bool| data.update(|p| p.disability = v)
                                        />
                                        <button
                                            type="button"
                                            class="remove-plus-one-btn"
                                            on:click=move |_| plus_ones.update(|list| list.retain(|d| d.key != key))
                                        >
                                            "Quitar"
                                        </button>
                                    </div>
                                }
                            }
                        />
                        <button type="button" class="add-plus-one-btn" on:click=add_plus_one>"+ Añadir acompañante"</button>
                    </fieldset>
                })}

                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <div class="modal-footer">
                    <button type="button" on:click=move |_| on_close.run(())>"Cancelar"</button>
                    <button type="submit" class="primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_drops_unnamed_companions() {
        let input = GuestInput { first_name: "  Ana ".to_string(), ..Default::default() };
        let plus_ones = vec![
            PlusOneInput { id: Some(10), first_name: " Bob ".to_string(), ..Default::default() },
            PlusOneInput { first_name: "   ".to_string(), ..Default::default() },
        ];

        let finalized = finalize_input(input, plus_ones);
        assert_eq!(finalized.first_name, "Ana");
        assert_eq!(finalized.plus_ones.len(), 1);
        assert_eq!(finalized.plus_ones[0].first_name, "Bob");
        assert_eq!(finalized.plus_ones[0].id, Some(10));
    }
}
