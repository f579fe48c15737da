//! Form Field Components
//!
//! Labelled inputs shared by the console forms and the public RSVP form.

use leptos::prelude::*;

/// Add the id if absent, remove it if present
pub fn toggle_id(ids: &mut Vec<u32>, id: u32) {
    match ids.iter().position(|x| *x == id) {
        Some(idx) => {
            ids.remove(idx);
        }
        None => ids.push(id),
    }
}

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let input_type = input_type.unwrap_or("text");
    let control = if multiline {
        view! {
            <textarea
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            {control}
        </label>
    }
}

#[component]
pub fn CheckField(
    label: &'static str,
    #[prop(into)] checked: Signal<bool>,
    #[prop(into)] on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <label class="form-check">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            {label}
        </label>
    }
}

/// Single choice among `(id, name)` options; the empty option means None
#[component]
pub fn OptionSelect(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(u32, String)>>,
    #[prop(into)] selected: Signal<Option<u32>>,
    #[prop(into)] on_change: Callback<Option<u32>>,
    #[prop(optional)] empty_label: Option<&'static str>,
) -> impl IntoView {
    let empty_label = empty_label.unwrap_or("Sin especificar");

    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <select
                prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                on:change=move |ev| on_change.run(event_target_value(&ev).parse().ok())
            >
                <option value="">{empty_label}</option>
                {move || options.get().into_iter().map(|(id, name)| {
                    let is_selected = selected.get_untracked() == Some(id);
                    view! { <option value=id.to_string() selected=is_selected>{name}</option> }
                }).collect_view()}
            </select>
        </label>
    }
}

/// Multiple choice among `(id, name)` options
#[component]
pub fn OptionChecklist(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(u32, String)>>,
    #[prop(into)] selected: Signal<Vec<u32>>,
    #[prop(into)] on_toggle: Callback<u32>,
) -> impl IntoView {
    view! {
        <fieldset class="form-checklist">
            <legend>{label}</legend>
            <For
                each=move || options.get()
                key=|(id, name)| (*id, name.clone())
                children=move |(id, name)| view! {
                    <label class="form-check">
                        <input
                            type="checkbox"
                            prop:checked=move || selected.with(|ids| ids.contains(&id))
                            on:change=move |_| on_toggle.run(id)
                        />
                        {name}
                    </label>
                }
            />
        </fieldset>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_id() {
        let mut ids = vec![1, 2];
        toggle_id(&mut ids, 3);
        assert_eq!(ids, vec![1, 2, 3]);
        toggle_id(&mut ids, 1);
        assert_eq!(ids, vec![2, 3]);
    }
}
