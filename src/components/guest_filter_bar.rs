//! Guest Filter Bar Component
//!
//! Edits the page's filter set. Choices for tags and allergies come from the
//! values actually present on guests.

use leptos::prelude::*;

use crate::filter::{
    set_text_filter, text_filter, toggle_allergy_filter, toggle_tag_filter, FilterKey, FilterValue, Filters,
};
use crate::guest_rows::NO_MENU;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::text::{NO, YES};

const TEXT_KEYS: [FilterKey; 4] = [FilterKey::FullName, FilterKey::Phone, FilterKey::Email, FilterKey::AccommodationPlan];

#[component]
pub fn GuestFilterBar(filters: RwSignal<Filters>) -> impl IntoView {
    let store = use_app_store();

    let tag_checked = move |name: &str| {
        filters.with(|f| match f.get(&FilterKey::Tags) {
            Some(FilterValue::Tags(names)) => names.iter().any(|n| n.to_lowercase() == name.to_lowercase()),
            _ => false,
        })
    };
    let allergy_checked = move |id: u32| {
        filters.with(|f| matches!(f.get(&FilterKey::Allergies), Some(FilterValue::Allergies(ids)) if ids.contains(&id)))
    };
    let active_count = move || filters.with(|f| f.values().filter(|v| v.is_active()).count());

    view! {
        <div class="filter-bar">
            <div class="filter-row">
                {TEXT_KEYS.into_iter().map(|key| view! {
                    <input
                        type="search"
                        class="filter-input"
                        placeholder=key.label()
                        prop:value=move || filters.with(|f| text_filter(f, key))
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            filters.update(|f| set_text_filter(f, key, &value));
                        }
                    />
                }).collect_view()}

                <select
                    class="filter-select"
                    prop:value=move || filters.with(|f| text_filter(f, FilterKey::Menu))
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filters.update(|f| set_text_filter(f, FilterKey::Menu, &value));
                    }
                >
                    <option value="">"Menú: todos"</option>
                    <option value=NO_MENU>{NO_MENU}</option>
                    <For
                        each=move || store.menus().get()
                        key=|menu| menu.id
                        children=move |menu| view! { <option value=menu.name.clone()>{menu.name.clone()}</option> }
                    />
                </select>
            </div>

            <div class="filter-row">
                {FilterKey::BOOLEAN.into_iter().map(|key| view! {
                    <label class="filter-bool">
                        {key.label()}
                        <select
                            prop:value=move || filters.with(|f| text_filter(f, key))
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                filters.update(|f| set_text_filter(f, key, &value));
                            }
                        >
                            <option value="">"Todos"</option>
                            <option value=YES>{YES}</option>
                            <option value=NO>{NO}</option>
                        </select>
                    </label>
                }).collect_view()}
            </div>

            <div class="filter-row filter-chips">
                <span class="filter-chips-label">"Etiquetas (todas):"</span>
                <For
                    each=move || store.row_tag_names().get()
                    key=|name| name.clone()
                    children=move |name| {
                        let toggle_name = name.clone();
                        let check_name = name.clone();
                        view! {
                            <label class="filter-chip">
                                <input
                                    type="checkbox"
                                    prop:checked=move || tag_checked(&check_name)
                                    on:change=move |_| filters.update(|f| toggle_tag_filter(f, &toggle_name))
                                />
                                {name}
                            </label>
                        }
                    }
                />
            </div>

            <div class="filter-row filter-chips">
                <span class="filter-chips-label">"Alergias (alguna):"</span>
                <For
                    each=move || store.row_allergies().get()
                    key=|allergy| allergy.id
                    children=move |allergy| {
                        let id = allergy.id;
                        view! {
                            <label class="filter-chip">
                                <input
                                    type="checkbox"
                                    prop:checked=move || allergy_checked(id)
                                    on:change=move |_| filters.update(|f| toggle_allergy_filter(f, id))
                                />
                                {allergy.name}
                            </label>
                        }
                    }
                />
            </div>

            <Show when=move || { active_count() > 0 }>
                <button class="filter-clear-btn" on:click=move |_| filters.set(Filters::new())>
                    {move || format!("Quitar filtros ({})", active_count())}
                </button>
            </Show>
        </div>
    }
}
