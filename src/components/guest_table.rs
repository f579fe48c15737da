//! Guest Table Component
//!
//! Desktop table of flattened rows with selection for bulk actions.
//! Companions are edited through their main guest.

use std::collections::HashSet;

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::export::cell_text;
use crate::models::GuestRow;
use crate::view_config::{GuestColumn, VisibleColumns};

#[component]
pub fn GuestTable(
    #[prop(into)] rows: Signal<Vec<GuestRow>>,
    #[prop(into)] columns: Signal<VisibleColumns>,
    selection: RwSignal<HashSet<(bool, u32)>>,
    /// Guest id to open in the form
    #[prop(into)] on_edit: Callback<u32>,
    #[prop(into)] on_delete: Callback<u32>,
) -> impl IntoView {
    let all_selected = move || {
        let rows = rows.get();
        !rows.is_empty() && selection.with(|s| rows.iter().all(|r| s.contains(&r.row_key())))
    };
    let toggle_all = move |_| {
        if all_selected() {
            selection.set(HashSet::new());
        } else {
            selection.set(rows.get().iter().map(GuestRow::row_key).collect());
        }
    };

    view! {
        <table class="guest-table">
            <thead>
                <tr>
                    <th class="select-col">
                        <input type="checkbox" prop:checked=all_selected on:change=toggle_all />
                    </th>
                    {move || columns.get().columns().into_iter().map(|c| view! { <th>{c.header()}</th> }).collect_view()}
                    <th class="actions-col"></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || rows.get()
                    key=|row| row.clone()
                    children=move |row| {
                        let key = row.row_key();
                        let guest_id = row.family_id();
                        let is_main = row.is_main_guest;
                        let row_class = if is_main { "guest-row main" } else { "guest-row companion" };
                        let cells = move || {
                            columns.get().columns().into_iter().map(|c| {
                                let class = if c == GuestColumn::FullName { "cell-name" } else { "cell" };
                                view! { <td class=class>{cell_text(&row, c)}</td> }
                            }).collect_view()
                        };
                        view! {
                            <tr class=row_class>
                                <td class="select-col">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || selection.with(|s| s.contains(&key))
                                        on:change=move |_| selection.update(|s| {
                                            if !s.remove(&key) {
                                                s.insert(key);
                                            }
                                        })
                                    />
                                </td>
                                {cells}
                                <td class="actions-col">
                                    <button class="edit-btn" title="Editar" on:click=move |_| on_edit.run(guest_id)>"✎"</button>
                                    {is_main.then(|| view! {
                                        <DeleteConfirmButton
                                            button_class="delete-btn"
                                            on_confirm=move |_| on_delete.run(guest_id)
                                        />
                                    })}
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
