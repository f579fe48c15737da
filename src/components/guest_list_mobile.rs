//! Mobile Guest List Component
//!
//! Filtered rows re-nested as cards: main guest with companions underneath.

use leptos::prelude::*;

use crate::guest_rows::GuestGroup;
use crate::models::GuestRow;
use crate::text::yes_no;

#[component]
fn CompanionLine(row: GuestRow) -> impl IntoView {
    view! {
        <li class="companion-line">
            <span class="companion-name">{row.full_name}</span>
            <span class="companion-menu">{row.menu}</span>
        </li>
    }
}

#[component]
pub fn GuestListMobile(
    #[prop(into)] groups: Signal<Vec<GuestGroup>>,
    #[prop(into)] on_edit: Callback<u32>,
) -> impl IntoView {
    view! {
        <div class="guest-cards">
            <For
                each=move || groups.get()
                key=|group| group.clone()
                children=move |group| {
                    let guest_id = group.guest_id;
                    let companions = group.companions.len();
                    let header = match group.main {
                        Some(main) => view! {
                            <div class="guest-card-header">
                                <span class="guest-card-name">{main.full_name}</span>
                                <span class=if main.validated { "badge validated" } else { "badge pending" }>
                                    {if main.validated { "Validado" } else { "Pendiente" }}
                                </span>
                            </div>
                            <div class="guest-card-meta">
                                <span>{format!("Menú: {}", main.menu)}</span>
                                <span>{format!("Hotel: {}", yes_no(main.needs_hotel))}</span>
                                <span>{format!("Transporte: {}", yes_no(main.needs_transport))}</span>
                            </div>
                        }.into_any(),
                        None => view! {
                            <div class="guest-card-header">
                                <span class="guest-card-name muted">"Acompañantes"</span>
                            </div>
                        }.into_any(),
                    };
                    view! {
                        <div class="guest-card" on:click=move |_| on_edit.run(guest_id)>
                            {header}
                            {(companions > 0).then(|| view! {
                                <ul class="companion-list">
                                    {group.companions.into_iter().map(|row| view! { <CompanionLine row=row /> }).collect_view()}
                                </ul>
                            })}
                        </div>
                    }
                }
            />
        </div>
    }
}
