//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the last
//! fetched snapshot of the API data; the server stays the source of truth.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::guest_rows::{flatten_guests, patch_guest_rows};
use crate::models::{Allergy, Guest, GuestRow, Menu, NamedRef, Tag};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Guests as returned by the API
    pub guests: Vec<Guest>,
    /// Flattened guest + plus-one rows
    pub rows: Vec<GuestRow>,
    /// Distinct tag names present on guests (filter choices)
    pub row_tag_names: Vec<String>,
    /// Distinct allergies present on guests (filter choices)
    pub row_allergies: Vec<NamedRef>,
    pub tags: Vec<Tag>,
    pub menus: Vec<Menu>,
    pub allergies: Vec<Allergy>,
    /// A guest data load is in flight
    pub loading: bool,
    /// Last load error, shown inline
    pub error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Everything the guests page loads in one go
#[derive(Clone, Debug, Default)]
pub struct GuestData {
    pub guests: Vec<Guest>,
    pub tags: Vec<Tag>,
    pub menus: Vec<Menu>,
    pub allergies: Vec<Allergy>,
}

// ========================
// Store Helper Functions
// ========================

/// Replace the snapshot and rebuild the derived rows
pub fn store_set_guest_data(store: &AppStore, data: GuestData) {
    let flattened = flatten_guests(&data.guests, &data.menus, &data.allergies);
    store.rows().set(flattened.rows);
    store.row_tag_names().set(flattened.tag_names);
    store.row_allergies().set(flattened.allergies);
    store.guests().set(data.guests);
    store.tags().set(data.tags);
    store.menus().set(data.menus);
    store.allergies().set(data.allergies);
}

/// Merge a submitted guest into the cached snapshot ahead of the refetch
pub fn store_patch_guest(store: &AppStore, guest: Guest) {
    let menus = store.menus().get_untracked();
    let allergies = store.allergies().get_untracked();
    let patched = patch_guest_rows(&store.rows().get_untracked(), &guest, &menus, &allergies);
    store.rows().set(patched);

    let guests = store.guests();
    let mut guests = guests.write();
    match guests.iter_mut().find(|g| g.id == guest.id) {
        Some(existing) => *existing = guest,
        None => guests.push(guest),
    }
}

/// Find a cached guest by ID
pub fn store_find_guest(store: &AppStore, guest_id: u32) -> Option<Guest> {
    store.guests().read().iter().find(|g| g.id == guest_id).cloned()
}

/// Add or update a tag in the store
pub fn store_upsert_tag(store: &AppStore, tag: Tag) {
    let tags = store.tags();
    let mut tags = tags.write();
    match tags.iter_mut().find(|t| t.id == tag.id) {
        Some(existing) => *existing = tag,
        None => tags.push(tag),
    }
}

/// Remove a tag from the store by ID
pub fn store_remove_tag(store: &AppStore, tag_id: u32) {
    store.tags().write().retain(|tag| tag.id != tag_id);
}

pub fn store_set_menus(store: &AppStore, menus: Vec<Menu>) {
    store.menus().set(menus);
}

pub fn store_set_allergies(store: &AppStore, allergies: Vec<Allergy>) {
    store.allergies().set(allergies);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_guest(id: u32, first_name: &str) -> Guest {
        Guest { id, first_name: first_name.to_string(), ..Default::default() }
    }

    #[test]
    fn test_patch_guest_replaces_or_appends() {
        let store = Store::new(AppState::default());
        store_set_guest_data(&store, GuestData { guests: vec![make_guest(1, "Ana")], ..Default::default() });

        store_patch_guest(&store, make_guest(1, "Ana María"));
        store_patch_guest(&store, make_guest(2, "Luis"));

        let names: Vec<String> = store.guests().get_untracked().into_iter().map(|g| g.first_name).collect();
        assert_eq!(names, vec!["Ana María", "Luis"]);
        assert_eq!(store.rows().get_untracked().len(), 2);
    }

    #[test]
    fn test_upsert_tag_keeps_one_entry_per_id() {
        let store = Store::new(AppState::default());
        store_upsert_tag(&store, Tag { id: 1, name: "Vip".to_string() });
        store_upsert_tag(&store, Tag { id: 1, name: "Mesa Vip".to_string() });
        store_upsert_tag(&store, Tag { id: 2, name: "Amigos".to_string() });

        let tags = store.tags().get_untracked();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "Mesa Vip");
    }
}
