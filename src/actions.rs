//! Guest Data Actions
//!
//! Load and mutation handlers for the guests page. Every write is followed by
//! a full refetch; guest form submissions also patch the cache first.

use std::collections::{BTreeSet, HashSet};

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError};
use crate::context::AppContext;
use crate::models::{Guest, GuestInput, GuestRow};
use crate::store::{store_patch_guest, store_set_guest_data, AppStateStoreFields, AppStore, GuestData};

/// Fan out the four list calls; any failure fails the whole load
pub async fn fetch_guest_data() -> Result<GuestData, ApiError> {
    let (guests, tags, menus, allergies) = futures::try_join!(
        api::list_guests(),
        api::list_tags(),
        api::list_menus(),
        api::list_allergies(),
    )?;
    Ok(GuestData { guests, tags, menus, allergies })
}

/// Reload everything. On failure the previous snapshot stays in place.
pub async fn refresh_guest_data(store: AppStore, ctx: AppContext) {
    store.loading().set(true);
    match fetch_guest_data().await {
        Ok(data) => {
            log::info!(
                "[GUESTS] Loaded {} guests, {} tags, {} menus, {} allergies",
                data.guests.len(),
                data.tags.len(),
                data.menus.len(),
                data.allergies.len()
            );
            store_set_guest_data(&store, data);
            store.error().set(None);
        }
        Err(e) => {
            store.error().set(Some(e.user_message()));
            ctx.report(&e);
        }
    }
    store.loading().set(false);
}

// ========================
// Guest Mutations
// ========================

/// Create or update, depending on whether the guest already exists
pub async fn save_guest(guest_id: Option<u32>, input: &GuestInput) -> Result<Guest, ApiError> {
    match guest_id {
        Some(id) => api::update_guest(id, input).await,
        None => api::create_guest(input).await,
    }
}

/// Apply a saved guest locally right away, then reconcile with the server
pub fn handle_guest_submitted(store: AppStore, ctx: AppContext, guest: Guest) {
    log::debug!("[GUESTS] Patching guest {} locally", guest.id);
    store_patch_guest(&store, guest);
    spawn_local(refresh_guest_data(store, ctx));
}

pub async fn delete_guest(store: AppStore, ctx: AppContext, guest_id: u32) -> bool {
    match api::delete_guest(guest_id).await {
        Ok(()) => {
            ctx.notify_success("Invitado eliminado");
            refresh_guest_data(store, ctx).await;
            true
        }
        Err(e) => {
            ctx.report(&e);
            false
        }
    }
}

// ========================
// Bulk Actions
// ========================

/// Which guest a bulk action should touch for the selected rows.
/// Selecting a plus-one targets its owning guest.
pub fn selected_guest_ids(rows: &[GuestRow], selection: &HashSet<(bool, u32)>) -> Vec<u32> {
    rows.iter()
        .filter(|row| selection.contains(&row.row_key()))
        .map(GuestRow::family_id)
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulkAction {
    Validate,
    AssignTag(u32),
    RemoveTag(u32),
}

impl BulkAction {
    fn success_message(self, count: usize) -> String {
        match self {
            BulkAction::Validate => format!("{} invitados validados", count),
            BulkAction::AssignTag(_) => format!("Etiqueta asignada a {} invitados", count),
            BulkAction::RemoveTag(_) => format!("Etiqueta quitada de {} invitados", count),
        }
    }
}

/// One call for the whole batch; a failure is reported once
pub async fn run_bulk_action(store: AppStore, ctx: AppContext, action: BulkAction, guest_ids: Vec<u32>) -> bool {
    if guest_ids.is_empty() {
        return false;
    }
    let result = match action {
        BulkAction::Validate => api::bulk_validate_guests(&guest_ids).await,
        BulkAction::AssignTag(tag_id) => api::bulk_assign_tag(tag_id, &guest_ids).await,
        BulkAction::RemoveTag(tag_id) => api::bulk_remove_tag(tag_id, &guest_ids).await,
    };
    match result {
        Ok(()) => {
            ctx.notify_success(action.success_message(guest_ids.len()));
            refresh_guest_data(store, ctx).await;
            true
        }
        Err(e) => {
            ctx.report(&e);
            false
        }
    }
}

// ========================
// Simple Entity Mutations
// ========================

/// Await a single write, toast the outcome, and hand back the value on success
pub async fn run_mutation<T, F>(ctx: AppContext, success: &str, call: F) -> Option<T>
where
    F: std::future::Future<Output = Result<T, ApiError>>,
{
    match call.await {
        Ok(value) => {
            ctx.notify_success(success);
            Some(value)
        }
        Err(e) => {
            ctx.report(&e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guest_rows::flatten_guests;
    use crate::models::PlusOne;

    fn rows() -> Vec<GuestRow> {
        let guests = vec![
            Guest {
                id: 1,
                first_name: "Ana".to_string(),
                plus_ones: vec![PlusOne { id: 10, first_name: "Bob".to_string(), ..Default::default() }],
                ..Default::default()
            },
            Guest { id: 2, first_name: "Luis".to_string(), ..Default::default() },
            Guest { id: 3, first_name: "Marta".to_string(), ..Default::default() },
        ];
        flatten_guests(&guests, &[], &[]).rows
    }

    #[test]
    fn test_selected_plus_one_targets_parent() {
        let selection: HashSet<(bool, u32)> = [(false, 10), (true, 3)].into_iter().collect();
        assert_eq!(selected_guest_ids(&rows(), &selection), vec![1, 3]);
    }

    #[test]
    fn test_selected_ids_are_distinct() {
        let selection: HashSet<(bool, u32)> = [(true, 1), (false, 10)].into_iter().collect();
        assert_eq!(selected_guest_ids(&rows(), &selection), vec![1]);
    }

    #[test]
    fn test_selection_of_missing_rows_ignored() {
        let selection: HashSet<(bool, u32)> = [(true, 99)].into_iter().collect();
        assert!(selected_guest_ids(&rows(), &selection).is_empty());
    }

    #[test]
    fn test_bulk_messages() {
        assert_eq!(BulkAction::Validate.success_message(3), "3 invitados validados");
        assert_eq!(BulkAction::AssignTag(1).success_message(2), "Etiqueta asignada a 2 invitados");
    }
}
