//! Guest Row Derivation
//!
//! Flattens guests with nested plus-ones into one row per person, and
//! re-nests filtered rows into family groups for the mobile list.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::models::{Allergy, Guest, GuestRow, Menu, NamedRef, PlusOne};
use crate::text::full_name;

/// Menu label used when a guest has no (known) menu
pub const NO_MENU: &str = "No ha especificado";

/// Output of [`flatten_guests`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedGuests {
    pub rows: Vec<GuestRow>,
    /// Distinct tag names, first-seen order
    pub tag_names: Vec<String>,
    /// Distinct allergies by id, first-seen order
    pub allergies: Vec<NamedRef>,
}

/// A main guest with its companions, for grouped presentation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuestGroup {
    pub guest_id: u32,
    /// None when only companions survived filtering
    pub main: Option<GuestRow>,
    pub companions: Vec<GuestRow>,
}

/// Decode the raw guest list payload. Anything but an array yields no guests.
pub fn decode_guests(payload: &Value) -> Vec<Guest> {
    let Some(entries) = payload.as_array() else {
        log::warn!("[GUESTS] Expected a guest array, got: {}", payload);
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<Guest>(entry.clone()) {
            Ok(guest) => Some(guest),
            Err(e) => {
                log::warn!("[GUESTS] Skipping undecodable guest {}: {}", entry, e);
                None
            }
        })
        .collect()
}

fn resolve_menu(menu_id: Option<u32>, menus: &HashMap<u32, &str>) -> String {
    menu_id
        .and_then(|id| menus.get(&id))
        .map(|name| name.to_string())
        .unwrap_or_else(|| NO_MENU.to_string())
}

fn resolve_allergies(allergies: &[NamedRef], catalog: &HashMap<u32, &str>) -> Vec<NamedRef> {
    allergies
        .iter()
        .map(|a| NamedRef {
            id: a.id,
            name: catalog.get(&a.id).map(|n| n.to_string()).unwrap_or_else(|| a.name.clone()),
        })
        .collect()
}

struct Lookups<'a> {
    menus: HashMap<u32, &'a str>,
    allergies: HashMap<u32, &'a str>,
}

impl<'a> Lookups<'a> {
    fn new(menus: &'a [Menu], allergies: &'a [Allergy]) -> Self {
        Self {
            menus: menus.iter().map(|m| (m.id, m.name.as_str())).collect(),
            allergies: allergies.iter().map(|a| (a.id, a.name.as_str())).collect(),
        }
    }
}

fn main_row(guest: &Guest, lookups: &Lookups) -> GuestRow {
    GuestRow {
        id: guest.id,
        first_name: guest.first_name.clone(),
        last_name: guest.last_name.clone(),
        full_name: full_name(&guest.first_name, &guest.last_name),
        is_main_guest: true,
        parent_id: None,
        phone: guest.phone.clone(),
        email: guest.email.clone(),
        menu_id: guest.menu_id,
        menu: resolve_menu(guest.menu_id, &lookups.menus),
        allergies: resolve_allergies(&guest.allergies, &lookups.allergies),
        tags: guest.tags.clone(),
        validated: guest.validated,
        accommodation_plan: guest.accommodation_plan.clone(),
        needs_hotel: guest.needs_hotel,
        needs_transport: guest.needs_transport,
        needs_transport_back: guest.needs_transport_back,
        disability: guest.disability,
        observations: guest.observations.clone(),
    }
}

/// Plus-ones have no logistics of their own: those come from the parent
fn plus_one_row(plus_one: &PlusOne, parent: &Guest, lookups: &Lookups) -> GuestRow {
    GuestRow {
        id: plus_one.id,
        first_name: plus_one.first_name.clone(),
        last_name: plus_one.last_name.clone(),
        full_name: full_name(&plus_one.first_name, &plus_one.last_name),
        is_main_guest: false,
        parent_id: Some(parent.id),
        phone: None,
        email: None,
        menu_id: plus_one.menu_id,
        menu: resolve_menu(plus_one.menu_id, &lookups.menus),
        allergies: resolve_allergies(&plus_one.allergies, &lookups.allergies),
        tags: Vec::new(),
        validated: parent.validated,
        accommodation_plan: parent.accommodation_plan.clone(),
        needs_hotel: parent.needs_hotel,
        needs_transport: parent.needs_transport,
        needs_transport_back: parent.needs_transport_back,
        disability: plus_one.disability,
        observations: plus_one.observations.clone(),
    }
}

fn guest_family_rows(guest: &Guest, lookups: &Lookups) -> Vec<GuestRow> {
    std::iter::once(main_row(guest, lookups))
        .chain(guest.plus_ones.iter().map(|p| plus_one_row(p, guest, lookups)))
        .collect()
}

/// One row per guest and per plus-one, in flat_map order
pub fn flatten_guests(guests: &[Guest], menus: &[Menu], allergies: &[Allergy]) -> FlattenedGuests {
    let lookups = Lookups::new(menus, allergies);
    let rows: Vec<GuestRow> = guests
        .iter()
        .flat_map(|guest| guest_family_rows(guest, &lookups))
        .collect();

    let mut seen_tags = HashSet::new();
    let mut tag_names = Vec::new();
    let mut seen_allergies = HashSet::new();
    let mut unique_allergies = Vec::new();
    for row in &rows {
        for tag in &row.tags {
            if seen_tags.insert(tag.name.to_lowercase()) {
                tag_names.push(tag.name.clone());
            }
        }
        for allergy in &row.allergies {
            if seen_allergies.insert(allergy.id) {
                unique_allergies.push(allergy.clone());
            }
        }
    }

    FlattenedGuests { rows, tag_names, allergies: unique_allergies }
}

/// Replace the rows of one guest with freshly derived ones (optimistic update)
pub fn patch_guest_rows(rows: &[GuestRow], guest: &Guest, menus: &[Menu], allergies: &[Allergy]) -> Vec<GuestRow> {
    let lookups = Lookups::new(menus, allergies);
    let mut fresh = Some(guest_family_rows(guest, &lookups));
    let mut patched = Vec::with_capacity(rows.len() + guest.plus_ones.len() + 1);

    for row in rows {
        if row.family_id() == guest.id {
            // Insert the whole family where its first row used to be
            if let Some(family) = fresh.take() {
                patched.extend(family);
            }
        } else {
            patched.push(row.clone());
        }
    }
    if let Some(family) = fresh {
        patched.extend(family);
    }
    patched
}

/// Re-nest rows into main guest + companions, first-seen order
pub fn group_rows(rows: &[GuestRow]) -> Vec<GuestGroup> {
    let mut order: Vec<u32> = Vec::new();
    let mut groups: HashMap<u32, GuestGroup> = HashMap::new();

    for row in rows {
        let guest_id = row.family_id();
        let group = groups.entry(guest_id).or_insert_with(|| {
            order.push(guest_id);
            GuestGroup { guest_id, main: None, companions: Vec::new() }
        });
        if row.is_main_guest {
            group.main = Some(row.clone());
        } else {
            group.companions.push(row.clone());
        }
    }

    order.into_iter().filter_map(|id| groups.remove(&id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(id: u32, name: &str) -> NamedRef {
        NamedRef { id, name: name.to_string() }
    }

    fn make_plus_one(id: u32, first_name: &str) -> PlusOne {
        PlusOne { id, first_name: first_name.to_string(), ..Default::default() }
    }

    fn make_guest(id: u32, first_name: &str, plus_ones: Vec<PlusOne>) -> Guest {
        Guest { id, first_name: first_name.to_string(), plus_ones, ..Default::default() }
    }

    fn menus() -> Vec<Menu> {
        vec![Menu { id: 1, name: "Vegano".to_string() }, Menu { id: 2, name: "Carne".to_string() }]
    }

    #[test]
    fn test_row_count_matches_people() {
        let guests = vec![
            make_guest(1, "ana", vec![make_plus_one(10, "bob"), make_plus_one(11, "eva")]),
            make_guest(2, "luis", vec![]),
            make_guest(3, "marta", vec![make_plus_one(12, "pepe")]),
        ];

        let flat = flatten_guests(&guests, &menus(), &[]);
        assert_eq!(flat.rows.len(), 3 + 3);
    }

    #[test]
    fn test_plus_one_parent_refers_to_one_main_row() {
        let guests = vec![
            make_guest(1, "ana", vec![make_plus_one(10, "bob")]),
            make_guest(2, "luis", vec![make_plus_one(11, "eva")]),
        ];

        let flat = flatten_guests(&guests, &[], &[]);
        for row in flat.rows.iter().filter(|r| !r.is_main_guest) {
            let parents = flat
                .rows
                .iter()
                .filter(|m| m.is_main_guest && Some(m.id) == row.parent_id)
                .count();
            assert_eq!(parents, 1);
        }
    }

    #[test]
    fn test_flat_map_order_and_flags() {
        let guests = vec![make_guest(1, "ana", vec![make_plus_one(10, "bob")]), make_guest(2, "luis", vec![])];

        let rows = flatten_guests(&guests, &[], &[]).rows;
        let ids: Vec<(bool, u32)> = rows.iter().map(|r| r.row_key()).collect();
        assert_eq!(ids, vec![(true, 1), (false, 10), (true, 2)]);
        assert_eq!(rows[1].parent_id, Some(1));
        assert_eq!(rows[0].parent_id, None);
    }

    #[test]
    fn test_menu_resolution_and_fallback() {
        let mut guest = make_guest(1, "ana", vec![make_plus_one(10, "bob"), make_plus_one(11, "eva")]);
        guest.menu_id = Some(2);
        guest.plus_ones[0].menu_id = Some(99);

        let rows = flatten_guests(&[guest], &menus(), &[]).rows;
        assert_eq!(rows[0].menu, "Carne");
        assert_eq!(rows[1].menu, NO_MENU);
        assert_eq!(rows[2].menu, NO_MENU);
    }

    #[test]
    fn test_plus_one_inherits_logistics() {
        let mut guest = make_guest(1, "ana", vec![make_plus_one(10, "bob")]);
        guest.needs_hotel = true;
        guest.needs_transport_back = true;
        guest.accommodation_plan = Some("Hotel Sol".to_string());
        guest.disability = true;

        let rows = flatten_guests(&[guest], &[], &[]).rows;
        let companion = &rows[1];
        assert!(companion.needs_hotel);
        assert!(!companion.needs_transport);
        assert!(companion.needs_transport_back);
        assert_eq!(companion.accommodation_plan.as_deref(), Some("Hotel Sol"));
        assert!(!companion.disability);
    }

    #[test]
    fn test_names_capitalized() {
        let mut guest = make_guest(1, "ana maría", vec![]);
        guest.last_name = "de la PEÑA".to_string();

        let rows = flatten_guests(&[guest], &[], &[]).rows;
        assert_eq!(rows[0].full_name, "Ana María De La Peña");
    }

    #[test]
    fn test_unique_tags_and_allergies() {
        let mut ana = make_guest(1, "ana", vec![make_plus_one(10, "bob")]);
        ana.tags = vec![named(1, "VIP"), named(2, "Familia")];
        ana.allergies = vec![named(3, "Nueces")];
        ana.plus_ones[0].allergies = vec![named(3, "Nueces"), named(4, "Gluten")];
        let mut luis = make_guest(2, "luis", vec![]);
        luis.tags = vec![named(1, "vip")];

        let flat = flatten_guests(&[ana, luis], &[], &[]);
        assert_eq!(flat.tag_names, vec!["VIP".to_string(), "Familia".to_string()]);
        assert_eq!(flat.allergies.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_allergy_names_refreshed_from_catalog() {
        let mut guest = make_guest(1, "ana", vec![]);
        guest.allergies = vec![named(3, ""), named(8, "Marisco")];
        let catalog = vec![Allergy { id: 3, name: "Nueces".to_string() }];

        let rows = flatten_guests(&[guest], &[], &catalog).rows;
        assert_eq!(rows[0].allergies, vec![named(3, "Nueces"), named(8, "Marisco")]);
    }

    #[test]
    fn test_decode_non_array_is_empty() {
        assert!(decode_guests(&json!({ "error": "nope" })).is_empty());
        assert!(decode_guests(&Value::Null).is_empty());
    }

    #[test]
    fn test_decode_skips_bad_entries() {
        let payload = json!([
            { "id": 1, "first_name": "Ana", "plus_ones": [{ "id": 10, "first_name": "Bob" }] },
            { "id": "not-a-number" }
        ]);
        let guests = decode_guests(&payload);
        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0].plus_ones[0].id, 10);
    }

    #[test]
    fn test_patch_replaces_family_in_place() {
        let guests = vec![
            make_guest(1, "ana", vec![make_plus_one(10, "bob")]),
            make_guest(2, "luis", vec![]),
        ];
        let rows = flatten_guests(&guests, &[], &[]).rows;

        let mut updated = make_guest(1, "anabel", vec![make_plus_one(10, "bob"), make_plus_one(13, "sol")]);
        updated.validated = true;
        let patched = patch_guest_rows(&rows, &updated, &[], &[]);

        let keys: Vec<(bool, u32)> = patched.iter().map(|r| r.row_key()).collect();
        assert_eq!(keys, vec![(true, 1), (false, 10), (false, 13), (true, 2)]);
        assert_eq!(patched[0].full_name, "Anabel");
        assert!(patched[2].validated);
    }

    #[test]
    fn test_patch_drops_removed_plus_one_and_appends_new_guest() {
        let guests = vec![make_guest(1, "ana", vec![make_plus_one(10, "bob")])];
        let rows = flatten_guests(&guests, &[], &[]).rows;

        let patched = patch_guest_rows(&rows, &make_guest(1, "ana", vec![]), &[], &[]);
        assert_eq!(patched.len(), 1);

        let patched = patch_guest_rows(&patched, &make_guest(5, "nuevo", vec![]), &[], &[]);
        assert_eq!(patched.last().map(|r| r.id), Some(5));
    }

    #[test]
    fn test_group_rows() {
        let guests = vec![
            make_guest(1, "ana", vec![make_plus_one(10, "bob"), make_plus_one(11, "eva")]),
            make_guest(2, "luis", vec![]),
        ];
        let rows = flatten_guests(&guests, &[], &[]).rows;

        let groups = group_rows(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].main.as_ref().map(|m| m.id), Some(1));
        assert_eq!(groups[0].companions.len(), 2);
        assert!(groups[1].companions.is_empty());
    }

    #[test]
    fn test_group_orphan_companions() {
        let guests = vec![make_guest(1, "ana", vec![make_plus_one(10, "bob")])];
        let rows: Vec<GuestRow> = flatten_guests(&guests, &[], &[])
            .rows
            .into_iter()
            .filter(|r| !r.is_main_guest)
            .collect();

        let groups = group_rows(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].guest_id, 1);
        assert!(groups[0].main.is_none());
    }
}
