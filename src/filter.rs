//! Guest Filter Engine
//!
//! Keeps the rows matching every active filter. Filters other than menu and
//! allergies are evaluated per family: a row passes when its main guest or
//! any companion of that guest matches.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::GuestRow;
use crate::text::{normalize_text, YES};

/// Filterable row fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    FullName,
    Phone,
    Email,
    Menu,
    AccommodationPlan,
    Observations,
    Allergies,
    Tags,
    Validated,
    NeedsHotel,
    NeedsTransport,
    NeedsTransportBack,
    Disability,
}

impl FilterKey {
    pub const BOOLEAN: [FilterKey; 5] = [
        FilterKey::Validated,
        FilterKey::NeedsHotel,
        FilterKey::NeedsTransport,
        FilterKey::NeedsTransportBack,
        FilterKey::Disability,
    ];

    pub fn is_boolean(self) -> bool {
        Self::BOOLEAN.contains(&self)
    }

    /// Menu and allergy filters look at each row on its own
    pub fn is_relational(self) -> bool {
        !matches!(self, FilterKey::Menu | FilterKey::Allergies)
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterKey::FullName => "Nombre",
            FilterKey::Phone => "Teléfono",
            FilterKey::Email => "Email",
            FilterKey::Menu => "Menú",
            FilterKey::AccommodationPlan => "Alojamiento",
            FilterKey::Observations => "Observaciones",
            FilterKey::Allergies => "Alergias",
            FilterKey::Tags => "Etiquetas",
            FilterKey::Validated => "Validado",
            FilterKey::NeedsHotel => "Hotel",
            FilterKey::NeedsTransport => "Transporte ida",
            FilterKey::NeedsTransportBack => "Transporte vuelta",
            FilterKey::Disability => "Movilidad reducida",
        }
    }
}

/// Value of one filter. Blank text and empty lists are inactive.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    /// Tag names, all required
    Tags(Vec<String>),
    /// Allergy ids, any suffices
    Allergies(Vec<u32>),
}

impl FilterValue {
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Text(text) => !text.trim().is_empty(),
            FilterValue::Tags(names) => names.iter().any(|n| !n.trim().is_empty()),
            FilterValue::Allergies(ids) => !ids.is_empty(),
        }
    }
}

pub type Filters = BTreeMap<FilterKey, FilterValue>;

fn text_field(row: &GuestRow, key: FilterKey) -> String {
    match key {
        FilterKey::FullName => row.full_name.clone(),
        FilterKey::Phone => row.phone.clone().unwrap_or_default(),
        FilterKey::Email => row.email.clone().unwrap_or_default(),
        FilterKey::Menu => row.menu.clone(),
        FilterKey::AccommodationPlan => row.accommodation_plan.clone().unwrap_or_default(),
        FilterKey::Observations => row.observations.clone().unwrap_or_default(),
        FilterKey::Allergies => row.allergies.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", "),
        FilterKey::Tags => row.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", "),
        FilterKey::Validated => row.validated.to_string(),
        FilterKey::NeedsHotel => row.needs_hotel.to_string(),
        FilterKey::NeedsTransport => row.needs_transport.to_string(),
        FilterKey::NeedsTransportBack => row.needs_transport_back.to_string(),
        FilterKey::Disability => row.disability.to_string(),
    }
}

fn bool_field(row: &GuestRow, key: FilterKey) -> Option<bool> {
    match key {
        FilterKey::Validated => Some(row.validated),
        FilterKey::NeedsHotel => Some(row.needs_hotel),
        FilterKey::NeedsTransport => Some(row.needs_transport),
        FilterKey::NeedsTransportBack => Some(row.needs_transport_back),
        FilterKey::Disability => Some(row.disability),
        _ => None,
    }
}

/// Does this single row satisfy the filter, ignoring family relations
pub fn row_matches(row: &GuestRow, key: FilterKey, value: &FilterValue) -> bool {
    match (key, value) {
        (FilterKey::Tags, FilterValue::Tags(wanted)) => {
            let names: HashSet<String> = row.tags.iter().map(|t| t.name.to_lowercase()).collect();
            wanted
                .iter()
                .map(|w| w.trim())
                .filter(|w| !w.is_empty())
                .all(|w| names.contains(&w.to_lowercase()))
        }
        (FilterKey::Allergies, FilterValue::Allergies(ids)) => {
            row.allergies.iter().any(|a| ids.contains(&a.id))
        }
        (key, FilterValue::Text(text)) if key.is_boolean() => {
            bool_field(row, key) == Some(text.trim() == YES)
        }
        (FilterKey::Menu, FilterValue::Text(text)) => row.menu.to_lowercase() == text.trim().to_lowercase(),
        (FilterKey::FullName, FilterValue::Text(text)) => {
            normalize_text(&row.full_name).contains(&normalize_text(text.trim()))
        }
        (key, FilterValue::Text(text)) => {
            text_field(row, key).to_lowercase().contains(&text.trim().to_lowercase())
        }
        (key, value) => {
            log::warn!("[FILTER] Value {:?} does not apply to {:?}, ignoring", value, key);
            true
        }
    }
}

/// Set a text filter; blank text removes it
pub fn set_text_filter(filters: &mut Filters, key: FilterKey, text: &str) {
    if text.trim().is_empty() {
        filters.remove(&key);
    } else {
        filters.insert(key, FilterValue::Text(text.to_string()));
    }
}

/// Add or remove one tag name from the tag filter
pub fn toggle_tag_filter(filters: &mut Filters, name: &str) {
    let mut names = match filters.remove(&FilterKey::Tags) {
        Some(FilterValue::Tags(names)) => names,
        _ => Vec::new(),
    };
    match names.iter().position(|n| n.to_lowercase() == name.to_lowercase()) {
        Some(idx) => {
            names.remove(idx);
        }
        None => names.push(name.to_string()),
    }
    if !names.is_empty() {
        filters.insert(FilterKey::Tags, FilterValue::Tags(names));
    }
}

/// Add or remove one allergy id from the allergy filter
pub fn toggle_allergy_filter(filters: &mut Filters, allergy_id: u32) {
    let mut ids = match filters.remove(&FilterKey::Allergies) {
        Some(FilterValue::Allergies(ids)) => ids,
        _ => Vec::new(),
    };
    match ids.iter().position(|id| *id == allergy_id) {
        Some(idx) => {
            ids.remove(idx);
        }
        None => ids.push(allergy_id),
    }
    if !ids.is_empty() {
        filters.insert(FilterKey::Allergies, FilterValue::Allergies(ids));
    }
}

/// Current text of a filter, empty when unset
pub fn text_filter(filters: &Filters, key: FilterKey) -> String {
    match filters.get(&key) {
        Some(FilterValue::Text(text)) => text.clone(),
        _ => String::new(),
    }
}

/// Keep rows passing every active filter. No active filters is the identity.
pub fn apply_filters(rows: &[GuestRow], filters: &Filters) -> Vec<GuestRow> {
    let active: Vec<(FilterKey, &FilterValue)> = filters
        .iter()
        .filter(|(_, value)| value.is_active())
        .map(|(key, value)| (*key, value))
        .collect();
    if active.is_empty() {
        return rows.to_vec();
    }

    // For relational keys, a family passes if any member matches
    let mut family_passes: HashMap<FilterKey, HashSet<u32>> = HashMap::new();
    for (key, value) in active.iter().filter(|(key, _)| key.is_relational()) {
        let families = rows
            .iter()
            .filter(|row| row_matches(row, *key, value))
            .map(GuestRow::family_id)
            .collect();
        family_passes.insert(*key, families);
    }

    rows.iter()
        .filter(|row| {
            active.iter().all(|(key, value)| match family_passes.get(key) {
                Some(families) => families.contains(&row.family_id()),
                None => row_matches(row, *key, value),
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guest_rows::{flatten_guests, NO_MENU};
    use crate::models::{Guest, NamedRef, PlusOne};

    fn named(id: u32, name: &str) -> NamedRef {
        NamedRef { id, name: name.to_string() }
    }

    fn make_plus_one(id: u32, first_name: &str) -> PlusOne {
        PlusOne { id, first_name: first_name.to_string(), ..Default::default() }
    }

    fn make_guest(id: u32, first_name: &str, plus_ones: Vec<PlusOne>) -> Guest {
        Guest { id, first_name: first_name.to_string(), plus_ones, ..Default::default() }
    }

    fn rows_of(guests: &[Guest]) -> Vec<GuestRow> {
        flatten_guests(guests, &[], &[]).rows
    }

    fn keys(rows: &[GuestRow]) -> Vec<(bool, u32)> {
        rows.iter().map(GuestRow::row_key).collect()
    }

    fn one(key: FilterKey, value: FilterValue) -> Filters {
        let mut filters = Filters::new();
        filters.insert(key, value);
        filters
    }

    fn sample() -> Vec<GuestRow> {
        let mut ana = make_guest(1, "Ana", vec![make_plus_one(10, "Bob")]);
        ana.tags = vec![named(1, "VIP"), named(2, "Family")];
        ana.needs_hotel = true;
        let mut luis = make_guest(2, "Luis", vec![make_plus_one(11, "Eva")]);
        luis.tags = vec![named(1, "vip")];
        luis.plus_ones[0].allergies = vec![named(3, "Nuts")];
        let mut marta = make_guest(3, "Marta", vec![]);
        marta.allergies = vec![named(4, "Gluten")];
        rows_of(&[ana, luis, marta])
    }

    #[test]
    fn test_empty_filters_are_identity() {
        let rows = sample();
        assert_eq!(apply_filters(&rows, &Filters::new()), rows);

        let mut blank = Filters::new();
        blank.insert(FilterKey::FullName, FilterValue::Text("   ".to_string()));
        blank.insert(FilterKey::Tags, FilterValue::Tags(vec![]));
        assert_eq!(apply_filters(&rows, &blank), rows);
    }

    #[test]
    fn test_full_name_pulls_in_companion() {
        let rows = rows_of(&[make_guest(1, "Ana", vec![make_plus_one(10, "Bob")])]);
        assert_eq!(rows.len(), 2);

        let filtered = apply_filters(&rows, &one(FilterKey::FullName, FilterValue::Text("ana".to_string())));
        assert_eq!(keys(&filtered), vec![(true, 1), (false, 10)]);
    }

    #[test]
    fn test_companion_match_pulls_in_main_and_siblings() {
        let rows = rows_of(&[
            make_guest(1, "Ana", vec![make_plus_one(10, "Bob"), make_plus_one(11, "Eva")]),
            make_guest(2, "Luis", vec![]),
        ]);

        let filtered = apply_filters(&rows, &one(FilterKey::FullName, FilterValue::Text("bob".to_string())));
        assert_eq!(keys(&filtered), vec![(true, 1), (false, 10), (false, 11)]);
    }

    #[test]
    fn test_full_name_ignores_accents() {
        let rows = rows_of(&[make_guest(1, "José", vec![]), make_guest(2, "Jorge", vec![])]);

        let filtered = apply_filters(&rows, &one(FilterKey::FullName, FilterValue::Text("JOSE".to_string())));
        assert_eq!(keys(&filtered), vec![(true, 1)]);
    }

    #[test]
    fn test_tags_require_every_name() {
        let rows = sample();

        let vip = apply_filters(&rows, &one(FilterKey::Tags, FilterValue::Tags(vec!["VIP".to_string()])));
        let main_ids: Vec<u32> = vip.iter().filter(|r| r.is_main_guest).map(|r| r.id).collect();
        assert_eq!(main_ids, vec![1, 2]);

        let both = apply_filters(
            &rows,
            &one(FilterKey::Tags, FilterValue::Tags(vec!["vip".to_string(), "FAMILY".to_string()])),
        );
        let main_ids: Vec<u32> = both.iter().filter(|r| r.is_main_guest).map(|r| r.id).collect();
        assert_eq!(main_ids, vec![1]);
    }

    #[test]
    fn test_tag_row_match_is_direct() {
        let rows = sample();
        let tagged: Vec<&GuestRow> = rows
            .iter()
            .filter(|r| row_matches(r, FilterKey::Tags, &FilterValue::Tags(vec!["VIP".to_string()])))
            .collect();
        assert!(tagged.iter().all(|r| r.tags.iter().any(|t| t.name.eq_ignore_ascii_case("vip"))));
    }

    #[test]
    fn test_allergies_any_overlap_without_relations() {
        let rows = sample();

        let filtered = apply_filters(&rows, &one(FilterKey::Allergies, FilterValue::Allergies(vec![3])));
        assert_eq!(keys(&filtered), vec![(false, 11)]);

        let either = apply_filters(&rows, &one(FilterKey::Allergies, FilterValue::Allergies(vec![3, 4])));
        assert_eq!(keys(&either), vec![(false, 11), (true, 3)]);
    }

    #[test]
    fn test_menu_filter_is_per_row() {
        let mut ana = make_guest(1, "Ana", vec![make_plus_one(10, "Bob")]);
        ana.plus_ones[0].menu_id = Some(1);
        let menus = vec![crate::models::Menu { id: 1, name: "Vegano".to_string() }];
        let rows = flatten_guests(&[ana], &menus, &[]).rows;

        let filtered = apply_filters(&rows, &one(FilterKey::Menu, FilterValue::Text("vegano".to_string())));
        assert_eq!(keys(&filtered), vec![(false, 10)]);
    }

    #[test]
    fn test_menu_filter_is_exact() {
        let menus = vec![
            crate::models::Menu { id: 1, name: "Carne".to_string() },
            crate::models::Menu { id: 2, name: "Carne sin gluten".to_string() },
        ];
        let mut ana = make_guest(1, "Ana", vec![]);
        ana.menu_id = Some(1);
        let mut luis = make_guest(2, "Luis", vec![]);
        luis.menu_id = Some(2);
        let rows = flatten_guests(&[ana, luis, make_guest(3, "Marta", vec![])], &menus, &[]).rows;

        let carne = apply_filters(&rows, &one(FilterKey::Menu, FilterValue::Text("carne".to_string())));
        assert_eq!(keys(&carne), vec![(true, 1)]);

        let unset = apply_filters(&rows, &one(FilterKey::Menu, FilterValue::Text(NO_MENU.to_string())));
        assert_eq!(keys(&unset), vec![(true, 3)]);
    }

    #[test]
    fn test_family_key_with_per_row_key() {
        // Luis matches by name; only his companion Eva has the allergy
        let rows = sample();
        let mut filters = Filters::new();
        filters.insert(FilterKey::FullName, FilterValue::Text("luis".to_string()));
        filters.insert(FilterKey::Allergies, FilterValue::Allergies(vec![3]));

        let filtered = apply_filters(&rows, &filters);
        assert_eq!(keys(&filtered), vec![(false, 11)]);

        // Gluten belongs to Marta, whose family fails the name filter
        filters.insert(FilterKey::Allergies, FilterValue::Allergies(vec![4]));
        assert!(apply_filters(&rows, &filters).is_empty());
    }

    #[test]
    fn test_boolean_si_and_no() {
        let mut ana = make_guest(1, "Ana", vec![]);
        ana.needs_hotel = true;
        let rows = rows_of(&[ana, make_guest(2, "Luis", vec![])]);

        let yes = apply_filters(&rows, &one(FilterKey::NeedsHotel, FilterValue::Text("Sí".to_string())));
        assert_eq!(keys(&yes), vec![(true, 1)]);

        let no = apply_filters(&rows, &one(FilterKey::NeedsHotel, FilterValue::Text("No".to_string())));
        assert_eq!(keys(&no), vec![(true, 2)]);
    }

    #[test]
    fn test_default_substring_case_insensitive() {
        let mut ana = make_guest(1, "Ana", vec![]);
        ana.email = Some("Ana.Lopez@Example.com".to_string());
        let rows = rows_of(&[ana, make_guest(2, "Luis", vec![])]);

        let filtered = apply_filters(&rows, &one(FilterKey::Email, FilterValue::Text("lopez@".to_string())));
        assert_eq!(keys(&filtered), vec![(true, 1)]);
    }

    #[test]
    fn test_all_filters_must_pass() {
        let rows = sample();
        let mut filters = Filters::new();
        filters.insert(FilterKey::Tags, FilterValue::Tags(vec!["VIP".to_string()]));
        filters.insert(FilterKey::NeedsHotel, FilterValue::Text("Sí".to_string()));

        let filtered = apply_filters(&rows, &filters);
        assert_eq!(keys(&filtered), vec![(true, 1), (false, 10)]);
    }

    #[test]
    fn test_filter_editing_helpers() {
        let mut filters = Filters::new();
        set_text_filter(&mut filters, FilterKey::FullName, "ana");
        assert_eq!(text_filter(&filters, FilterKey::FullName), "ana");
        set_text_filter(&mut filters, FilterKey::FullName, "  ");
        assert!(filters.is_empty());

        toggle_tag_filter(&mut filters, "VIP");
        toggle_tag_filter(&mut filters, "Family");
        assert_eq!(
            filters.get(&FilterKey::Tags),
            Some(&FilterValue::Tags(vec!["VIP".to_string(), "Family".to_string()]))
        );
        toggle_tag_filter(&mut filters, "vip");
        toggle_tag_filter(&mut filters, "Family");
        assert!(!filters.contains_key(&FilterKey::Tags));

        toggle_allergy_filter(&mut filters, 3);
        assert_eq!(filters.get(&FilterKey::Allergies), Some(&FilterValue::Allergies(vec![3])));
        toggle_allergy_filter(&mut filters, 3);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_mismatched_value_is_ignored() {
        let rows = sample();
        let filtered = apply_filters(&rows, &one(FilterKey::Phone, FilterValue::Allergies(vec![1])));
        assert_eq!(filtered, rows);
    }
}
