//! Frontend Models
//!
//! Data structures matching the REST API entities, plus the derived guest row.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{id, name}` reference embedded in guests (allergies, tags)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// Guest record as returned by the API, with its plus-ones nested
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Guest {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub validated: bool,
    pub menu_id: Option<u32>,
    pub accommodation_plan: Option<String>,
    pub needs_hotel: bool,
    pub needs_transport: bool,
    pub needs_transport_back: bool,
    pub disability: bool,
    pub observations: Option<String>,
    pub allergies: Vec<NamedRef>,
    pub tags: Vec<NamedRef>,
    pub plus_ones: Vec<PlusOne>,
}

/// Companion owned by exactly one guest
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlusOne {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub menu_id: Option<u32>,
    pub allergies: Vec<NamedRef>,
    pub disability: bool,
    pub observations: Option<String>,
}

/// Flattened presentation of a guest or plus-one. Rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GuestRow {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub is_main_guest: bool,
    /// Owning guest id, set only for plus-ones
    pub parent_id: Option<u32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub menu_id: Option<u32>,
    /// Resolved menu name
    pub menu: String,
    pub allergies: Vec<NamedRef>,
    pub tags: Vec<NamedRef>,
    pub validated: bool,
    pub accommodation_plan: Option<String>,
    pub needs_hotel: bool,
    pub needs_transport: bool,
    pub needs_transport_back: bool,
    pub disability: bool,
    pub observations: Option<String>,
}

impl GuestRow {
    /// Id of the guest this row belongs to (itself for main guests)
    pub fn family_id(&self) -> u32 {
        self.parent_id.unwrap_or(self.id)
    }

    /// Stable key for keyed lists: guest and plus-one ids live in different tables
    pub fn row_key(&self) -> (bool, u32) {
        (self.is_main_guest, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allergy {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// Logged-in user profile, serialized into local storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Per-account settings shown on the public site and used by the console views
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub couple_names: String,
    pub event_date: Option<DateTime<Utc>>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    pub welcome_message: Option<String>,
    pub background_image_url: Option<String>,
    pub guest_table_columns: HashMap<String, bool>,
    pub guest_form_fields: HashMap<String, bool>,
}

/// Guest payload for create/update (plus-ones edited inline)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuestInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub validated: bool,
    pub menu_id: Option<u32>,
    pub accommodation_plan: Option<String>,
    pub needs_hotel: bool,
    pub needs_transport: bool,
    pub needs_transport_back: bool,
    pub disability: bool,
    pub observations: Option<String>,
    pub allergy_ids: Vec<u32>,
    pub tag_ids: Vec<u32>,
    pub plus_ones: Vec<PlusOneInput>,
}

/// Plus-one payload; `id` is None for newly added companions.
/// Companions missing from the list are deleted by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlusOneInput {
    pub id: Option<u32>,
    pub first_name: String,
    pub last_name: String,
    pub menu_id: Option<u32>,
    pub allergy_ids: Vec<u32>,
    pub disability: bool,
    pub observations: Option<String>,
}

impl From<&Guest> for GuestInput {
    fn from(guest: &Guest) -> Self {
        Self {
            first_name: guest.first_name.clone(),
            last_name: guest.last_name.clone(),
            phone: guest.phone.clone(),
            email: guest.email.clone(),
            validated: guest.validated,
            menu_id: guest.menu_id,
            accommodation_plan: guest.accommodation_plan.clone(),
            needs_hotel: guest.needs_hotel,
            needs_transport: guest.needs_transport,
            needs_transport_back: guest.needs_transport_back,
            disability: guest.disability,
            observations: guest.observations.clone(),
            allergy_ids: guest.allergies.iter().map(|a| a.id).collect(),
            tag_ids: guest.tags.iter().map(|t| t.id).collect(),
            plus_ones: guest.plus_ones.iter().map(PlusOneInput::from).collect(),
        }
    }
}

impl From<&PlusOne> for PlusOneInput {
    fn from(p: &PlusOne) -> Self {
        Self {
            id: Some(p.id),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            menu_id: p.menu_id,
            allergy_ids: p.allergies.iter().map(|a| a.id).collect(),
            disability: p.disability,
            observations: p.observations.clone(),
        }
    }
}

/// Public RSVP submission sent by invitees
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RsvpSubmission {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub attending: bool,
    pub menu_id: Option<u32>,
    pub allergy_ids: Vec<u32>,
    pub needs_hotel: bool,
    pub needs_transport: bool,
    pub needs_transport_back: bool,
    pub observations: Option<String>,
    pub plus_ones: Vec<PlusOneInput>,
}

/// Public event information (no auth)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicEvent {
    pub couple_names: String,
    pub event_date: Option<DateTime<Utc>>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    pub welcome_message: Option<String>,
    pub background_image_url: Option<String>,
    pub locations: Vec<Location>,
    pub menus: Vec<Menu>,
    pub allergies: Vec<Allergy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_guest_defaults_missing_fields() {
        let guest: Guest = serde_json::from_value(json!({
            "id": 7,
            "first_name": "ana",
            "plus_ones": [{ "id": 70, "first_name": "bob" }]
        }))
        .unwrap();

        assert_eq!(guest.id, 7);
        assert!(guest.last_name.is_empty());
        assert!(guest.menu_id.is_none());
        assert!(!guest.validated);
        assert_eq!(guest.plus_ones.len(), 1);
        assert!(guest.plus_ones[0].allergies.is_empty());
    }

    #[test]
    fn test_guest_input_keeps_plus_one_ids() {
        let guest = Guest {
            id: 1,
            first_name: "Ana".to_string(),
            tags: vec![NamedRef { id: 4, name: "VIP".to_string() }],
            plus_ones: vec![PlusOne { id: 10, first_name: "Bob".to_string(), ..Default::default() }],
            ..Default::default()
        };

        let input = GuestInput::from(&guest);
        assert_eq!(input.tag_ids, vec![4]);
        assert_eq!(input.plus_ones[0].id, Some(10));
    }

    #[test]
    fn test_family_id() {
        let main = GuestRow { id: 1, is_main_guest: true, ..Default::default() };
        let companion = GuestRow { id: 10, parent_id: Some(1), ..Default::default() };
        assert_eq!(main.family_id(), 1);
        assert_eq!(companion.family_id(), 1);
    }
}
