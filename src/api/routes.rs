//! API Route Paths

pub const GUESTS: &str = "/guests";
pub const GUESTS_BULK_VALIDATE: &str = "/guests/bulk-validate";
pub const TAGS: &str = "/tags";
pub const TAGS_BULK_ASSIGN: &str = "/tags/bulk-assign";
pub const TAGS_BULK_REMOVE: &str = "/tags/bulk-remove";
pub const MENUS: &str = "/menus";
pub const ALLERGIES: &str = "/allergies";
pub const LOCATIONS: &str = "/locations";
pub const CONTACTS: &str = "/contacts";
pub const AUTH_LOGIN: &str = "/auth/login";
pub const USERS_ME: &str = "/users/me";
pub const USER_CONFIG: &str = "/users/me/config";
pub const USER_BACKGROUND: &str = "/users/me/config/background";
pub const PUBLIC_EVENT: &str = "/public/event";
pub const PUBLIC_RSVP: &str = "/public/rsvp";

/// `/collection/{id}`
pub fn item(collection: &str, id: u32) -> String {
    format!("{}/{}", collection, id)
}
