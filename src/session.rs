//! Login Session
//!
//! JWT and user profile persisted in `localStorage` under `token` and `user`.

use web_sys::Storage;

use crate::models::User;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    /// Build a session from stored values. A corrupt profile means logged out.
    pub fn from_stored(token: Option<String>, user_json: Option<String>) -> Option<Self> {
        let token = token.filter(|t| !t.trim().is_empty())?;
        let user = match serde_json::from_str::<User>(&user_json?) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("[SESSION] Stored user profile is unreadable: {}", e);
                return None;
            }
        };
        Some(Self { token, user })
    }

    pub fn display_name(&self) -> &str {
        self.user.display_name.as_deref().unwrap_or(&self.user.username)
    }
}

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read the current session from local storage
pub fn load() -> Option<Session> {
    let storage = storage()?;
    let token = storage.get_item(TOKEN_KEY).ok().flatten();
    let user = storage.get_item(USER_KEY).ok().flatten();
    Session::from_stored(token, user)
}

/// Token only, read at request time
pub fn stored_token() -> Option<String> {
    storage()?.get_item(TOKEN_KEY).ok().flatten().filter(|t| !t.is_empty())
}

pub fn save(session: &Session) -> Result<(), String> {
    let storage = storage().ok_or("localStorage unavailable")?;
    let user = serde_json::to_string(&session.user).map_err(|e| e.to_string())?;
    storage
        .set_item(TOKEN_KEY, &session.token)
        .and_then(|_| storage.set_item(USER_KEY, &user))
        .map_err(|e| format!("{:?}", e))
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored_valid() {
        let session = Session::from_stored(
            Some("jwt".to_string()),
            Some(r#"{"id":1,"username":"novios","display_name":"Ana y Luis"}"#.to_string()),
        )
        .unwrap();
        assert_eq!(session.token, "jwt");
        assert_eq!(session.display_name(), "Ana y Luis");
    }

    #[test]
    fn test_missing_token_is_logged_out() {
        assert!(Session::from_stored(None, Some(r#"{"id":1,"username":"x"}"#.to_string())).is_none());
        assert!(Session::from_stored(Some(" ".to_string()), Some(r#"{"id":1,"username":"x"}"#.to_string())).is_none());
    }

    #[test]
    fn test_corrupt_user_is_logged_out() {
        assert!(Session::from_stored(Some("jwt".to_string()), Some("{not json".to_string())).is_none());
        assert!(Session::from_stored(Some("jwt".to_string()), None).is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let session = Session::from_stored(Some("t".to_string()), Some(r#"{"id":2,"username":"admin"}"#.to_string())).unwrap();
        assert_eq!(session.display_name(), "admin");
    }
}
