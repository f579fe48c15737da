//! API Error
//!
//! The three failure kinds the UI distinguishes (server answered with an
//! error, no answer, request could not be built) plus undecodable bodies.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Response { status: u16, message: String },

    #[error("No response from server: {0}")]
    Network(String),

    #[error("Request setup failed: {0}")]
    Request(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub(super) fn from_send(error: reqwest::Error) -> Self {
        if error.is_builder() {
            ApiError::Request(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }

    /// Prefer the server's `message`/`error`/`detail` field over the raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let from_json = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            ["message", "error", "detail"]
                .iter()
                .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
        });
        let message = from_json
            .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| "Sin detalles".to_string());
        ApiError::Response { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Response { status: 401, .. })
    }

    /// Message shown to the user in a toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Response { status, message } => format!("Error {}: {}", status, message),
            ApiError::Network(_) => "No se recibió respuesta del servidor".to_string(),
            ApiError::Request(e) => format!("Error al preparar la solicitud: {}", e),
            ApiError::Decode(_) => "Respuesta inesperada del servidor".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_body() {
        let error = ApiError::from_status(422, r#"{"message":"Email duplicado"}"#);
        assert_eq!(error, ApiError::Response { status: 422, message: "Email duplicado".to_string() });
        assert_eq!(error.user_message(), "Error 422: Email duplicado");
    }

    #[test]
    fn test_message_from_error_field_and_plain_body() {
        let error = ApiError::from_status(500, r#"{"error":"boom"}"#);
        assert_eq!(error, ApiError::Response { status: 500, message: "boom".to_string() });

        let error = ApiError::from_status(502, "Bad Gateway\n");
        assert_eq!(error, ApiError::Response { status: 502, message: "Bad Gateway".to_string() });

        let error = ApiError::from_status(404, "");
        assert_eq!(error, ApiError::Response { status: 404, message: "Sin detalles".to_string() });
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(!ApiError::Network("offline".to_string()).is_unauthorized());
    }
}
