//! REST API Bindings
//!
//! Frontend bindings to the guest-management API, organized by domain.

mod error;
mod routes;
mod guests;
mod tags;
mod catalog;
mod locations;
mod contacts;
mod auth;
mod settings;
mod public;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::app_config;
use crate::session;

// Re-export all public items
pub use error::ApiError;
pub use guests::*;
pub use tags::*;
pub use catalog::*;
pub use locations::*;
pub use contacts::*;
pub use auth::*;
pub use settings::*;
pub use public::*;

/// HTTP client bound to the configured API root
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Client for protected routes, carrying the stored bearer token
    pub fn authenticated() -> Self {
        Self::with_token(session::stored_token())
    }

    /// Client for public routes
    pub fn public() -> Self {
        Self::with_token(None)
    }

    fn with_token(token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: app_config().api_base_url.clone(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = send(self.request(Method::POST, path).json(body)).await?;
        decode(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = send(self.request(Method::PUT, path).json(body)).await?;
        decode(response).await
    }

    /// POST whose response body is ignored
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        send(self.request(Method::POST, path).json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

/// Send and turn non-2xx statuses into [`ApiError::Response`]
async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = builder.send().await.map_err(ApiError::from_send)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let error = ApiError::from_status(status.as_u16(), &body);
    log::warn!("[API] {}", error);
    Err(error)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}
