//! Guest Endpoints
//!
//! Guests are created and updated with their plus-ones inline.

use serde::Serialize;
use serde_json::Value;

use crate::guest_rows::decode_guests;
use crate::models::{Guest, GuestInput};
use super::routes::{self, GUESTS, GUESTS_BULK_VALIDATE};
use super::{ApiClient, ApiError};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct GuestIdsArgs<'a> {
    guest_ids: &'a [u32],
}

// ========================
// Guest CRUD
// ========================

/// Guest list with nested plus-ones. A malformed payload yields no guests.
pub async fn list_guests() -> Result<Vec<Guest>, ApiError> {
    let payload: Value = ApiClient::authenticated().get(GUESTS).await?;
    Ok(decode_guests(&payload))
}

pub async fn create_guest(input: &GuestInput) -> Result<Guest, ApiError> {
    ApiClient::authenticated().post(GUESTS, input).await
}

pub async fn update_guest(id: u32, input: &GuestInput) -> Result<Guest, ApiError> {
    ApiClient::authenticated().put(&routes::item(GUESTS, id), input).await
}

pub async fn delete_guest(id: u32) -> Result<(), ApiError> {
    ApiClient::authenticated().delete(&routes::item(GUESTS, id)).await
}

// ========================
// Bulk Actions
// ========================

/// Mark every listed guest as validated in one call
pub async fn bulk_validate_guests(guest_ids: &[u32]) -> Result<(), ApiError> {
    ApiClient::authenticated()
        .post_unit(GUESTS_BULK_VALIDATE, &GuestIdsArgs { guest_ids })
        .await
}
