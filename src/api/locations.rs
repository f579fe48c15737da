//! Location Endpoints

use crate::models::Location;
use super::routes::{self, LOCATIONS};
use super::{ApiClient, ApiError};

pub async fn list_locations() -> Result<Vec<Location>, ApiError> {
    ApiClient::authenticated().get(LOCATIONS).await
}

pub async fn create_location(location: &Location) -> Result<Location, ApiError> {
    ApiClient::authenticated().post(LOCATIONS, location).await
}

pub async fn update_location(location: &Location) -> Result<Location, ApiError> {
    ApiClient::authenticated()
        .put(&routes::item(LOCATIONS, location.id), location)
        .await
}

pub async fn delete_location(id: u32) -> Result<(), ApiError> {
    ApiClient::authenticated().delete(&routes::item(LOCATIONS, id)).await
}
