//! Menu and Allergy Endpoints
//!
//! Both catalogs are plain `{id, name}` lists.

use serde::Serialize;

use crate::models::{Allergy, Menu};
use super::routes::{self, ALLERGIES, MENUS};
use super::{ApiClient, ApiError};

#[derive(Serialize)]
pub struct NameArgs<'a> {
    pub name: &'a str,
}

// ========================
// Menus
// ========================

pub async fn list_menus() -> Result<Vec<Menu>, ApiError> {
    ApiClient::authenticated().get(MENUS).await
}

pub async fn create_menu(name: &str) -> Result<Menu, ApiError> {
    ApiClient::authenticated().post(MENUS, &NameArgs { name }).await
}

pub async fn update_menu(id: u32, name: &str) -> Result<Menu, ApiError> {
    ApiClient::authenticated().put(&routes::item(MENUS, id), &NameArgs { name }).await
}

pub async fn delete_menu(id: u32) -> Result<(), ApiError> {
    ApiClient::authenticated().delete(&routes::item(MENUS, id)).await
}

// ========================
// Allergies
// ========================

pub async fn list_allergies() -> Result<Vec<Allergy>, ApiError> {
    ApiClient::authenticated().get(ALLERGIES).await
}

pub async fn create_allergy(name: &str) -> Result<Allergy, ApiError> {
    ApiClient::authenticated().post(ALLERGIES, &NameArgs { name }).await
}

pub async fn update_allergy(id: u32, name: &str) -> Result<Allergy, ApiError> {
    ApiClient::authenticated().put(&routes::item(ALLERGIES, id), &NameArgs { name }).await
}

pub async fn delete_allergy(id: u32) -> Result<(), ApiError> {
    ApiClient::authenticated().delete(&routes::item(ALLERGIES, id)).await
}
