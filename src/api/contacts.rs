//! Contact Endpoints

use crate::models::Contact;
use super::routes::{self, CONTACTS};
use super::{ApiClient, ApiError};

pub async fn list_contacts() -> Result<Vec<Contact>, ApiError> {
    ApiClient::authenticated().get(CONTACTS).await
}

pub async fn create_contact(contact: &Contact) -> Result<Contact, ApiError> {
    ApiClient::authenticated().post(CONTACTS, contact).await
}

pub async fn update_contact(contact: &Contact) -> Result<Contact, ApiError> {
    ApiClient::authenticated()
        .put(&routes::item(CONTACTS, contact.id), contact)
        .await
}

pub async fn delete_contact(id: u32) -> Result<(), ApiError> {
    ApiClient::authenticated().delete(&routes::item(CONTACTS, id)).await
}
