//! Tag Endpoints

use serde::Serialize;

use crate::models::Tag;
use super::routes::{self, TAGS, TAGS_BULK_ASSIGN, TAGS_BULK_REMOVE};
use super::{ApiClient, ApiError};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
pub struct TagArgs<'a> {
    pub name: &'a str,
}

#[derive(Serialize)]
struct BulkTagArgs<'a> {
    tag_id: u32,
    guest_ids: &'a [u32],
}

// ========================
// Tag CRUD
// ========================

pub async fn list_tags() -> Result<Vec<Tag>, ApiError> {
    ApiClient::authenticated().get(TAGS).await
}

pub async fn create_tag(args: &TagArgs<'_>) -> Result<Tag, ApiError> {
    ApiClient::authenticated().post(TAGS, args).await
}

pub async fn update_tag(id: u32, args: &TagArgs<'_>) -> Result<Tag, ApiError> {
    ApiClient::authenticated().put(&routes::item(TAGS, id), args).await
}

pub async fn delete_tag(id: u32) -> Result<(), ApiError> {
    ApiClient::authenticated().delete(&routes::item(TAGS, id)).await
}

// ========================
// Guest-Tag Bulk Assignment
// ========================

pub async fn bulk_assign_tag(tag_id: u32, guest_ids: &[u32]) -> Result<(), ApiError> {
    ApiClient::authenticated()
        .post_unit(TAGS_BULK_ASSIGN, &BulkTagArgs { tag_id, guest_ids })
        .await
}

pub async fn bulk_remove_tag(tag_id: u32, guest_ids: &[u32]) -> Result<(), ApiError> {
    ApiClient::authenticated()
        .post_unit(TAGS_BULK_REMOVE, &BulkTagArgs { tag_id, guest_ids })
        .await
}
