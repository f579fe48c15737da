//! Public Site Endpoints (no authentication)

use crate::models::{PublicEvent, RsvpSubmission};
use super::routes::{PUBLIC_EVENT, PUBLIC_RSVP};
use super::{ApiClient, ApiError};

pub async fn get_public_event() -> Result<PublicEvent, ApiError> {
    ApiClient::public().get(PUBLIC_EVENT).await
}

pub async fn submit_rsvp(submission: &RsvpSubmission) -> Result<(), ApiError> {
    ApiClient::public().post_unit(PUBLIC_RSVP, submission).await
}
