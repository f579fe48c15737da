//! User Configuration Endpoints

use serde::Serialize;

use crate::models::UserConfig;
use super::routes::{USER_BACKGROUND, USER_CONFIG};
use super::{ApiClient, ApiError};

#[derive(Serialize)]
struct BackgroundArgs<'a> {
    background_image_url: &'a str,
}

pub async fn get_user_config() -> Result<UserConfig, ApiError> {
    ApiClient::authenticated().get(USER_CONFIG).await
}

pub async fn save_user_config(config: &UserConfig) -> Result<UserConfig, ApiError> {
    ApiClient::authenticated().put(USER_CONFIG, config).await
}

pub async fn set_background_image(url: &str) -> Result<UserConfig, ApiError> {
    ApiClient::authenticated()
        .put(USER_BACKGROUND, &BackgroundArgs { background_image_url: url })
        .await
}
