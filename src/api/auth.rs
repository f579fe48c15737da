//! Authentication Endpoints

use serde::{Deserialize, Serialize};

use crate::models::User;
use super::routes::{AUTH_LOGIN, USERS_ME};
use super::{ApiClient, ApiError};

#[derive(Serialize)]
pub struct LoginArgs<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

pub async fn login(args: &LoginArgs<'_>) -> Result<LoginResponse, ApiError> {
    ApiClient::public().post(AUTH_LOGIN, args).await
}

/// Profile of the token holder; fails with 401 once the token expired
pub async fn current_user() -> Result<User, ApiError> {
    ApiClient::authenticated().get(USERS_ME).await
}
