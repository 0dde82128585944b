use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of register and login
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, message = "Email is required."))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Body of the refresh endpoint: the (possibly expired) access token and
/// the refresh token issued with it
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Token is required."))]
    pub token: String,
    #[validate(length(min = 1, message = "Refresh token is required."))]
    pub refresh_token: String,
}
