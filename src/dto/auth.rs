use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::ValidationError,
    models::{User, UserSummary},
};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 255;

#[derive(Deserialize, Debug, ToSchema, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Registration input that passed validation. Fields are trimmed except the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty() || email.is_empty() || self.password.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
            });
        }
        if email.chars().count() > MAX_EMAIL_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }
        Ok(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password,
        })
    }
}

#[derive(Deserialize, Debug, ToSchema, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
}

impl LoginResponse {
    pub fn bearer(token: String) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: i32,
    pub username: String,
}

#[derive(Deserialize, Debug, ToSchema, Default)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub email: String,
}

impl UpdateProfileRequest {
    pub fn validate(self) -> Result<String, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if email.chars().count() > MAX_EMAIL_LEN {
            return Err(ValidationError::FieldTooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }
        Ok(email.to_string())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub count: usize,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCounts {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub summary: UserCounts,
    pub recent_users: Vec<UserSummary>,
}
