use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ErrorResponse;

/// Input rejected before any store access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("{field} must be at most {max} characters long")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("Search query is required")]
    EmptySearchQuery,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("ORM error")]
    Db(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Map a failed user insert/update onto the duplicate it reports, if any.
    pub fn from_user_write(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                duplicate_from_constraint(&detail).unwrap_or(AppError::Db(err))
            }
            _ => AppError::Db(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::DuplicateUsername
            | AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Db(err) => {
                tracing::error!(error = %err, "database failure");
                ErrorResponse::new("An unexpected error occurred", self.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "unexpected failure");
                ErrorResponse::new("An unexpected error occurred", self.to_string())
            }
            AppError::NotFound => ErrorResponse::new("Resource not found", self.to_string()),
            _ => ErrorResponse::new(self.to_string(), self.to_string()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

fn duplicate_from_constraint(detail: &str) -> Option<AppError> {
    if detail.contains("username") {
        Some(AppError::DuplicateUsername)
    } else if detail.contains("email") {
        Some(AppError::DuplicateEmail)
    } else {
        None
    }
}
