use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    dto::auth::{CurrentUser, LoginRequest, LoginResponse, RegisterRequest, RegisteredUser},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::{
        password::{hash_password, verify_password},
        token_service::TokenSubject,
        user_service::find_active_by_username,
    },
    state::AppState,
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<RegisteredUser>> {
    let new_user = payload.validate()?;

    // Friendly pre-checks; the unique constraints still decide concurrent races.
    let username_taken = Users::find()
        .filter(UserCol::Username.eq(new_user.username.as_str()))
        .one(state.db())
        .await?
        .is_some();
    if username_taken {
        return Err(AppError::DuplicateUsername);
    }

    let email_taken = Users::find()
        .filter(UserCol::Email.eq(new_user.email.as_str()))
        .one(state.db())
        .await?
        .is_some();
    if email_taken {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = hash_password(&new_user.password)?;

    let user = UserActive {
        id: NotSet,
        username: Set(new_user.username),
        email: Set(new_user.email),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now().into()),
        is_active: Set(true),
    }
    .insert(state.db())
    .await
    .map_err(AppError::from_user_write)?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok(ApiResponse::success(
        "Registration completed successfully",
        RegisteredUser { user: user.into() },
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    payload.validate()?;

    // Unknown, deactivated and wrong-password logins all end in the same error.
    let Some(user) = find_active_by_username(state.db(), &payload.username).await? else {
        tracing::warn!("login rejected: unknown or inactive user");
        return Err(AppError::InvalidCredentials);
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(user_id = user.id, "login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }
        Err(err) => {
            tracing::error!(user_id = user.id, error = %err, "stored password hash is unusable");
            return Err(AppError::InvalidCredentials);
        }
    }

    let token = state.tokens.issue(&TokenSubject::from(&user), Utc::now())?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse::bearer(token),
    ))
}

pub fn current_user(user: &AuthUser) -> ApiResponse<CurrentUser> {
    ApiResponse::success(
        "Current user retrieved successfully",
        CurrentUser {
            user_id: user.user_id,
            username: user.username.clone(),
        },
    )
}
