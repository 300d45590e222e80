use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::{
    dto::auth::{UpdateProfileRequest, UserCounts, UserList, UserStats},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::UserSummary,
    response::ApiResponse,
    state::AppState,
};

const RECENT_USERS: u64 = 3;

pub async fn find_active_by_id<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<Option<UserModel>> {
    let user = Users::find_by_id(id)
        .filter(UserCol::IsActive.eq(true))
        .one(db)
        .await?;
    Ok(user)
}

pub async fn find_active_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> AppResult<Option<UserModel>> {
    let user = Users::find()
        .filter(UserCol::IsActive.eq(true))
        .filter(UserCol::Username.eq(username))
        .one(db)
        .await?;
    Ok(user)
}

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<UserList>> {
    let users: Vec<UserSummary> = Users::find()
        .filter(UserCol::IsActive.eq(true))
        .order_by_asc(UserCol::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(ApiResponse::success(
        "Users retrieved successfully",
        UserList {
            count: users.len(),
            users,
        },
    ))
}

pub async fn user_stats(state: &AppState) -> AppResult<ApiResponse<UserStats>> {
    let total_users = Users::find().count(state.db()).await?;
    let active_users = Users::find()
        .filter(UserCol::IsActive.eq(true))
        .count(state.db())
        .await?;

    let recent_users = Users::find()
        .order_by_desc(UserCol::CreatedAt)
        .limit(RECENT_USERS)
        .all(state.db())
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(ApiResponse::success(
        "User statistics retrieved successfully",
        UserStats {
            summary: UserCounts {
                total_users,
                active_users,
                inactive_users: total_users.saturating_sub(active_users),
            },
            recent_users,
        },
    ))
}

pub async fn update_profile(
    state: &AppState,
    user_id: i32,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<UserSummary>> {
    let email = payload.validate()?;

    let user = find_active_by_id(state.db(), user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if user.email == email {
        return Ok(ApiResponse::success("Profile unchanged", user.into()));
    }

    let taken = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .filter(UserCol::Id.ne(user_id))
        .one(state.db())
        .await?
        .is_some();
    if taken {
        return Err(AppError::DuplicateEmail);
    }

    let mut active: UserActive = user.into();
    active.email = Set(email);
    let user = active
        .update(state.db())
        .await
        .map_err(AppError::from_user_write)?;

    tracing::info!(user_id = user.id, "profile updated");
    Ok(ApiResponse::success("Profile updated", user.into()))
}

/// Soft delete: the row is kept with `is_active = false`. There is no way back.
pub async fn deactivate_user(state: &AppState, user_id: i32) -> AppResult<ApiResponse<UserSummary>> {
    let user = find_active_by_id(state.db(), user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = user.into();
    active.is_active = Set(false);
    let user = active.update(state.db()).await?;

    tracing::info!(user_id = user.id, "user deactivated");
    Ok(ApiResponse::success("User deactivated", user.into()))
}
