use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::{
    dto::auth::{
        CurrentUser, LoginRequest, LoginResponse, RegisterRequest, RegisteredUser,
        UpdateProfileRequest, UserList, UserStats,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::UserSummary,
    response::{ApiResponse, ErrorResponse},
    routes::json_body,
    services::{auth_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).put(update_me).delete(deactivate_me))
        .route("/users", get(list_users))
        .route("/lookup", get(lookup))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Register user", body = ApiResponse<RegisteredUser>),
        (status = 400, description = "Missing fields, short password or duplicate user", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<RegisteredUser>>> {
    let resp = auth_service::register_user(&state, json_body(payload)?).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_user(&state, json_body(payload)?).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Identity from the bearer token", body = ApiResponse<CurrentUser>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn me(user: AuthUser) -> Json<ApiResponse<CurrentUser>> {
    Json(auth_service::current_user(&user))
}

#[utoipa::path(
    put,
    path = "/api/auth/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<UserSummary>),
        (status = 400, description = "Invalid or duplicate email", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<UserSummary>>> {
    let resp = user_service::update_profile(&state, user.user_id, json_body(payload)?).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Account deactivated", body = ApiResponse<UserSummary>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found or already inactive", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn deactivate_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserSummary>>> {
    let resp = user_service::deactivate_user(&state, user.user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/auth/users",
    responses(
        (status = 200, description = "Active users", body = ApiResponse<UserList>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/auth/lookup",
    responses(
        (status = 200, description = "User counts and the newest accounts", body = ApiResponse<UserStats>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn lookup(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<UserStats>>> {
    let resp = user_service::user_stats(&state).await?;
    Ok(Json(resp))
}
