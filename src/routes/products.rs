use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::PathRejection},
    routing::get,
};

use crate::{
    dto::products::{InventorySummary, ProductDetail, ProductList, SearchQuery},
    error::AppResult,
    response::{ApiResponse, ErrorResponse},
    routes::path_param,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/inventory", get(inventory_summary))
        .route("/search", get(search_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/product",
    responses(
        (status = 200, description = "Active products ordered by category and name", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/product/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<ProductDetail>),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state, path_param(id)?).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/product/inventory",
    responses(
        (status = 200, description = "Stock totals and per-category breakdown", body = ApiResponse<InventorySummary>)
    ),
    tag = "Products"
)]
pub async fn inventory_summary(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<InventorySummary>>> {
    let resp = product_service::inventory_summary(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/product/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching active products", body = ApiResponse<ProductList>),
        (status = 400, description = "Empty query", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::search_products(&state, query).await?;
    Ok(Json(resp))
}
