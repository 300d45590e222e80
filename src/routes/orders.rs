use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::orders::{OrderList, OrdersSummary},
    error::AppResult,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/summary", get(orders_summary))
}

#[utoipa::path(
    get,
    path = "/api/order",
    responses(
        (status = 200, description = "All orders, newest first, with customers and lines", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/order/summary",
    responses(
        (status = 200, description = "Revenue, status breakdown and recent orders", body = ApiResponse<OrdersSummary>)
    ),
    tag = "Orders"
)]
pub async fn orders_summary(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<OrdersSummary>>> {
    let resp = order_service::orders_summary(&state).await?;
    Ok(Json(resp))
}
