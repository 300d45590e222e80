use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::OrderView;

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub count: usize,
    pub orders: Vec<OrderView>,
}

impl OrderList {
    pub fn new(orders: Vec<OrderView>) -> Self {
        Self {
            count: orders.len(),
            orders,
        }
    }
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub total_orders: usize,
    pub today_orders: usize,
    pub this_month_orders: usize,
    pub total_revenue: Decimal,
    pub today_revenue: Decimal,
    pub this_month_revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub status: String,
    pub count: usize,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: i32,
    pub order_number: String,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub status: String,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrdersSummary {
    pub summary: OrderTotals,
    pub status_breakdown: Vec<StatusBreakdown>,
    pub recent_orders: Vec<RecentOrder>,
}
