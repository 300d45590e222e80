use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::Product;

#[derive(Debug, Deserialize, IntoParams, ToSchema, Default)]
pub struct SearchQuery {
    /// Substring matched against name, description, category and SKU.
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub count: usize,
    pub products: Vec<Product>,
}

impl ProductList {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            count: products.len(),
            products,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTotals {
    pub total_products: usize,
    pub total_stock_value: Decimal,
    pub low_stock_products: usize,
    pub out_of_stock_products: usize,
    pub in_stock_products: usize,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub product_count: usize,
    pub total_value: Decimal,
    pub total_stock: i64,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub summary: InventoryTotals,
    pub category_breakdown: Vec<CategoryBreakdown>,
}
