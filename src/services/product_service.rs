use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, LikeExpr, extension::postgres::PgExpr},
};

use crate::{
    dto::products::{
        CategoryBreakdown, InventorySummary, InventoryTotals, ProductDetail, ProductList,
        SearchQuery,
    },
    entity::products::{Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult, ValidationError},
    models::{Product, StockStatus, money},
    response::ApiResponse,
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = Products::find()
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::Category)
        .order_by_asc(Column::Name)
        .all(state.db())
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::success(
        "Products retrieved successfully",
        ProductList::new(items),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductDetail>> {
    let product = Products::find_by_id(id)
        .filter(Column::IsActive.eq(true))
        .one(state.db())
        .await?
        .map(Product::from)
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Product retrieved successfully",
        ProductDetail { product },
    ))
}

/// Case-insensitive substring search over name, description, category and SKU.
pub async fn search_products(
    state: &AppState,
    query: SearchQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let term = query
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(ValidationError::EmptySearchQuery)?;

    let pattern = format!("%{}%", escape_like(term));
    let matches_any = Condition::any()
        .add(Expr::col(Column::Name).ilike(LikeExpr::new(pattern.clone()).escape('\\')))
        .add(Expr::col(Column::Description).ilike(LikeExpr::new(pattern.clone()).escape('\\')))
        .add(Expr::col(Column::Category).ilike(LikeExpr::new(pattern.clone()).escape('\\')))
        .add(Expr::col(Column::Sku).ilike(LikeExpr::new(pattern).escape('\\')));

    let items = Products::find()
        .filter(Column::IsActive.eq(true))
        .filter(matches_any)
        .order_by_asc(Column::Name)
        .all(state.db())
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::success(
        format!("Search completed for '{term}'"),
        ProductList::new(items),
    ))
}

pub async fn inventory_summary(state: &AppState) -> AppResult<ApiResponse<InventorySummary>> {
    let active = Products::find()
        .filter(Column::IsActive.eq(true))
        .all(state.db())
        .await?;

    Ok(ApiResponse::success(
        "Inventory summary retrieved successfully",
        summarize_inventory(&active),
    ))
}

#[derive(Default)]
struct CategoryAcc {
    count: usize,
    value: Decimal,
    stock: i64,
}

/// Stock counts and values over the active products in `products`; inactive rows are ignored.
pub fn summarize_inventory(products: &[ProductModel]) -> InventorySummary {
    let mut total_products = 0;
    let mut total_value = Decimal::ZERO;
    let mut low_stock = 0;
    let mut out_of_stock = 0;
    let mut in_stock = 0;
    let mut categories: BTreeMap<&str, CategoryAcc> = BTreeMap::new();

    for product in products.iter().filter(|p| p.is_active) {
        let value = product.price * Decimal::from(product.stock_quantity);
        total_products += 1;
        total_value += value;
        match StockStatus::from_quantity(product.stock_quantity) {
            StockStatus::InStock => in_stock += 1,
            StockStatus::LowStock => low_stock += 1,
            StockStatus::OutOfStock => out_of_stock += 1,
        }

        let acc = categories.entry(product.category.as_str()).or_default();
        acc.count += 1;
        acc.value += value;
        acc.stock += i64::from(product.stock_quantity);
    }

    let category_breakdown = categories
        .into_iter()
        .map(|(category, acc)| CategoryBreakdown {
            category: category.to_string(),
            product_count: acc.count,
            total_value: money(acc.value),
            total_stock: acc.stock,
        })
        .collect();

    InventorySummary {
        summary: InventoryTotals {
            total_products,
            total_stock_value: money(total_value),
            low_stock_products: low_stock,
            out_of_stock_products: out_of_stock,
            in_stock_products: in_stock,
        },
        category_breakdown,
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
