#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Transaction};
use simple_erp_api::{
    config::JwtSettings,
    entity::{order_items, orders, products, users},
    services::token_service::JwtService,
    state::AppState,
};

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "integration-test-secret-with-enough-bytes".into(),
        issuer: "SimpleERP.API".into(),
        audience: "SimpleERP.Web".into(),
        expiry_minutes: 60,
    }
}

pub fn jwt() -> JwtService {
    JwtService::new(&jwt_settings())
}

pub fn state(orm: DatabaseConnection) -> AppState {
    AppState::new(orm, Arc::new(jwt()))
}

/// Statements a mock-backed state executed. The state must not be shared anymore.
pub fn transaction_log(state: AppState) -> Vec<Transaction> {
    Arc::try_unwrap(state.orm)
        .unwrap_or_else(|_| panic!("connection still shared"))
        .into_transaction_log()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .fixed_offset()
}

pub fn dec(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

pub fn user(id: i32, username: &str, password_hash: &str) -> users::Model {
    users::Model {
        id,
        username: username.into(),
        email: format!("{username}@example.com"),
        password_hash: password_hash.into(),
        created_at: at(2025, 1, 1, 9, 0),
        is_active: true,
    }
}

pub fn product(id: i32, name: &str, category: &str, price: &str, stock: i32) -> products::Model {
    products::Model {
        id,
        name: name.into(),
        description: format!("{name} description"),
        price: dec(price),
        stock_quantity: stock,
        category: category.into(),
        sku: format!("SKU-{id:03}"),
        is_active: true,
        created_at: at(2025, 1, 1, 0, 0),
        updated_at: at(2025, 1, 1, 0, 0),
    }
}

pub fn order(
    id: i32,
    customer_id: i32,
    total: &str,
    status: &str,
    placed: DateTime<FixedOffset>,
) -> orders::Model {
    orders::Model {
        id,
        order_number: format!("ORD-{id:04}"),
        customer_id,
        total_amount: dec(total),
        status: status.into(),
        order_date: placed,
        shipped_date: None,
        delivered_date: None,
        shipping_address: "1 Main St".into(),
        notes: String::new(),
    }
}

pub fn item(id: i32, order_id: i32, product_id: i32, qty: i32, unit: &str) -> order_items::Model {
    let unit_price = dec(unit);
    order_items::Model {
        id,
        order_id,
        product_id,
        quantity: qty,
        unit_price,
        total_price: unit_price * Decimal::from(qty),
    }
}
