mod common;

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use common::{at, dec, item, order, product, user};
use sea_orm::{DatabaseBackend, MockDatabase};
use simple_erp_api::{
    dto::products::SearchQuery,
    entity::{orders, products},
    error::{AppError, ValidationError},
    models::StockStatus,
    services::{
        order_service::{assemble_orders, list_orders, summarize_orders},
        product_service::{get_product, list_products, search_products, summarize_inventory},
    },
};

#[test]
fn inventory_summary_counts_active_products_only() {
    let mut retired = product(3, "C", "Gadgets", "5.00", 100);
    retired.is_active = false;
    let products = vec![
        product(1, "A", "Gadgets", "10.00", 5),
        product(2, "B", "Tools", "20.00", 0),
        retired,
    ];

    let summary = summarize_inventory(&products);
    assert_eq!(summary.summary.total_products, 2);
    assert_eq!(summary.summary.total_stock_value, dec("50.00"));
    assert_eq!(summary.summary.low_stock_products, 1);
    assert_eq!(summary.summary.out_of_stock_products, 1);
    assert_eq!(summary.summary.in_stock_products, 0);

    let categories: Vec<_> = summary
        .category_breakdown
        .iter()
        .map(|c| (c.category.as_str(), c.product_count, c.total_stock))
        .collect();
    assert_eq!(categories, vec![("Gadgets", 1, 5), ("Tools", 1, 0)]);
}

#[test]
fn inventory_summary_of_nothing_is_zero() {
    let summary = summarize_inventory(&[]);
    assert_eq!(summary.summary.total_products, 0);
    assert_eq!(summary.summary.total_stock_value, dec("0.00"));
    assert!(summary.category_breakdown.is_empty());
}

#[test]
fn orders_summary_splits_today_and_month() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let orders = vec![
        order(1, 1, "100.005", "Pending", at(2025, 6, 15, 8, 0)),
        order(2, 2, "50.00", "Shipped", at(2025, 6, 1, 0, 0)),
        order(3, 1, "25.50", "Pending", at(2025, 5, 31, 23, 59)),
    ];
    let customers = HashMap::from([(1, user(1, "alice", "x"))]);

    let summary = summarize_orders(&orders, &customers, now);
    let totals = &summary.summary;
    assert_eq!(totals.total_orders, 3);
    assert_eq!(totals.today_orders, 1);
    assert_eq!(totals.this_month_orders, 2);
    assert_eq!(totals.total_revenue, dec("175.50"));
    assert_eq!(totals.today_revenue, dec("100.00"));
    assert_eq!(totals.this_month_revenue, dec("150.00"));

    let statuses: Vec<_> = summary
        .status_breakdown
        .iter()
        .map(|s| (s.status.as_str(), s.count, s.total_amount))
        .collect();
    assert_eq!(
        statuses,
        vec![("Pending", 2, dec("125.50")), ("Shipped", 1, dec("50.00"))]
    );

    let recent: Vec<_> = summary
        .recent_orders
        .iter()
        .map(|r| (r.id, r.customer_name.as_str()))
        .collect();
    assert_eq!(recent, vec![(1, "alice"), (2, "Unknown"), (3, "alice")]);
}

#[test]
fn recent_orders_are_capped_at_five() {
    let now = Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap();
    let orders: Vec<_> = (1..=8)
        .map(|id| order(id, 1, "1.00", "Pending", at(2025, 6, id as u32, 10, 0)))
        .collect();

    let summary = summarize_orders(&orders, &HashMap::new(), now);
    let ids: Vec<i32> = summary.recent_orders.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![8, 7, 6, 5, 4]);
}

#[test]
fn assembled_orders_fall_back_to_unknown() {
    let orders = vec![order(10, 99, "30.00", "Pending", at(2025, 2, 1, 0, 0))];
    let items = vec![item(1, 10, 5, 2, "10.00"), item(2, 10, 6, 1, "10.00")];
    let names = HashMap::from([(5, "Widget".to_string())]);

    let views = assemble_orders(orders, items, &names, &HashMap::new());
    assert_eq!(views.len(), 1);
    let view = &views[0];
    assert_eq!(view.customer_name, "Unknown");
    assert_eq!(view.customer_email, "Unknown");
    assert_eq!(view.item_count, 2);
    assert_eq!(view.items[0].product_name, "Widget");
    assert_eq!(view.items[0].total_price, dec("20.00"));
    assert_eq!(view.items[1].product_name, "Unknown");
}

#[tokio::test]
async fn list_orders_resolves_names() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            order(2, 1, "15.00", "Pending", at(2025, 3, 2, 0, 0)),
            order(1, 2, "7.50", "Delivered", at(2025, 3, 1, 0, 0)),
        ]])
        .append_query_results([vec![
            item(1, 1, 3, 1, "7.50"),
            item(2, 2, 3, 2, "7.50"),
        ]])
        .append_query_results([vec![product(3, "Stapler", "Office", "7.50", 40)]])
        .append_query_results([vec![user(1, "alice", "x"), user(2, "bob", "x")]])
        .into_connection();
    let state = common::state(orm);

    let resp = list_orders(&state).await.unwrap();
    assert_eq!(resp.data.count, 2);
    let first = &resp.data.orders[0];
    assert_eq!(first.id, 2);
    assert_eq!(first.customer_name, "alice");
    assert_eq!(first.items[0].product_name, "Stapler");
    assert_eq!(first.item_count, 1);
    assert_eq!(resp.data.orders[1].customer_email, "bob@example.com");

    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["orders"][0]["orderNumber"], "ORD-0002");
    assert_eq!(json["orders"][0]["itemCount"], 1);
}

#[tokio::test]
async fn list_orders_when_empty_runs_one_query() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<orders::Model>::new()])
        .into_connection();
    let state = common::state(orm);

    let resp = list_orders(&state).await.unwrap();
    assert_eq!(resp.data.count, 0);
    assert_eq!(common::transaction_log(state).len(), 1);
}

#[tokio::test]
async fn product_detail_and_missing_product() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product(4, "Lamp", "Home", "19.99", 3)]])
        .append_query_results([Vec::<products::Model>::new()])
        .into_connection();
    let state = common::state(orm);

    let found = get_product(&state, 4).await.unwrap();
    assert_eq!(found.data.product.name, "Lamp");
    assert_eq!(found.data.product.stock_status, StockStatus::LowStock);

    let missing = get_product(&state, 404).await.unwrap_err();
    assert!(matches!(missing, AppError::NotFound));
}

#[tokio::test]
async fn product_list_serializes_stock_status() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            product(1, "Drill", "Tools", "89.90", 25),
            product(2, "Saw", "Tools", "30.00", 0),
        ]])
        .into_connection();
    let state = common::state(orm);

    let resp = list_products(&state).await.unwrap();
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["products"][0]["stockStatus"], "In Stock");
    assert_eq!(json["products"][1]["stockStatus"], "Out of Stock");
}

#[tokio::test]
async fn blank_search_is_rejected_before_querying() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = common::state(orm);

    for query in [None, Some("   ".to_string())] {
        let err = search_products(&state, SearchQuery { query })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptySearchQuery)
        ));
    }
    assert!(common::transaction_log(state).is_empty());
}

#[tokio::test]
async fn search_reports_trimmed_term() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product(1, "Laptop", "Computers", "999.00", 12)]])
        .into_connection();
    let state = common::state(orm);

    let resp = search_products(
        &state,
        SearchQuery {
            query: Some("  lap ".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(resp.message, "Search completed for 'lap'");
    assert_eq!(resp.data.count, 1);
}
