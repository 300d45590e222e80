mod common;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::{NotSet, Set};
use simple_erp_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        auth::{LoginRequest, RegisterRequest, UpdateProfileRequest},
        products::SearchQuery,
    },
    entity::{order_items, orders, products, users},
    error::AppError,
    services::{auth_service, order_service, product_service, token_service::TokenService, user_service},
};
use uuid::Uuid;

// Integration flow against a real database: register -> login -> seed catalog and an order -> read models.
#[tokio::test]
async fn register_login_and_read_models_flow() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
            return Ok(());
        }
    };

    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    let state = common::state(orm);

    let tag = Uuid::new_v4().simple().to_string()[..10].to_string();
    let username = format!("user_{tag}");
    let email = format!("{username}@example.com");

    let registered = auth_service::register_user(
        &state,
        RegisterRequest {
            username: username.clone(),
            email: email.clone(),
            password: "secret1".into(),
        },
    )
    .await?;
    let user_id = registered.data.user.id;

    let again = auth_service::register_user(
        &state,
        RegisterRequest {
            username: username.clone(),
            email: format!("other_{tag}@example.com"),
            password: "secret1".into(),
        },
    )
    .await;
    assert!(matches!(again, Err(AppError::DuplicateUsername)));

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            username: username.clone(),
            password: "secret1".into(),
        },
    )
    .await?;
    let claims = state.tokens.verify(&login.data.token)?;
    assert_eq!(claims.user_id()?, user_id);

    let now = Utc::now().fixed_offset();

    // Skipping the pre-checks leaves the unique constraint to report the duplicate.
    let raced = users::ActiveModel {
        id: NotSet,
        username: Set(username.clone()),
        email: Set(format!("race_{tag}@example.com")),
        password_hash: Set("$argon2id$placeholder".into()),
        created_at: Set(now),
        is_active: Set(true),
    }
    .insert(state.db())
    .await
    .map_err(AppError::from_user_write);
    assert!(matches!(raced, Err(AppError::DuplicateUsername)));

    let raced = users::ActiveModel {
        id: NotSet,
        username: Set(format!("race_{tag}")),
        email: Set(email.clone()),
        password_hash: Set("$argon2id$placeholder".into()),
        created_at: Set(now),
        is_active: Set(true),
    }
    .insert(state.db())
    .await
    .map_err(AppError::from_user_write);
    assert!(matches!(raced, Err(AppError::DuplicateEmail)));
    let product = products::ActiveModel {
        id: NotSet,
        name: Set(format!("Flow Widget {tag}")),
        description: Set("Widget used by the flow test".into()),
        price: Set(Decimal::new(1250, 2)),
        stock_quantity: Set(4),
        category: Set(format!("Flow {tag}")),
        sku: Set(format!("FLOW-{tag}")),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(state.db())
    .await?;

    let order = orders::ActiveModel {
        id: NotSet,
        order_number: Set(format!("ORD-{tag}")),
        customer_id: Set(user_id),
        total_amount: Set(Decimal::new(2500, 2)),
        status: Set("Pending".into()),
        order_date: Set(now),
        shipped_date: Set(None),
        delivered_date: Set(None),
        shipping_address: Set("1 Flow Road".into()),
        notes: Set(String::new()),
    }
    .insert(state.db())
    .await?;

    order_items::ActiveModel {
        id: NotSet,
        order_id: Set(order.id),
        product_id: Set(product.id),
        quantity: Set(2),
        unit_price: Set(Decimal::new(1250, 2)),
        total_price: Set(Decimal::new(2500, 2)),
    }
    .insert(state.db())
    .await?;

    let found = product_service::search_products(
        &state,
        SearchQuery {
            query: Some(tag.to_uppercase()),
        },
    )
    .await?;
    assert!(found.data.products.iter().any(|p| p.id == product.id));

    let inventory = product_service::inventory_summary(&state).await?;
    let category = inventory
        .data
        .category_breakdown
        .iter()
        .find(|c| c.category == format!("Flow {tag}"))
        .expect("category present");
    assert_eq!(category.total_stock, 4);
    assert_eq!(category.total_value, Decimal::new(5000, 2));

    let listed = order_service::list_orders(&state).await?;
    let view = listed
        .data
        .orders
        .iter()
        .find(|o| o.id == order.id)
        .expect("order listed");
    assert_eq!(view.customer_name, username);
    assert_eq!(view.item_count, 1);
    assert_eq!(view.items[0].product_name, product.name);

    let summary = order_service::orders_summary(&state).await?;
    assert!(summary.data.summary.today_orders >= 1);

    let updated = user_service::update_profile(
        &state,
        user_id,
        UpdateProfileRequest {
            email: format!("new_{tag}@example.com"),
        },
    )
    .await?;
    assert_eq!(updated.data.email, format!("new_{tag}@example.com"));

    user_service::deactivate_user(&state, user_id).await?;
    let after = auth_service::login_user(
        &state,
        LoginRequest {
            username,
            password: "secret1".into(),
        },
    )
    .await;
    assert!(matches!(after, Err(AppError::InvalidCredentials)));

    Ok(())
}
