use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{auth, orders as order_dto, products as product_dto},
    models::{OrderLine, OrderView, Product, StockStatus, User, UserSummary},
    response::ErrorResponse,
    routes::{auth as auth_routes, health, orders, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth_routes::register,
        auth_routes::login,
        auth_routes::me,
        auth_routes::update_me,
        auth_routes::deactivate_me,
        auth_routes::list_users,
        auth_routes::lookup,
        products::list_products,
        products::get_product,
        products::inventory_summary,
        products::search_products,
        orders::list_orders,
        orders::orders_summary
    ),
    components(
        schemas(
            User,
            UserSummary,
            Product,
            StockStatus,
            OrderLine,
            OrderView,
            ErrorResponse,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::UpdateProfileRequest,
            product_dto::InventoryTotals,
            product_dto::CategoryBreakdown,
            order_dto::OrderTotals,
            order_dto::StatusBreakdown,
            order_dto::RecentOrder
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and account endpoints"),
        (name = "Products", description = "Catalog and inventory queries"),
        (name = "Orders", description = "Order listing and summaries"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
