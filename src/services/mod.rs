pub mod auth_service;
pub mod order_service;
pub mod password;
pub mod product_service;
pub mod token_service;
pub mod user_service;
