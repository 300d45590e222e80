//! Browser-facing customer portal that signs users in against the JSON API
//! and keeps the issued token in a session cookie.

pub mod client;
pub mod handlers;
pub mod pages;
pub mod session;

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::PortalConfig;
use client::ApiClient;

#[derive(Clone)]
pub struct PortalState {
    pub client: ApiClient,
    pub config: PortalConfig,
}

impl PortalState {
    pub fn new(config: PortalConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: ApiClient::new(config.api_base_url.clone())?,
            config,
        })
    }
}

pub fn build_portal(state: PortalState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/Account/Login",
            get(handlers::login_form).post(handlers::login_submit),
        )
        .route(
            "/Account/Register",
            get(handlers::register_form).post(handlers::register_submit),
        )
        .route("/Account/Logout", post(handlers::logout))
        .route("/ERP/Dashboard", get(handlers::dashboard))
        .with_state(state)
}
