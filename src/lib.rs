pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod portal;
pub mod response;
pub mod routes;
pub mod services;
pub mod shutdown;
pub mod state;
