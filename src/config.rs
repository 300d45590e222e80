use std::env;

use anyhow::{Context, bail};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            port,
            database_url,
            host,
            jwt: JwtSettings::from_env()?,
        })
    }
}

/// Signing and validation parameters for bearer tokens.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_minutes: i64,
}

impl JwtSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "SimpleERP.API".to_string());
        let audience = env::var("JWT_AUDIENCE").unwrap_or_else(|_| "SimpleERP.Web".to_string());
        let expiry_minutes = match env::var("JWT_EXPIRY_MINUTES") {
            Ok(raw) => parse_positive_minutes("JWT_EXPIRY_MINUTES", &raw)?,
            Err(_) => 60,
        };
        Ok(Self {
            secret,
            issuer,
            audience,
            expiry_minutes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub host: String,
    pub port: u16,
    pub api_base_url: String,
    pub session_ttl_minutes: i64,
    pub secure_cookie: bool,
}

impl PortalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("PORTAL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORTAL_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3001);
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string())
            .trim_end_matches('/')
            .to_string();
        let session_ttl_minutes = match env::var("SESSION_TTL_MINUTES") {
            Ok(raw) => parse_positive_minutes("SESSION_TTL_MINUTES", &raw)?,
            Err(_) => 60,
        };
        let secure_cookie = env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            host,
            port,
            api_base_url,
            session_ttl_minutes,
            secure_cookie,
        })
    }
}

fn parse_positive_minutes(name: &str, raw: &str) -> anyhow::Result<i64> {
    let minutes: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{name} must be an integer"))?;
    if minutes <= 0 {
        bail!("{name} must be positive");
    }
    Ok(minutes)
}
