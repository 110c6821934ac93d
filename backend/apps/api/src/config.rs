//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use anyhow::{Context, bail};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use auth::AuthConfig;
use catalog::CatalogConfig;
use platform::token::DEFAULT_TOKEN_TTL_SECS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
}

impl ApiConfig {
    /// Load from process environment
    ///
    /// Fails on a missing `DATABASE_URL`, a missing or short `JWT_SECRET`,
    /// or any value that does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let Some(secret) = var("JWT_SECRET") else {
            bail!("JWT_SECRET must be set");
        };
        let token_ttl_secs = parse_or(&var, "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        let pepper = var("PASSWORD_PEPPER").map(String::into_bytes);
        let auth = AuthConfig::new(secret.as_bytes(), token_ttl_secs, pepper)
            .context("JWT_SECRET / TOKEN_TTL_SECS rejected")?;

        let defaults = CatalogConfig::default();
        let catalog = CatalogConfig::new(
            parse_or(&var, "DEFAULT_PAGE_SIZE", defaults.default_page_size)?,
            parse_or(&var, "MAX_PAGE_SIZE", defaults.max_page_size)?,
        )
        .with_low_stock_threshold(parse_or(
            &var,
            "LOW_STOCK_THRESHOLD",
            defaults.low_stock_threshold,
        )?);

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url,
            db_max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 5)?,
            bind_addr,
            frontend_origins,
            auth,
            catalog,
        })
    }
}

fn parse_or<T>(var: impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/inventory"), ("JWT_SECRET", SECRET)])
            .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.auth.signer.ttl_secs(), 3600);
        assert!(config.auth.pepper().is_none());
        assert_eq!(config.catalog.default_page_size, 10);
        assert_eq!(config.catalog.max_page_size, 100);
        assert_eq!(config.catalog.low_stock_threshold, 10);
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_secret_is_required_and_long_enough() {
        assert!(load(&[("DATABASE_URL", "postgres://x")]).is_err());
        assert!(load(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", "short")]).is_err());
        assert!(load(&[("JWT_SECRET", SECRET)]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", SECRET),
            ("TOKEN_TTL_SECS", "600"),
            ("PASSWORD_PEPPER", "pepper"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("FRONTEND_ORIGINS", "https://a.example, ,https://b.example"),
            ("MAX_PAGE_SIZE", "50"),
            ("LOW_STOCK_THRESHOLD", "3"),
        ])
        .unwrap();

        assert_eq!(config.auth.signer.ttl_secs(), 600);
        assert_eq!(config.auth.pepper(), Some(&b"pepper"[..]));
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.frontend_origins, ["https://a.example", "https://b.example"]);
        assert_eq!(config.catalog.max_page_size, 50);
        assert_eq!(config.catalog.low_stock_threshold, 3);
    }

    #[test]
    fn test_bad_numbers_rejected() {
        assert!(
            load(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", SECRET), ("TOKEN_TTL_SECS", "soon")])
                .is_err()
        );
        assert!(
            load(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", SECRET), ("TOKEN_TTL_SECS", "0")])
                .is_err()
        );
    }
}
