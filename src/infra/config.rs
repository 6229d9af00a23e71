//! Centralized configuration (environment variables + defaults).
//!
//! Values are read once at process start; nothing re-reads the environment per request.

use anyhow::{anyhow, Context};
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;

const DEFAULT_APP_HOST: &str = "0.0.0.0";
const DEFAULT_APP_PORT: u16 = 3000;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Listen address plus store settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

/// Store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    options: PgConnectOptions,
    pub max_connections: u32,
}

impl AppConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = non_empty(&lookup, "APP_HOST").unwrap_or_else(|| DEFAULT_APP_HOST.to_string());
        let port = parse_or(&lookup, "APP_PORT", DEFAULT_APP_PORT)?;
        let database = DatabaseConfig::from_lookup(&lookup)?;
        Ok(Self { host, port, database })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    fn from_lookup<F>(lookup: &F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = parse_or(lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?
            .max(1);

        // A full URL wins over the individual DB_* parts.
        let options = match non_empty(lookup, "DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url)
                .context("DATABASE_URL is not a valid postgres connection string")?,
            None => {
                let user = non_empty(lookup, "DB_USER")
                    .ok_or_else(|| anyhow!("DB_USER must be set when DATABASE_URL is absent"))?;
                let name = non_empty(lookup, "DB_NAME")
                    .ok_or_else(|| anyhow!("DB_NAME must be set when DATABASE_URL is absent"))?;
                let host =
                    non_empty(lookup, "DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
                let port = parse_or(lookup, "DB_PORT", DEFAULT_DB_PORT)?;
                let password = lookup("DB_PASSWORD").unwrap_or_default();

                PgConnectOptions::new()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .password(&password)
                    .database(&name)
            }
        };

        Ok(Self { options, max_connections })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        self.options.clone()
    }

    /// Human-readable target without credentials, for logs.
    pub fn describe(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{}",
            self.options.get_username(),
            self.options.get_host(),
            self.options.get_port(),
            self.options.get_database().unwrap_or("")
        )
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow!("{} must be a valid number (got '{}')", key, raw)),
        None => Ok(default),
    }
}
