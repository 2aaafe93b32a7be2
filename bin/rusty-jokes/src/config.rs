//! Runtime settings, read from the environment (and `.env` via dotenv).

use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;

pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: try_load("DATABASE_URL", "sqlite:rusty_jokes.db")?,
            host: try_load("HOST", "127.0.0.1")?,
            port: try_load("PORT", "8080")?,
            static_dir: try_load("STATIC_DIR", "./static")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        log::info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("invalid {key} value: {raw:?}"))
}
