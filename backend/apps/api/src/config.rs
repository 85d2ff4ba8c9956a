//! Server Configuration
//!
//! Process-level settings read from the environment (after `.env`).
//! Token and password settings live in `auth::AuthConfig`.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:4200,http://127.0.0.1:4200";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub jwt_private_key_path: PathBuf,
    pub jwt_public_key_path: PathBuf,
    pub frontend_origins: Vec<String>,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} must be set in environment"))
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => {
                let n: u32 = value.trim().parse().with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS is not a number: {value:?}")
                })?;
                if n == 0 {
                    bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
                }
                n
            }
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr:?}"))?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            max_connections,
            jwt_private_key_path: required("JWT_PRIVATE_KEY_PATH")?.into(),
            jwt_public_key_path: required("JWT_PUBLIC_KEY_PATH")?.into(),
            frontend_origins,
            bind_addr,
        })
    }
}
