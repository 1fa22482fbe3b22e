//! Environment-driven server configuration.

use serde::Deserialize;

/// Storage backend selection for the server composition root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process storage; state lives for the lifetime of the server.
    Memory,
    /// `PostgreSQL` storage via Diesel; requires `DATABASE_URL`.
    Postgres,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// TCP port the HTTP server binds to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Interface address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Which storage adapters to wire behind the repository ports.
    #[serde(default = "default_storage")]
    pub storage: StorageBackend,
    /// `PostgreSQL` connection string, required when `storage = postgres`.
    #[serde(default)]
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Recognised variables: `PORT`, `BIND_ADDR`, `STORAGE`
    /// (`memory`/`postgres`), `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but cannot be
    /// deserialized into the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;
        let loaded: Self = settings.try_deserialize()?;
        Ok(loaded)
    }

    /// Returns the socket address string the server should bind to.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

const fn default_port() -> u16 {
    8080
}

fn default_bind_addr() -> String {
    String::from("0.0.0.0")
}

const fn default_storage() -> StorageBackend {
    StorageBackend::Memory
}
