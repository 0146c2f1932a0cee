use std::env;

use anyhow::Context;

pub const DEFAULT_DATABASE: &str = "intent";
pub const DEFAULT_COLLECTION: &str = "sets";
pub const DEFAULT_PORT: u16 = 3010;

/// Settings of the email intent service, read once at start and handed to
/// the app state.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Shared secret for listing stored intents. `None` means the service
    /// was deployed without one and listing is refused.
    pub admin_token: Option<String>,
    pub mongo_uri: String,
    pub database: String,
    pub collection: String,
    pub bind_host: String,
    pub port: u16,
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mongo_uri = env::var("MONGOURI").context("MONGOURI must be set")?;

        let port = match env::var("PORT") {
            Ok(port) => port.parse().context("PORT must be a port number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|token| !token.is_empty()),
            mongo_uri,
            database: env::var("INTENT_DB").unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            collection: env::var("INTENT_COLLECTION")
                .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string()),
            bind_host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
        })
    }

    /// Configuration without a backing database, used with in-memory stores.
    pub fn in_memory(admin_token: Option<&str>) -> Self {
        Self {
            admin_token: admin_token.map(str::to_string),
            mongo_uri: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            bind_host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}
