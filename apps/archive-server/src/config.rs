//! Configuration for the archive server

use serde::{Deserialize, Serialize};

/// Archive server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Run pending migrations on startup
    #[serde(default = "default_true")]
    pub migrate_on_startup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_url: default_database_url(),
            migrate_on_startup: true,
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://archive.db?mode=rwc".to_string()
}

fn default_true() -> bool {
    true
}
