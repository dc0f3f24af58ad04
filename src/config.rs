use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_format: String,

    // Store configuration
    pub store_backend: String,
    pub database_url: String,
    pub database_namespace: String,
    pub database_name: String,
    pub database_username: String,
    pub database_password: String,

    // Engine settings
    pub write_concurrency: usize,
    pub request_timeout_secs: u64,
    pub notifications_page_size: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "puzzle_notify=debug,tower_http=debug".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),

            store_backend: env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            database_namespace: env::var("DATABASE_NAMESPACE")
                .unwrap_or_else(|_| "crossword".to_string()),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "puzzles".to_string()),
            database_username: env::var("DATABASE_USERNAME")
                .unwrap_or_else(|_| "root".to_string()),
            database_password: env::var("DATABASE_PASSWORD")
                .unwrap_or_else(|_| "root".to_string()),

            write_concurrency: env::var("WRITE_CONCURRENCY")
                .unwrap_or_else(|_| "16".to_string())
                .parse()?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            notifications_page_size: env::var("NOTIFICATIONS_PAGE_SIZE")
                .unwrap_or_else(|_| "50".to_string())
                .parse()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn uses_surrealdb(&self) -> bool {
        self.store_backend.eq_ignore_ascii_case("surrealdb")
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "development".to_string(),
            log_level: "puzzle_notify=debug".to_string(),
            log_format: "text".to_string(),
            store_backend: "memory".to_string(),
            database_url: "http://localhost:8000".to_string(),
            database_namespace: "crossword".to_string(),
            database_name: "puzzles".to_string(),
            database_username: "root".to_string(),
            database_password: "root".to_string(),
            write_concurrency: 16,
            request_timeout_secs: 30,
            notifications_page_size: 50,
        }
    }
}
