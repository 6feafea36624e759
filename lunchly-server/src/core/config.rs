/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | sqlite:lunchly.db | SQLite database URL |
/// | DB_MAX_CONNECTIONS | 5 | Pool size |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | LOG_LEVEL | info | Default log level (`RUST_LOG` overrides) |
/// | LOG_JSON | false | Emit JSON log lines |
/// | LOG_DIR | (unset) | Write daily-rolling log files here instead of stdout |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/lunchly.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub http_port: u16,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite:lunchly.db".into()),
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            http_port: var("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: var("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: var("LOG_DIR").filter(|s| !s.is_empty()),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
