//! Lunchly Server - restaurant customer and reservation manager
//!
//! # Module layout
//!
//! ```text
//! lunchly-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── db/            # SQLite pool, query executor, repositories
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, validation, time parsing
//! ```
//!
//! The repositories in [`db::repository`] are the core: they take the query
//! executor as an explicit dependency and never log. Everything HTTP lives
//! in [`api`].

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use db::repository::{CustomerRepository, RepoError, ReservationRepository};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Load `.env` and install the logger configured by the environment
pub fn setup_environment() -> Config {
    // missing .env is fine, real environment variables still apply
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
    __                 __    __
   / /   __  ______  _/ /_  / /_  __
  / /   / / / / __ \/ ___/ __ \/ / / / /
 / /___/ /_/ / / / / /__/ / / / / /_/ /
/_____/\__,_/_/ /_/\___/_/ /_/_/\__, /
                               /____/
    "#
    );
}
