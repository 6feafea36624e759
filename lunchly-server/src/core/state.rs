use crate::core::Config;
use crate::db::repository::{CustomerRepository, ReservationRepository};
use crate::db::{DbService, SharedExecutor};
use crate::utils::AppError;

/// Server state - shared by every handler
///
/// Cheap to clone: the pool and the repositories are reference counted.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Configuration (immutable) |
/// | db | SQLite pool owner |
/// | customers | Customer record manager |
/// | reservations | Reservation record manager |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub customers: CustomerRepository,
    pub reservations: ReservationRepository,
}

impl ServerState {
    /// Build state around an already opened database
    pub fn new(config: Config, db: DbService) -> Self {
        let executor: SharedExecutor = db.executor();
        Self {
            config,
            db,
            customers: CustomerRepository::new(executor.clone()),
            reservations: ReservationRepository::new(executor),
        }
    }

    /// Open the configured database (running migrations) and build state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        Ok(Self::new(config.clone(), db))
    }
}
