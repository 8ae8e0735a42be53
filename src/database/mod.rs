pub mod memory;
pub mod pool;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::error::Result;
use crate::models::application::{
    Application, ApplicationChanges, ApplicationStatus, NewApplication,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence for application rows. Lookups that miss return `Ok(None)`;
/// the service decides what a miss means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationStore: Send + Sync + 'static {
    async fn insert(&self, application: NewApplication) -> Result<Application>;

    /// All rows, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<Application>>;

    /// Rows whose `candidate_email` equals `email` exactly, newest first.
    async fn list_by_email(&self, email: &str) -> Result<Vec<Application>>;

    async fn find(&self, id: i32) -> Result<Option<Application>>;

    /// Applies the provided fields and bumps `updated_at`. Never inserts.
    async fn update(&self, id: i32, changes: ApplicationChanges) -> Result<Option<Application>>;

    /// Row counts per status. Statuses with no rows may be omitted.
    async fn count_by_status(&self) -> Result<Vec<(ApplicationStatus, i64)>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GreetingStore: Send + Sync + 'static {
    async fn greeting(&self) -> Result<Option<String>>;
}

#[derive(Clone)]
pub struct Stores {
    pub applications: Arc<dyn ApplicationStore>,
    pub greetings: Arc<dyn GreetingStore>,
}

impl Stores {
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            applications: store.clone(),
            greetings: store,
        }
    }

    pub fn postgres(store: PgStore) -> Self {
        let store = Arc::new(store);
        Self {
            applications: store.clone(),
            greetings: store,
        }
    }
}

/// Opens the configured backend. Postgres is migrated before use.
pub async fn connect(config: &DatabaseConfig) -> Result<Stores> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory application store");
            Ok(Stores::memory())
        }
        StorageBackend::Postgres => {
            let pool = pool::create_pool(config).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!(database = %config.name, "Database migrations applied");
            Ok(Stores::postgres(PgStore::new(pool)))
        }
    }
}
