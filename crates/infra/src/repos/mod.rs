mod dispatch_event;
mod reminder_record;
mod shared;

pub use dispatch_event::{IDispatchEventRepo, InMemoryDispatchEventRepo, PostgresDispatchEventRepo};
pub use reminder_record::{
    IReminderRecordRepo, InMemoryReminderRecordRepo, PostgresReminderRecordRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminder_records: Arc<dyn IReminderRecordRepo>,
    pub dispatch_events: Arc<dyn IDispatchEventRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            reminder_records: Arc::new(PostgresReminderRecordRepo::new(pool.clone())),
            dispatch_events: Arc::new(PostgresDispatchEventRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminder_records: Arc::new(InMemoryReminderRecordRepo::new()),
            dispatch_events: Arc::new(InMemoryDispatchEventRepo::new()),
        }
    }
}
