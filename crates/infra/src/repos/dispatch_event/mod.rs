mod inmemory;
mod postgres;

pub use inmemory::InMemoryDispatchEventRepo;
pub use postgres::PostgresDispatchEventRepo;

use med_reminder_domain::DispatchEvent;

/// Append only log of `DispatchEvent`s
#[async_trait::async_trait]
pub trait IDispatchEventRepo: Send + Sync {
    async fn append(&self, event: &DispatchEvent) -> anyhow::Result<()>;
    /// The most recent events, newest first
    async fn find_recent(&self, limit: usize) -> anyhow::Result<Vec<DispatchEvent>>;
}
