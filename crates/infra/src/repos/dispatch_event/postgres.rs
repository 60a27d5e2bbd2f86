use super::IDispatchEventRepo;
use chrono::{DateTime, Utc};
use med_reminder_domain::{DispatchEvent, DispatchStatus};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresDispatchEventRepo {
    pool: PgPool,
}

impl PostgresDispatchEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DispatchEventRaw {
    event_uid: Uuid,
    correlation_id: Option<String>,
    status: String,
    payload: String,
    created_at: DateTime<Utc>,
}

impl From<DispatchEventRaw> for DispatchEvent {
    fn from(e: DispatchEventRaw) -> Self {
        Self {
            id: e.event_uid.into(),
            correlation_id: e.correlation_id,
            status: DispatchStatus::from(e.status.as_str()),
            payload: e.payload,
            created_at: e.created_at,
        }
    }
}

#[async_trait::async_trait]
impl IDispatchEventRepo for PostgresDispatchEventRepo {
    async fn append(&self, event: &DispatchEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO dispatch_events
            (event_uid, correlation_id, status, payload, created_at)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(&event.correlation_id)
        .bind(event.status.as_str())
        .bind(&event.payload)
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to append dispatch event: {:?}. DB returned error: {:?}",
                event, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> anyhow::Result<Vec<DispatchEvent>> {
        let events: Vec<DispatchEventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM dispatch_events
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Find recent dispatch events failed. DB returned error: {:?}", e);
            e
        })?;

        Ok(events.into_iter().map(|e| e.into()).collect())
    }
}
