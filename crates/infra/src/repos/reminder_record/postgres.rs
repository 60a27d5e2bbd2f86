use super::{into_records, IReminderRecordRepo};
use chrono::{DateTime, Utc};
use med_reminder_domain::{NewReminderRecord, RawReminderRecord, ReminderRecord};
use sqlx::{FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

// Dates are read back as text so that validation only happens in one place,
// the conversion from `RawReminderRecord`
const SELECT_COLUMNS: &str = r#"
    id, patient_id, name, phone, email,
    start_date::text AS start_date,
    end_date::text AS end_date,
    "time", created_at
"#;

pub struct PostgresReminderRecordRepo {
    pool: PgPool,
}

impl PostgresReminderRecordRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRecordRaw {
    id: i64,
    patient_id: String,
    name: String,
    phone: String,
    email: Option<String>,
    start_date: String,
    end_date: String,
    time: String,
    created_at: DateTime<Utc>,
}

impl From<ReminderRecordRaw> for RawReminderRecord {
    fn from(e: ReminderRecordRaw) -> Self {
        Self {
            id: e.id,
            patient_id: e.patient_id,
            name: e.name,
            phone: e.phone,
            email: e.email,
            start_date: e.start_date,
            end_date: e.end_date,
            time: e.time,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct InsertedRaw {
    id: i64,
    created_at: DateTime<Utc>,
}

fn validate_one(row: Option<ReminderRecordRaw>) -> Option<ReminderRecord> {
    let row: RawReminderRecord = row?.into();
    let id = row.id;
    ReminderRecord::try_from(row)
        .map_err(|e| {
            error!("Reminder record with id: {} is invalid: {}", id, e);
            e
        })
        .ok()
}

#[async_trait::async_trait]
impl IReminderRecordRepo for PostgresReminderRecordRepo {
    async fn insert(&self, record: &NewReminderRecord) -> anyhow::Result<ReminderRecord> {
        let inserted: InsertedRaw = sqlx::query_as(
            r#"
            INSERT INTO reminder_records
            (patient_id, name, phone, email, start_date, end_date, "time")
            VALUES($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, created_at
            "#,
        )
        .bind(&record.patient_id)
        .bind(&record.name)
        .bind(&record.phone)
        .bind(&record.email)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.time.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder record: {:?}. DB returned error: {:?}",
                record, e
            );
            e
        })?;

        Ok(record.clone().into_record(inserted.id, inserted.created_at))
    }

    async fn find(&self, record_id: i64) -> Option<ReminderRecord> {
        let query = format!("SELECT {} FROM reminder_records WHERE id = $1", SELECT_COLUMNS);
        let res: Option<ReminderRecordRaw> = sqlx::query_as(&query)
            .bind(record_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find reminder record with id: {:?} failed. DB returned error: {:?}",
                    record_id, e
                );
                e
            })
            .ok()?;
        validate_one(res)
    }

    async fn find_by_patient_id(&self, patient_id: &str) -> Option<ReminderRecord> {
        let query = format!(
            "SELECT {} FROM reminder_records WHERE patient_id = $1",
            SELECT_COLUMNS
        );
        let res: Option<ReminderRecordRaw> = sqlx::query_as(&query)
            .bind(patient_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find reminder record with patient_id: {:?} failed. DB returned error: {:?}",
                    patient_id, e
                );
                e
            })
            .ok()?;
        validate_one(res)
    }

    async fn list_all(&self) -> Vec<ReminderRecord> {
        let query = format!("SELECT {} FROM reminder_records ORDER BY id", SELECT_COLUMNS);
        let rows: Vec<ReminderRecordRaw> = match sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                error!(
                    "Fetching the reminder roster failed, treating it as empty. DB returned error: {:?}",
                    e
                );
                return Vec::new();
            }
        };

        into_records(rows.into_iter().map(|row| row.into()).collect())
    }

    async fn delete(&self, record_id: i64) -> Option<ReminderRecord> {
        let query = format!(
            "DELETE FROM reminder_records WHERE id = $1 RETURNING {}",
            SELECT_COLUMNS
        );
        let res: Option<ReminderRecordRaw> = sqlx::query_as(&query)
            .bind(record_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Delete reminder record with id: {:?} failed. DB returned error: {:?}",
                    record_id, e
                );
                e
            })
            .ok()?;
        validate_one(res)
    }
}
