mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRecordRepo;
pub use postgres::PostgresReminderRecordRepo;

use med_reminder_domain::{NewReminderRecord, RawReminderRecord, ReminderRecord};
use std::convert::TryFrom;
use tracing::warn;

/// The patient roster
#[async_trait::async_trait]
pub trait IReminderRecordRepo: Send + Sync {
    async fn insert(&self, record: &NewReminderRecord) -> anyhow::Result<ReminderRecord>;
    async fn find(&self, record_id: i64) -> Option<ReminderRecord>;
    async fn find_by_patient_id(&self, patient_id: &str) -> Option<ReminderRecord>;
    /// Full snapshot of the roster.
    ///
    /// This never fails: when the store is unavailable the failure is logged
    /// and an empty roster is returned. Rows that do not pass validation are
    /// left out.
    async fn list_all(&self) -> Vec<ReminderRecord>;
    async fn delete(&self, record_id: i64) -> Option<ReminderRecord>;
}

/// Validates roster rows, dropping the ones with malformed date or time
/// fields
pub(crate) fn into_records(rows: Vec<RawReminderRecord>) -> Vec<ReminderRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match ReminderRecord::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping reminder record with id: {}. Reason: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReminderContext;
    use chrono::Utc;

    fn new_record(patient_id: &str) -> NewReminderRecord {
        NewReminderRecord::parse(
            patient_id,
            "Ada",
            "555-0100",
            Some("ada@example.com".into()),
            "2024-01-01",
            "2024-01-31",
            "09:00",
        )
        .unwrap()
    }

    fn raw(id: i64, start_date: &str, time: &str) -> RawReminderRecord {
        RawReminderRecord {
            id,
            patient_id: format!("P-{}", id),
            name: "Ada".into(),
            phone: "555".into(),
            email: None,
            start_date: start_date.into(),
            end_date: "2024-12-31".into(),
            time: time.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn it_drops_invalid_rows() {
        let records = into_records(vec![
            raw(1, "2024-01-01", "09:00"),
            raw(2, "yesterday", "09:00"),
            raw(3, "2024-01-01", "25:00"),
            raw(4, "2024-06-01", "18:30"),
        ]);
        let ids = records.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 4]);
    }

    #[tokio::test]
    async fn create_find_and_delete() {
        let ctx = ReminderContext::create_inmemory();
        let repo = &ctx.repos.reminder_records;

        let record = repo.insert(&new_record("P-1")).await.unwrap();
        let other = repo.insert(&new_record("P-2")).await.unwrap();
        assert_ne!(record.id, other.id);

        assert_eq!(repo.find(record.id).await, Some(record.clone()));
        assert_eq!(repo.find_by_patient_id("P-2").await, Some(other.clone()));
        assert_eq!(repo.list_all().await.len(), 2);

        assert_eq!(repo.delete(record.id).await, Some(record.clone()));
        assert!(repo.find(record.id).await.is_none());
        assert!(repo.delete(record.id).await.is_none());
        assert_eq!(repo.list_all().await, vec![other]);
    }

    #[tokio::test]
    async fn it_rejects_duplicate_patient_ids() {
        let ctx = ReminderContext::create_inmemory();
        let repo = &ctx.repos.reminder_records;

        assert!(repo.insert(&new_record("P-1")).await.is_ok());
        assert!(repo.insert(&new_record("P-1")).await.is_err());
        assert_eq!(repo.list_all().await.len(), 1);
    }
}
