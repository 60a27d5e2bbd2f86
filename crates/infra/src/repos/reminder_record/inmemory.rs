use super::IReminderRecordRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::Utc;
use med_reminder_domain::{NewReminderRecord, ReminderRecord};
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryReminderRecordRepo {
    records: std::sync::Mutex<Vec<ReminderRecord>>,
    next_id: AtomicI64,
}

impl InMemoryReminderRecordRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryReminderRecordRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRecordRepo for InMemoryReminderRecordRepo {
    async fn insert(&self, record: &NewReminderRecord) -> anyhow::Result<ReminderRecord> {
        with_collection(&self.records, |records| {
            if records.iter().any(|r| r.patient_id == record.patient_id) {
                anyhow::bail!(
                    "A reminder record with patient_id: {} already exists",
                    record.patient_id
                );
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let record = record.clone().into_record(id, Utc::now());
            records.push(record.clone());
            Ok(record)
        })
    }

    async fn find(&self, record_id: i64) -> Option<ReminderRecord> {
        find(&record_id, &self.records)
    }

    async fn find_by_patient_id(&self, patient_id: &str) -> Option<ReminderRecord> {
        find_by(&self.records, |r| r.patient_id == patient_id)
            .into_iter()
            .next()
    }

    async fn list_all(&self) -> Vec<ReminderRecord> {
        find_by(&self.records, |_| true)
    }

    async fn delete(&self, record_id: i64) -> Option<ReminderRecord> {
        delete(&record_id, &self.records)
    }
}
