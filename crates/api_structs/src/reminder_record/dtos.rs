use chrono::{DateTime, NaiveDate, Utc};
use med_reminder_domain::ReminderRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecordDTO {
    pub id: i64,
    pub patient_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl ReminderRecordDTO {
    pub fn new(record: ReminderRecord) -> Self {
        Self {
            id: record.id,
            patient_id: record.patient_id,
            name: record.name,
            phone: record.phone,
            email: record.email,
            start_date: record.start_date,
            end_date: record.end_date,
            time: record.time.to_string(),
            created_at: record.created_at,
        }
    }
}
