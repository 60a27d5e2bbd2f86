use crate::dtos::ReminderRecordDTO;
use med_reminder_domain::ReminderRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecordResponse {
    pub reminder_record: ReminderRecordDTO,
}

impl ReminderRecordResponse {
    pub fn new(record: ReminderRecord) -> Self {
        Self {
            reminder_record: ReminderRecordDTO::new(record),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PathParams {
    pub record_id: i64,
}

pub mod create_reminder_record {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub patient_id: String,
        pub name: String,
        pub phone: String,
        pub email: Option<String>,
        /// YYYY-MM-DD
        pub start_date: String,
        /// YYYY-MM-DD
        pub end_date: String,
        /// Zero padded HH:MM
        pub time: String,
    }

    pub type APIResponse = ReminderRecordResponse;
}

pub mod get_reminder_records {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder_records: Vec<ReminderRecordDTO>,
    }

    impl APIResponse {
        pub fn new(records: Vec<ReminderRecord>) -> Self {
            Self {
                reminder_records: records.into_iter().map(ReminderRecordDTO::new).collect(),
            }
        }
    }
}

pub mod delete_reminder_record {
    use super::*;

    pub type PathParams = super::PathParams;

    pub type APIResponse = ReminderRecordResponse;
}

pub mod send_reminder_now {
    use super::*;

    pub type PathParams = super::PathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub ok: bool,
        /// The address the reminder was queued for
        pub emailed: String,
    }
}
