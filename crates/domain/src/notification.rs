use crate::reminder_record::ReminderRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const REMINDER_SUBJECT: &str = "Medication Reminder";
const FALLBACK_NAME: &str = "Patient";

/// A message to be delivered to a single recipient
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Builds the medication reminder for a `ReminderRecord`.
    ///
    /// Returns `None` when the record has no usable email address.
    pub fn medication_reminder(record: &ReminderRecord) -> Option<Self> {
        let recipient = record.recipient()?;
        let name = match record.name.trim() {
            "" => FALLBACK_NAME,
            name => name,
        };

        Some(Self {
            recipient: recipient.to_string(),
            subject: REMINDER_SUBJECT.to_string(),
            body: format!(
                "Hello {},\n\nThis is a reminder to take your medicine now.\n\nRegards,\nHospital",
                name
            ),
        })
    }
}

/// Outcome of one delivery attempt as reported by a notification sender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub ok: bool,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl DeliveryReport {
    pub fn delivered() -> Self {
        Self {
            ok: true,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }
}
