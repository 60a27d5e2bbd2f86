use chrono::{DateTime, Utc};
use med_reminder_domain::{DispatchEvent, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchEventDTO {
    pub id: ID,
    pub correlation_id: Option<String>,
    pub status: String,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

impl DispatchEventDTO {
    pub fn new(event: DispatchEvent) -> Self {
        Self {
            id: event.id,
            correlation_id: event.correlation_id,
            status: event.status.to_string(),
            payload: event.payload,
            created_at: event.created_at,
        }
    }
}
