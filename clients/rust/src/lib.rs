mod base;
mod dispatch_event;
mod reminder_record;
mod status;
mod voice;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use dispatch_event::DispatchEventClient;
pub use med_reminder_api_structs::dtos::*;
pub use med_reminder_domain::DispatchStatus;
use reminder_record::ReminderRecordClient;
pub use reqwest::StatusCode;
pub use reminder_record::CreateReminderRecordInput;
use status::StatusClient;
use std::sync::Arc;
use voice::VoiceClient;
pub use voice::VoiceDocument;

// Domain
pub use med_reminder_api_structs::dtos::DispatchEventDTO as DispatchEvent;
pub use med_reminder_api_structs::dtos::ReminderRecordDTO as ReminderRecord;

/// Medication Reminder Server SDK
///
/// The SDK contains methods for interacting with the medication reminder
/// server API.
#[derive(Clone)]
pub struct MedReminderSDK {
    pub dispatch_event: DispatchEventClient,
    pub reminder_record: ReminderRecordClient,
    pub status: StatusClient,
    pub voice: VoiceClient,
}

impl MedReminderSDK {
    /// `address` is the server root, e.g. `http://localhost:5000`
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(format!("{}/api/v1", address)));
        let dispatch_event = DispatchEventClient::new(base.clone());
        let reminder_record = ReminderRecordClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let voice = VoiceClient::new(base);

        Self {
            dispatch_event,
            reminder_record,
            status,
            voice,
        }
    }
}
