use med_reminder_sdk::{CreateReminderRecordInput, DispatchEvent, MedReminderSDK};
use std::time::Duration;

/// A record whose reminder window is long over, so the running scheduler
/// never picks it up
pub fn expired_record(patient_id: &str, email: Option<&str>) -> CreateReminderRecordInput {
    CreateReminderRecordInput {
        patient_id: patient_id.into(),
        name: "Ada Lovelace".into(),
        phone: "555-0100".into(),
        email: email.map(String::from),
        start_date: "2020-01-01".into(),
        end_date: "2020-01-31".into(),
        time: "09:00".into(),
    }
}

/// Polls the event log until at least `count` events are present
pub async fn wait_for_events(sdk: &MedReminderSDK, count: usize) -> Vec<DispatchEvent> {
    let mut events = Vec::new();
    for _ in 0..100 {
        events = sdk
            .dispatch_event
            .get_recent(None)
            .await
            .expect("Expected to list dispatch events")
            .dispatch_events;
        if events.len() >= count {
            break;
        }
        actix_web::rt::time::sleep(Duration::from_millis(20)).await;
    }
    events
}
