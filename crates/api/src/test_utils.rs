use chrono::{NaiveDate, Utc};
use med_reminder_domain::{DeliveryReport, Notification, ReminderRecord};
use med_reminder_infra::INotificationSender;
use std::{
    sync::{
        mpsc::{channel, Receiver, Sender},
        Mutex,
    },
    time::Duration,
};

/// A record active through January 2024
pub fn record(id: i64, email: Option<&str>, time: &str) -> ReminderRecord {
    ReminderRecord {
        id,
        patient_id: format!("P-{}", id),
        name: format!("Patient {}", id),
        phone: "555-0100".into(),
        email: email.map(String::from),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        time: time.parse().unwrap(),
        created_at: Utc::now(),
    }
}

struct Gate {
    recipient: String,
    release: Mutex<Receiver<()>>,
}

/// Sender that remembers every recipient instead of talking to a mail server
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<String>>,
    failing: Vec<String>,
    panics: bool,
    gate: Option<Gate>,
}

impl RecordingSender {
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            failing: recipients.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Default::default()
        }
    }

    /// Sends to `recipient` block until the returned channel is signalled
    pub fn gated(recipient: &str) -> (Self, Sender<()>) {
        let (tx, rx) = channel();
        let sender = Self {
            gate: Some(Gate {
                recipient: recipient.to_string(),
                release: Mutex::new(rx),
            }),
            ..Default::default()
        };
        (sender, tx)
    }

    pub fn sent_to(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl INotificationSender for RecordingSender {
    fn send(&self, notification: &Notification) -> DeliveryReport {
        self.sent
            .lock()
            .unwrap()
            .push(notification.recipient.clone());
        if self.panics {
            panic!("mail server exploded");
        }
        if let Some(gate) = &self.gate {
            if gate.recipient == notification.recipient {
                let _ = gate
                    .release
                    .lock()
                    .unwrap()
                    .recv_timeout(Duration::from_secs(10));
            }
        }
        if self.failing.contains(&notification.recipient) {
            DeliveryReport::failed("connection refused")
        } else {
            DeliveryReport::delivered()
        }
    }
}
