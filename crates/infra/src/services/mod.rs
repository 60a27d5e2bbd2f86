mod smtp;

pub use smtp::SmtpNotificationSender;

use med_reminder_domain::{DeliveryReport, Notification};

/// Capability to deliver a `Notification`.
///
/// Sending is synchronous and may block for a long time on network I/O, so
/// callers on an async runtime should run it on a blocking thread. An
/// implementation never panics on delivery problems, they are reported with
/// `DeliveryReport::ok` set to `false`.
pub trait INotificationSender: Send + Sync {
    fn send(&self, notification: &Notification) -> DeliveryReport;
}
