use super::INotificationSender;
use crate::config::SmtpConfig;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use med_reminder_domain::{DeliveryReport, Notification};
use std::time::Duration;
use tracing::{info, warn};

const SEND_TIMEOUT: Duration = Duration::from_secs(20);
const MISSING_CONFIG_ERROR: &str =
    "SMTP configuration missing. Set SMTP_HOST, SMTP_PORT, SMTP_USER, SMTP_PASSWORD";

/// Sends notifications as plain text emails over an authenticated STARTTLS
/// connection
pub struct SmtpNotificationSender {
    config: Option<SmtpConfig>,
}

impl SmtpNotificationSender {
    pub fn new(config: Option<SmtpConfig>) -> Self {
        Self { config }
    }

    fn deliver(config: &SmtpConfig, notification: &Notification) -> anyhow::Result<()> {
        let from: Mailbox = config.from.parse()?;
        let to: Mailbox = notification.recipient.parse()?;
        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())?;

        let mailer = SmtpTransport::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .timeout(Some(SEND_TIMEOUT))
            .build();
        mailer.send(&email)?;
        Ok(())
    }
}

impl INotificationSender for SmtpNotificationSender {
    fn send(&self, notification: &Notification) -> DeliveryReport {
        let config = match &self.config {
            Some(config) => config,
            None => {
                warn!("[EMAIL] {}", MISSING_CONFIG_ERROR);
                return DeliveryReport::failed(MISSING_CONFIG_ERROR);
            }
        };

        match Self::deliver(config, notification) {
            Ok(()) => {
                info!("[EMAIL] Sent to {}", notification.recipient);
                DeliveryReport::delivered()
            }
            Err(e) => {
                warn!(
                    "[EMAIL] Failed to send to {}: {}",
                    notification.recipient, e
                );
                DeliveryReport::failed(e.to_string())
            }
        }
    }
}
