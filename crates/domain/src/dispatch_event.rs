use crate::{
    notification::DeliveryReport,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use std::{fmt::Display, str::FromStr};

/// Status of a `DispatchEvent`.
///
/// The scheduler only ever produces `Sent` and `Failed`. Delivery providers
/// reporting back through the webhook may use any status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStatus {
    Sent,
    Failed,
    Reported(String),
}

impl DispatchStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Reported(status) => status,
        }
    }
}

impl From<&str> for DispatchStatus {
    fn from(s: &str) -> Self {
        match s {
            "sent" => Self::Sent,
            "failed" => Self::Failed,
            other => Self::Reported(other.to_string()),
        }
    }
}

impl FromStr for DispatchStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl Display for DispatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append only log entry describing the outcome of one dispatch attempt or
/// one status report received from a delivery provider.
///
/// Events are never updated or deleted and are not linked to a
/// `ReminderRecord` by a foreign key.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchEvent {
    pub id: ID,
    pub correlation_id: Option<String>,
    pub status: DispatchStatus,
    /// Opaque detail about the outcome
    pub payload: String,
    pub created_at: DateTime<Utc>,
}

impl DispatchEvent {
    pub fn new(correlation_id: Option<String>, status: DispatchStatus, payload: String) -> Self {
        Self {
            id: Default::default(),
            correlation_id,
            status,
            payload,
            created_at: Utc::now(),
        }
    }

    /// The event recorded after the notification sender has returned
    pub fn from_delivery(report: &DeliveryReport) -> Self {
        let status = if report.ok {
            DispatchStatus::Sent
        } else {
            DispatchStatus::Failed
        };
        let payload = serde_json::to_string(report).unwrap_or_else(|_| format!("{:?}", report));
        Self::new(None, status, payload)
    }
}

impl Entity<ID> for DispatchEvent {
    fn id(&self) -> ID {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!("sent".parse::<DispatchStatus>().unwrap(), DispatchStatus::Sent);
        assert_eq!("failed".parse::<DispatchStatus>().unwrap(), DispatchStatus::Failed);
        assert_eq!(
            "answered".parse::<DispatchStatus>().unwrap(),
            DispatchStatus::Reported("answered".into())
        );
        assert_eq!(DispatchStatus::Reported("busy".into()).as_str(), "busy");
    }

    #[test]
    fn it_records_the_delivery_outcome() {
        let event = DispatchEvent::from_delivery(&DeliveryReport::delivered());
        assert_eq!(event.status, DispatchStatus::Sent);
        assert!(event.correlation_id.is_none());

        let event = DispatchEvent::from_delivery(&DeliveryReport::failed("smtp down"));
        assert_eq!(event.status, DispatchStatus::Failed);
        assert!(event.payload.contains("smtp down"));
    }
}
