use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::rt::task::spawn_blocking;
use med_reminder_domain::{DeliveryReport, DispatchEvent, Notification, ReminderRecord};
use med_reminder_infra::ReminderContext;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// Runs reminder sends off the async executor.
///
/// The blocking sender is only ever called from the blocking thread pool and
/// the number of sends in flight is capped by `max_concurrent`. Dispatches
/// beyond the cap wait for a free slot instead of being dropped.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    permits: Arc<Semaphore>,
}

impl Dispatcher {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Sends one reminder for `record` and records exactly one
    /// `DispatchEvent` for the attempt
    pub async fn dispatch(
        &self,
        record: ReminderRecord,
        ctx: &ReminderContext,
    ) -> Result<DispatchOutcome, UseCaseError> {
        let usecase = SendReminderUseCase {
            record,
            permits: self.permits.clone(),
        };
        execute(usecase, ctx).await
    }

    /// Number of sends that can start right now without waiting
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }
}

#[derive(Debug)]
pub struct SendReminderUseCase {
    pub record: ReminderRecord,
    pub permits: Arc<Semaphore>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub record_id: i64,
    pub report: DeliveryReport,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingRecipient(i64),
    DispatcherClosed,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendReminderUseCase {
    type Response = DispatchOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let record_id = self.record.id;
        let notification = Notification::medication_reminder(&self.record)
            .ok_or(UseCaseError::MissingRecipient(record_id))?;

        let _permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| UseCaseError::DispatcherClosed)?;

        info!(
            "Sending reminder to {} for id={}",
            notification.recipient, record_id
        );
        let sender = ctx.sender.clone();
        let report = match spawn_blocking(move || sender.send(&notification)).await {
            Ok(report) => report,
            Err(e) => {
                error!("Error sending reminder for id={}: {}", record_id, e);
                DeliveryReport::failed(format!("Notification sender did not complete: {}", e))
            }
        };

        Ok(DispatchOutcome { record_id, report })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RecordDispatchEvent)]
    }
}

/// Appends the `DispatchEvent` for a finished send attempt. A failed write is
/// logged and not retried.
pub struct RecordDispatchEvent;

#[async_trait::async_trait(?Send)]
impl Subscriber<SendReminderUseCase> for RecordDispatchEvent {
    async fn notify(&self, outcome: &DispatchOutcome, ctx: &ReminderContext) {
        let event = DispatchEvent::from_delivery(&outcome.report);
        match ctx.repos.dispatch_events.append(&event).await {
            Ok(_) => info!(
                "Logged reminder for id={} status={}",
                outcome.record_id, event.status
            ),
            Err(e) => error!(
                "Failed to write dispatch event for id={}: {:?}",
                outcome.record_id, e
            ),
        }
    }
}
