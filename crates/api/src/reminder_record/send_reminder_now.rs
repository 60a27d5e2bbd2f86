use crate::{
    dispatch_event::Dispatcher,
    error::ReminderError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use med_reminder_api_structs::send_reminder_now::{APIResponse, PathParams};
use med_reminder_infra::ReminderContext;

/// Operational trigger that sends one reminder right away, outside of the
/// scheduler cadence
pub async fn send_reminder_now_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
    dispatcher: web::Data<Dispatcher>,
) -> Result<HttpResponse, ReminderError> {
    let usecase = SendReminderNowUseCase {
        record_id: path.record_id,
        dispatcher: dispatcher.get_ref().clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|recipient| {
            HttpResponse::Ok().json(APIResponse {
                ok: true,
                emailed: recipient,
            })
        })
        .map_err(|e| match e {
            UseCaseError::NotFound(record_id) => ReminderError::NotFound(format!(
                "The reminder record with id: {}, was not found.",
                record_id
            )),
            UseCaseError::MissingEmail => {
                ReminderError::BadClientData("No email stored for this patient".into())
            }
        })
}

#[derive(Debug)]
struct SendReminderNowUseCase {
    pub record_id: i64,
    pub dispatcher: Dispatcher,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(i64),
    MissingEmail,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendReminderNowUseCase {
    /// The address the reminder was queued for
    type Response = String;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminderNow";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let record = ctx
            .repos
            .reminder_records
            .find(self.record_id)
            .await
            .ok_or(UseCaseError::NotFound(self.record_id))?;
        let recipient = record
            .recipient()
            .ok_or(UseCaseError::MissingEmail)?
            .to_string();

        // Queued, the request does not wait for the mail server
        let dispatcher = self.dispatcher.clone();
        let ctx = ctx.clone();
        actix_web::rt::spawn(async move {
            let _ = dispatcher.dispatch(record, &ctx).await;
        });

        Ok(recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingSender;
    use actix_web::rt::time::sleep;
    use med_reminder_domain::NewReminderRecord;
    use std::{sync::Arc, time::Duration};

    async fn insert(ctx: &ReminderContext, patient_id: &str, email: Option<&str>) -> i64 {
        let record = NewReminderRecord::parse(
            patient_id,
            "Ada",
            "555",
            email.map(String::from),
            "2020-01-01",
            "2020-01-31",
            "09:00",
        )
        .unwrap();
        ctx.repos.reminder_records.insert(&record).await.unwrap().id
    }

    #[actix_web::main]
    #[test]
    async fn it_queues_one_dispatch() {
        let mut ctx = ReminderContext::create_inmemory();
        let sender = Arc::new(RecordingSender::default());
        ctx.sender = sender.clone();
        let record_id = insert(&ctx, "P-1", Some("ada@example.com")).await;

        let usecase = SendReminderNowUseCase {
            record_id,
            dispatcher: Dispatcher::new(1),
        };
        let recipient = execute(usecase, &ctx).await.unwrap();
        assert_eq!(recipient, "ada@example.com");

        for _ in 0..200 {
            if !ctx.repos.dispatch_events.find_recent(1).await.unwrap().is_empty() {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(sender.sent_to(), vec!["ada@example.com"]);
        assert_eq!(ctx.repos.dispatch_events.find_recent(10).await.unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_unknown_or_unreachable_patients() {
        let ctx = ReminderContext::create_inmemory();
        let record_id = insert(&ctx, "P-2", None).await;

        let res = execute(
            SendReminderNowUseCase {
                record_id,
                dispatcher: Dispatcher::new(1),
            },
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseError::MissingEmail)));

        let res = execute(
            SendReminderNowUseCase {
                record_id: record_id + 100,
                dispatcher: Dispatcher::new(1),
            },
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseError::NotFound(_))));
    }
}
