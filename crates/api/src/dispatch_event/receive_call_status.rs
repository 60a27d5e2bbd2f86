use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, Either, HttpResponse};
use med_reminder_api_structs::receive_call_status::APIResponse;
use med_reminder_domain::{DispatchEvent, DispatchStatus};
use med_reminder_infra::ReminderContext;
use serde_json::{Map, Value};
use std::collections::HashMap;

const UNKNOWN_STATUS: &str = "unknown";

/// Delivery providers post status updates either as JSON or as a form. The
/// request is always acknowledged, even when the event could not be stored.
pub async fn receive_call_status_controller(
    body: Either<web::Json<Value>, web::Form<HashMap<String, String>>>,
    ctx: web::Data<ReminderContext>,
) -> HttpResponse {
    let payload = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => Value::Object(
            form.into_inner()
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect::<Map<_, _>>(),
        ),
    };

    let usecase = ReceiveCallStatusUseCase { payload };
    // Storage failures are logged by `execute`
    let _ = execute(usecase, &ctx).await;

    HttpResponse::Ok().json(APIResponse { ok: true })
}

fn field_as_text(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug)]
struct ReceiveCallStatusUseCase {
    pub payload: Value,
}

impl ReceiveCallStatusUseCase {
    fn to_event(&self) -> DispatchEvent {
        let correlation_id = field_as_text(&self.payload, "call_id");
        let status = field_as_text(&self.payload, "status")
            .filter(|status| !status.is_empty())
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string());

        DispatchEvent::new(
            correlation_id,
            DispatchStatus::from(status.as_str()),
            self.payload.to_string(),
        )
    }
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ReceiveCallStatusUseCase {
    type Response = DispatchEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "ReceiveCallStatus";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let event = self.to_event();
        ctx.repos
            .dispatch_events
            .append(&event)
            .await
            .map(|_| event)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_extracts_correlation_id_and_status() {
        let usecase = ReceiveCallStatusUseCase {
            payload: json!({ "call_id": "abc-123", "status": "answered", "duration": 31 }),
        };
        let event = usecase.to_event();
        assert_eq!(event.correlation_id.as_deref(), Some("abc-123"));
        assert_eq!(event.status, DispatchStatus::Reported("answered".into()));
        assert!(event.payload.contains("\"duration\":31"));
    }

    #[test]
    fn it_defaults_missing_fields() {
        let usecase = ReceiveCallStatusUseCase {
            payload: json!({ "call_id": 42, "status": null }),
        };
        let event = usecase.to_event();
        assert_eq!(event.correlation_id.as_deref(), Some("42"));
        assert_eq!(event.status, DispatchStatus::Reported("unknown".into()));

        let usecase = ReceiveCallStatusUseCase { payload: json!({}) };
        let event = usecase.to_event();
        assert!(event.correlation_id.is_none());
        assert_eq!(event.status.as_str(), "unknown");
    }

    #[actix_web::main]
    #[test]
    async fn it_appends_the_event() {
        let ctx = ReminderContext::create_inmemory();
        let usecase = ReceiveCallStatusUseCase {
            payload: json!({ "call_id": "c-1", "status": "failed" }),
        };
        let event = execute(usecase, &ctx).await.unwrap();
        assert_eq!(event.status, DispatchStatus::Failed);

        let events = ctx.repos.dispatch_events.find_recent(10).await.unwrap();
        assert_eq!(events, vec![event]);
    }
}
