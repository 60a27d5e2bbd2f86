use crate::{
    error::ReminderError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use med_reminder_api_structs::get_dispatch_events::{APIResponse, QueryParams};
use med_reminder_domain::DispatchEvent;
use med_reminder_infra::ReminderContext;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

pub async fn get_dispatch_events_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let usecase = GetDispatchEventsUseCase {
        limit: query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(|e| match e {
            UseCaseError::StorageError => ReminderError::InternalError,
        })
}

#[derive(Debug)]
struct GetDispatchEventsUseCase {
    pub limit: usize,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDispatchEventsUseCase {
    type Response = Vec<DispatchEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetDispatchEvents";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .dispatch_events
            .find_recent(self.limit)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
