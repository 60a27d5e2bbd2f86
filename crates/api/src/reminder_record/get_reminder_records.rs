use crate::{
    error::ReminderError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use med_reminder_api_structs::get_reminder_records::APIResponse;
use med_reminder_domain::ReminderRecord;
use med_reminder_infra::ReminderContext;

pub async fn get_reminder_records_controller(
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    execute(GetReminderRecordsUseCase {}, &ctx)
        .await
        .map(|records| HttpResponse::Ok().json(APIResponse::new(records)))
        .map_err(|e| match e {})
}

#[derive(Debug)]
struct GetReminderRecordsUseCase {}

#[derive(Debug)]
enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderRecordsUseCase {
    type Response = Vec<ReminderRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderRecords";

    /// Newest records first
    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let mut records = ctx.repos.reminder_records.list_all().await;
        records.sort_by(|r1, r2| r2.id.cmp(&r1.id));
        Ok(records)
    }
}
