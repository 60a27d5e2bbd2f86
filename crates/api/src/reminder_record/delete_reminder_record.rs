use crate::{
    error::ReminderError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use med_reminder_api_structs::delete_reminder_record::{APIResponse, PathParams};
use med_reminder_domain::ReminderRecord;
use med_reminder_infra::ReminderContext;

pub async fn delete_reminder_record_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let usecase = DeleteReminderRecordUseCase {
        record_id: path.record_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|record| HttpResponse::Ok().json(APIResponse::new(record)))
        .map_err(|e| match e {
            UseCaseError::NotFound(record_id) => ReminderError::NotFound(format!(
                "The reminder record with id: {}, was not found.",
                record_id
            )),
        })
}

#[derive(Debug)]
struct DeleteReminderRecordUseCase {
    pub record_id: i64,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(i64),
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderRecordUseCase {
    type Response = ReminderRecord;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminderRecord";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminder_records
            .delete(self.record_id)
            .await
            .ok_or(UseCaseError::NotFound(self.record_id))
    }
}
