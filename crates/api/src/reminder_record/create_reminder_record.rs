use crate::{
    error::ReminderError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use med_reminder_api_structs::create_reminder_record::{APIResponse, RequestBody};
use med_reminder_domain::{NewReminderRecord, ReminderRecord};
use med_reminder_infra::ReminderContext;

fn error_handler(e: UseCaseError) -> ReminderError {
    match e {
        UseCaseError::InvalidRecord(e) => {
            ReminderError::BadClientData(format!("Invalid reminder record: {}", e))
        }
        UseCaseError::PatientIdTaken(patient_id) => ReminderError::Conflict(format!(
            "A reminder record for patient_id: {} already exists",
            patient_id
        )),
        UseCaseError::StorageError => ReminderError::InternalError,
    }
}

pub async fn create_reminder_record_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let body = body.into_inner();
    let usecase = CreateReminderRecordUseCase {
        patient_id: body.patient_id,
        name: body.name,
        phone: body.phone,
        email: body.email,
        start_date: body.start_date,
        end_date: body.end_date,
        time: body.time,
    };

    execute(usecase, &ctx)
        .await
        .map(|record| HttpResponse::Created().json(APIResponse::new(record)))
        .map_err(error_handler)
}

#[derive(Debug)]
struct CreateReminderRecordUseCase {
    pub patient_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub time: String,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidRecord(String),
    PatientIdTaken(String),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderRecordUseCase {
    type Response = ReminderRecord;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminderRecord";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let record = NewReminderRecord::parse(
            &self.patient_id,
            &self.name,
            &self.phone,
            self.email.clone(),
            &self.start_date,
            &self.end_date,
            &self.time,
        )
        .map_err(|e| UseCaseError::InvalidRecord(e.to_string()))?;

        if ctx
            .repos
            .reminder_records
            .find_by_patient_id(&record.patient_id)
            .await
            .is_some()
        {
            return Err(UseCaseError::PatientIdTaken(record.patient_id));
        }

        ctx.repos
            .reminder_records
            .insert(&record)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
