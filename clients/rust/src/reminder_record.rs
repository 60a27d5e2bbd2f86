use crate::base::{APIResponse, BaseClient};
use med_reminder_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderRecordClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderRecordInput {
    pub patient_id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub time: String,
}

impl ReminderRecordClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderRecordInput,
    ) -> APIResponse<create_reminder_record::APIResponse> {
        let body = create_reminder_record::RequestBody {
            patient_id: input.patient_id,
            name: input.name,
            phone: input.phone,
            email: input.email,
            start_date: input.start_date,
            end_date: input.end_date,
            time: input.time,
        };
        self.base
            .post(body, "patients".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_reminder_records::APIResponse> {
        self.base.get("patients".into(), StatusCode::OK).await
    }

    pub async fn delete(&self, record_id: i64) -> APIResponse<delete_reminder_record::APIResponse> {
        self.base
            .delete(format!("patients/{}", record_id), StatusCode::OK)
            .await
    }

    pub async fn send_now(&self, record_id: i64) -> APIResponse<send_reminder_now::APIResponse> {
        self.base
            .post(
                serde_json::json!({}),
                format!("patients/{}/remind", record_id),
                StatusCode::OK,
            )
            .await
    }
}
