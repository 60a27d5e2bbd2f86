use crate::base::{APIResponse, BaseClient};
use med_reminder_api_structs::*;
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct DispatchEventClient {
    base: Arc<BaseClient>,
}

impl DispatchEventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_recent(
        &self,
        limit: Option<usize>,
    ) -> APIResponse<get_dispatch_events::APIResponse> {
        let path = match limit {
            Some(limit) => format!("dispatch-events?limit={}", limit),
            None => "dispatch-events".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }

    /// Reports a call status the way a telephony provider does, as json
    pub async fn report_call_status<S: Serialize>(
        &self,
        payload: S,
    ) -> APIResponse<receive_call_status::APIResponse> {
        self.base
            .post(payload, "webhooks/call-status".into(), StatusCode::OK)
            .await
    }

    /// Reports a call status as an url encoded form
    pub async fn report_call_status_form<S: Serialize>(
        &self,
        payload: S,
    ) -> APIResponse<receive_call_status::APIResponse> {
        self.base
            .post_form(payload, "webhooks/call-status".into(), StatusCode::OK)
            .await
    }
}
