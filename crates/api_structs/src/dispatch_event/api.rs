use crate::dtos::DispatchEventDTO;
use med_reminder_domain::DispatchEvent;
use serde::{Deserialize, Serialize};

pub mod get_dispatch_events {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub limit: Option<usize>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub dispatch_events: Vec<DispatchEventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<DispatchEvent>) -> Self {
            Self {
                dispatch_events: events.into_iter().map(DispatchEventDTO::new).collect(),
            }
        }
    }
}

pub mod receive_call_status {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub ok: bool,
    }
}
