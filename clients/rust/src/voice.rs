use crate::base::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct VoiceClient {
    base: Arc<BaseClient>,
}

/// A voice document as served to telephony providers
#[derive(Debug, Clone)]
pub struct VoiceDocument {
    pub content_type: String,
    pub body: String,
}

impl VoiceClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self, message: Option<&str>) -> APIResponse<VoiceDocument> {
        let path = match message {
            Some(message) => format!("voice?{}", encode_message_query(message)),
            None => "voice".into(),
        };
        let (content_type, body) = self.base.get_text(path, StatusCode::OK).await?;
        Ok(VoiceDocument { content_type, body })
    }
}

fn encode_message_query(message: &str) -> String {
    reqwest::Url::parse_with_params("http://localhost/", &[("message", message)])
        .ok()
        .and_then(|url| url.query().map(String::from))
        .unwrap_or_default()
}
