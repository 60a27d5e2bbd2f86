use serde::{Deserialize, Serialize};

pub mod get_voice_response {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub message: Option<String>,
    }
}
