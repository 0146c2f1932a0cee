use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::request::ServiceRequest;

pub const SAVE_PATH: &str = "/api/email-intent/save";

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SaveIntentRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SaveIntentResponse {
    pub ok: bool,
    pub deduped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListIntentsResponse {
    pub ok: bool,
    pub count: usize,
    pub data: Vec<String>,
}

/// Client for the email intent service rooted at `base_url`
/// (e.g. `https://intent.example.org`).
#[derive(Clone)]
pub struct EmailIntentClient {
    client: reqwest::Client,
    base_url: String,
}

impl EmailIntentClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn save(&self, email: &str) -> anyhow::Result<SaveIntentResponse> {
        let body = SaveIntentRequest {
            email: Some(email.to_string()),
        };
        ServiceRequest::new(&self.client)
            .post(format!("{}{}", self.base_url, SAVE_PATH))
            .json(&body)
            .fetch()
            .await
    }
}
