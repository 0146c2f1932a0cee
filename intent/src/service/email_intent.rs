use anyhow::anyhow;
use common::{
    api::email_intent::{ListIntentsResponse, SaveIntentResponse},
    context::Context,
    entities::email_intent::EmailIntent,
    error::{self, AddCode},
};

pub struct EmailIntentService {
    pub context: Context,
}

impl EmailIntentService {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// Stores a normalized address. `deduped` tells whether it was
    /// already there.
    pub async fn save(&self, email: Option<String>) -> error::Result<SaveIntentResponse> {
        let raw = email.unwrap_or_default();

        let email = match EmailIntent::parse(&raw) {
            Ok(email) => email,
            Err(err) => {
                log::info!("Rejected malformed email intent");
                return Err(err.code(400));
            }
        };

        let intents = self.context.try_get_repository::<EmailIntent>()?;
        let added = intents.add(&email).await?;

        log::debug!("Email intent saved, new member: {}", added);

        Ok(SaveIntentResponse {
            ok: true,
            deduped: !added,
        })
    }

    pub async fn list(&self, token: Option<String>) -> error::Result<ListIntentsResponse> {
        let Some(admin_token) = self.context.config().admin_token.as_deref() else {
            log::error!("Email intents requested, but ADMIN_TOKEN is not set");
            return Err(anyhow!("ADMIN_TOKEN not set").code(500));
        };

        if token.as_deref() != Some(admin_token) {
            log::warn!("Unauthorized attempt to list email intents");
            return Err(anyhow!("Unauthorized").code(401));
        }

        let intents = self.context.try_get_repository::<EmailIntent>()?;

        let mut data: Vec<String> = intents
            .members()
            .await?
            .into_iter()
            .map(String::from)
            .collect();
        data.sort();

        Ok(ListIntentsResponse {
            ok: true,
            count: data.len(),
            data,
        })
    }
}
