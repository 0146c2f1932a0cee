use actix_web::{
    get, post,
    web::{self, Json},
};
use common::{
    api::email_intent::{ListIntentsResponse, SaveIntentRequest, SaveIntentResponse},
    context::Context,
    error::{self, ErrorResponse},
};
use utoipa::IntoParams;

use crate::service::email_intent::EmailIntentService;

#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SaveQuery {
    /// Takes precedence over the body.
    pub email: Option<String>,
}

#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub token: Option<String>,
}

/// Query pairs as sent. A repeated name is not an error, its first value
/// is the one that counts.
type QueryPairs = web::Query<Vec<(String, String)>>;

fn first_value(query: QueryPairs, name: &str) -> Option<String> {
    query
        .into_inner()
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

#[utoipa::path(
    params(SaveQuery),
    request_body(
        content = SaveIntentRequest
    ),
    responses(
        (status = 200, body = SaveIntentResponse),
        (status = 400, description = "Invalid email", body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
#[post("/api/email-intent/save")]
pub async fn save_email_intent(
    context: Context,
    query: QueryPairs,
    body: web::Bytes,
) -> error::Result<Json<SaveIntentResponse>> {
    let email = match first_value(query, "email").filter(|email| !email.is_empty()) {
        Some(email) => Some(email),
        None => serde_json::from_slice::<SaveIntentRequest>(&body)
            .ok()
            .and_then(|body| body.email),
    };

    Ok(Json(EmailIntentService::new(context).save(email).await?))
}

#[utoipa::path(
    params(ListQuery),
    responses(
        (status = 200, body = ListIntentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "ADMIN_TOKEN not set", body = ErrorResponse)
    )
)]
#[get("/api/email-intent/list")]
pub async fn list_email_intents(
    context: Context,
    query: QueryPairs,
) -> error::Result<Json<ListIntentsResponse>> {
    Ok(Json(
        EmailIntentService::new(context)
            .list(first_value(query, "token"))
            .await?,
    ))
}
