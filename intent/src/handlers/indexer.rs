use actix_web::{get, web::Json, HttpResponse};
use utoipa::OpenApi;

use crate::ApiDoc;

#[get("/api/email-intent/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[get("/api/email-intent/openapi.json")]
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
