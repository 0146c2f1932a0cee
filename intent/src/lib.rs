use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware, web, App,
};
use common::{
    api::email_intent::{ListIntentsResponse, SaveIntentRequest, SaveIntentResponse},
    context::ServiceState,
    error::ErrorResponse,
};
use utoipa::OpenApi;

pub use handlers::*;

pub mod handlers;
pub mod service;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::email_intent::save_email_intent,
        handlers::email_intent::list_email_intents,
    ),
    components(schemas(
        SaveIntentRequest,
        SaveIntentResponse,
        ListIntentsResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

pub fn create_app(
    state: Arc<ServiceState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    let cors = Cors::permissive();

    #[allow(clippy::let_and_return)]
    let app = App::new()
        .wrap(cors)
        .wrap(middleware::Logger::default())
        .app_data(web::Data::new(state))
        .service(email_intent::save_email_intent)
        .service(email_intent::list_email_intents)
        .service(indexer::ping)
        .service(indexer::openapi);
    app
}
