use std::sync::Arc;

use actix_web::HttpServer;
use common::{
    config::ServiceConfig, context::ServiceState, entities::email_intent::EmailIntent,
    repository::mongo_repository::MongoRepository,
};
use intent::create_app;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::init();

    let config = ServiceConfig::from_env()?;
    if config.admin_token.is_none() {
        log::warn!("ADMIN_TOKEN is not set, listing email intents is disabled");
    }

    let intents: MongoRepository<EmailIntent> =
        MongoRepository::new(&config.mongo_uri, &config.database, &config.collection).await?;

    let bind = (config.bind_host.clone(), config.port);

    let mut state = ServiceState::new(config);
    state.insert::<EmailIntent>(Arc::new(intents));
    let state = Arc::new(state);

    log::info!("Email intent service listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || create_app(state.clone()))
        .bind(bind)?
        .run()
        .await?;
    Ok(())
}
