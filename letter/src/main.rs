use std::io::{stdin, stdout};

use common::api::email_intent::EmailIntentClient;
use letter::{
    config::ClientConfig,
    download::{DirectorySink, DownloadEmitter},
    terminal::Terminal,
    LetterForm,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::init();

    let config = ClientConfig::from_env()?;
    let prompts = config.prompt_set()?;

    let mut form = LetterForm::new(prompts, config.details_step, config.tracker());
    let emitter = DownloadEmitter::new(DirectorySink::new(&config.output_dir));

    let outcome = Terminal::new(stdin().lock(), stdout()).run(&mut form, &emitter)?;

    let Some(intent) = outcome.intent else {
        return Ok(());
    };
    log::info!("Follow-up requested: {}", intent.extra());

    if let (Some(url), Some(email)) = (&config.intent_service_url, &intent.from) {
        let client = EmailIntentClient::new(reqwest::Client::new(), url);
        match client.save(email).await {
            Ok(response) if response.deduped => log::info!("Email intent already recorded"),
            Ok(_) => log::info!("Email intent recorded"),
            Err(err) => log::warn!("Failed to record email intent: {:#}", err),
        }
    }

    Ok(())
}
