use anyhow::Result;
use tracing::info;
use translatr::{config, form::FormController, server, translation::TranslationService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables are already set)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translatr=info".parse()?),
        )
        .init();

    info!("Starting Translatr");

    let config = config::Config::from_env()?;
    info!("Translation service: {}", config.translate_api_url);

    // The controller task owns the form state; everything else talks to it
    // through handles.
    let (controller, form) = FormController::new(TranslationService::from_config(&config));
    tokio::spawn(controller.run());

    server::serve(&config, form).await
}
