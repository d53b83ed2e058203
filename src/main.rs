use anyhow::{Context, Result};
use lingo_relay::config::Config;
use lingo_relay::event::S3Event;
use lingo_relay::handler::TranslationRelay;
use lingo_relay::storage::S3ObjectStore;
use lingo_relay::translator::HttpTranslator;
use std::io::Read;
use std::sync::Arc;
use tracing::info;

/// Read the notification event: from the file named by the first argument,
/// or from stdin when no argument is given.
fn read_event() -> Result<S3Event> {
    let raw = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?
        },
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        },
    };
    serde_json::from_str(&raw).context("Event is not a valid S3 notification document")
}

async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let mut builder = aws_sdk_s3::config::Builder::from(&shared);
    if let Some(endpoint) = &config.s3_endpoint_url {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    aws_sdk_s3::Client::from_conf(builder.build())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lingo_relay=info".parse()?),
        )
        .init();

    info!("Starting translation relay invocation");

    // Load configuration from environment
    let config = Config::from_env()?;

    let event = read_event()?;

    // One storage client and one translation client per invocation,
    // injected into the handler rather than held as ambient singletons
    let store = Arc::new(S3ObjectStore::new(build_s3_client(&config).await));
    let translator = Arc::new(HttpTranslator::new(
        reqwest::Client::new(),
        config.translate_api_url.clone(),
        config.translate_api_key.clone(),
    ));
    let relay = TranslationRelay::new(store, translator, config.target_bucket.clone());

    // The result document is the platform contract for both outcomes;
    // failures were already logged inside the handler
    let result = relay.handle(&event).await;
    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}
