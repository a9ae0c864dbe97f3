mod config;
mod handler;
mod models;
mod publisher;
mod response;

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing_subscriber::{EnvFilter, filter};

use config::Config;
use handler::Notifier;
use publisher::SnsPublisher;
use response::Response;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    // CloudWatch keeps one JSON object per line.
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(filter::LevelFilter::INFO.into())
                .from_env()?,
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        publishing_enabled = config.sns_topic_arn.is_some(),
        allowed_origin = %config.allowed_origin,
        backtraces_enabled = config.backtraces_enabled,
        "initialized config"
    );
    if !config.backtraces_enabled {
        tracing::warn!("RUST_LIB_BACKTRACE is not set, logged faults will carry the cause chain only");
    }

    let sns_client = aws_sdk_sns::Client::new(&aws_config::load_from_env().await);
    let notifier = Arc::new(Notifier::new(SnsPublisher::new(sns_client), config));

    let func = service_fn(move |event: LambdaEvent<Value>| {
        let notifier = notifier.clone();
        async move {
            let response = notifier
                .handle(&event.payload, &event.context.request_id)
                .await;
            Ok::<Response, Error>(response)
        }
    });

    run(func).await
}
