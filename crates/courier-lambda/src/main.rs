//! Courier - S3 upload notifier for AWS Lambda

use std::sync::Arc;

use courier_core::NotifierConfig;
use courier_lambda::{aws, logging, Notifier};
use lambda_runtime::{run, service_fn, LambdaEvent};
use tracing::{info, info_span, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = NotifierConfig::from_env()?;
    info!(
        "Starting Courier {} (topic: {}, queue: {})",
        courier_core::VERSION,
        config.topic_arn,
        config.queue_url
    );

    let sdk_config = aws::load_sdk_config().await;
    let (topic, queue) = aws::create_targets(&sdk_config, &config);
    let notifier = Arc::new(Notifier::new(topic, queue));

    run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let notifier = Arc::clone(&notifier);
        let span = info_span!("invocation", request_id = %event.context.request_id);
        async move {
            notifier
                .handle_raw(event.payload)
                .await
                .map_err(lambda_runtime::Error::from)
        }
        .instrument(span)
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {}", e))
}
