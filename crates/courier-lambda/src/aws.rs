//! SNS and SQS backed delivery targets

use crate::publisher::{QueueSender, TopicPublisher};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use courier_core::{Error, NotifierConfig, Result};
use tracing::debug;

/// Load the shared AWS configuration from the execution environment
pub async fn load_sdk_config() -> SdkConfig {
    aws_config::load_defaults(BehaviorVersion::latest()).await
}

/// Build both delivery targets from one shared SDK configuration
pub fn create_targets(
    sdk_config: &SdkConfig,
    config: &NotifierConfig,
) -> (SnsTopicPublisher, SqsQueueSender) {
    let topic = SnsTopicPublisher::new(
        aws_sdk_sns::Client::new(sdk_config),
        config.topic_arn.clone(),
    );
    let queue = SqsQueueSender::new(
        aws_sdk_sqs::Client::new(sdk_config),
        config.queue_url.clone(),
    );
    (topic, queue)
}

/// Topic publisher backed by SNS
#[derive(Debug, Clone)]
pub struct SnsTopicPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsTopicPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

#[async_trait]
impl TopicPublisher for SnsTopicPublisher {
    fn target(&self) -> &str {
        &self.topic_arn
    }

    async fn publish(&self, subject: &str, body: &str) -> Result<()> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(body)
            .send()
            .await
            .map_err(|e| {
                Error::TopicPublish(aws_sdk_sns::error::DisplayErrorContext(&e).to_string())
            })?;

        debug!("SNS accepted message {:?}", output.message_id());
        Ok(())
    }
}

/// Queue sender backed by SQS
#[derive(Debug, Clone)]
pub struct SqsQueueSender {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsQueueSender {
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

#[async_trait]
impl QueueSender for SqsQueueSender {
    fn target(&self) -> &str {
        &self.queue_url
    }

    async fn send(&self, body: &str) -> Result<()> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| {
                Error::QueueSend(aws_sdk_sqs::error::DisplayErrorContext(&e).to_string())
            })?;

        debug!("SQS accepted message {:?}", output.message_id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::Region;

    fn offline_sdk_config() -> SdkConfig {
        SdkConfig::builder()
            .region(Region::new("us-east-1"))
            .behavior_version(BehaviorVersion::latest())
            .build()
    }

    #[tokio::test]
    async fn test_create_targets() {
        let config = NotifierConfig::new(
            "arn:aws:sns:us-east-1:123456789012:uploads",
            "https://sqs.us-east-1.amazonaws.com/123456789012/uploads",
        );

        let (topic, queue) = create_targets(&offline_sdk_config(), &config);

        assert_eq!(topic.target(), "arn:aws:sns:us-east-1:123456789012:uploads");
        assert_eq!(
            queue.target(),
            "https://sqs.us-east-1.amazonaws.com/123456789012/uploads"
        );
    }

    #[tokio::test]
    async fn test_queue_url_passed_through_unchanged() {
        let config = NotifierConfig::new(
            "arn:aws:sns:us-east-1:000000000000:uploads",
            "http://localhost:4566",
        );

        let (_, queue) = create_targets(&offline_sdk_config(), &config);

        assert_eq!(queue.target(), "http://localhost:4566");
    }
}
