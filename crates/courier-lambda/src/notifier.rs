//! Upload Notifier
//!
//! Turns an S3 event into upload messages, publishes them in aggregate to the
//! topic and one by one to the queue. Delivery failures never abort the
//! invocation; each attempt is recorded in a [`DeliveryReport`] and the
//! configured [`ResponsePolicy`] decides what the caller sees.

use crate::publisher::{QueueSender, TopicPublisher};
use courier_core::types::{
    render_batch, DeliveryOutcome, DeliveryReport, HandlerResponse, ResponsePolicy,
    S3EventMessage, UploadMessage,
};
use courier_core::{Result, NOTIFICATION_SUBJECT};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

/// S3 upload notifier
pub struct Notifier<T, Q> {
    topic: T,
    queue: Q,
    policy: ResponsePolicy,
}

impl<T, Q> Notifier<T, Q>
where
    T: TopicPublisher,
    Q: QueueSender,
{
    /// Create a notifier that always reports success
    pub fn new(topic: T, queue: Q) -> Self {
        Self {
            topic,
            queue,
            policy: ResponsePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Handle one invocation from the payload exactly as delivered.
    ///
    /// The payload is logged before any parsing, so the debug trace shows
    /// every field the trigger sent.
    pub async fn handle_raw(&self, payload: Value) -> Result<HandlerResponse> {
        debug!("Received event: {}", payload);
        let event: S3EventMessage = serde_json::from_value(payload)?;
        self.handle(event).await
    }

    /// Handle one invocation.
    ///
    /// Only a malformed S3 record fails the invocation, and it does so before
    /// anything is published.
    #[instrument(skip_all, fields(records = event.records.len()))]
    pub async fn handle(&self, event: S3EventMessage) -> Result<HandlerResponse> {
        info!("Received event with {} records", event.records.len());

        let report = self.process(&event).await?;
        let response = self.policy.respond(&report);

        info!(
            processed = report.processed,
            failures = report.failures(),
            status = response.status_code,
            "Invocation finished"
        );
        Ok(response)
    }

    /// Build messages and deliver them, collecting every outcome
    pub async fn process(&self, event: &S3EventMessage) -> Result<DeliveryReport> {
        let messages = build_messages(event)?;

        if messages.is_empty() {
            warn!("No S3 records found in event.");
            return Ok(DeliveryReport::new(0));
        }

        let mut report = DeliveryReport::new(messages.len());
        report.topic = Some(self.publish_batch(&messages).await);

        for (index, message) in messages.iter().enumerate() {
            report.queue.push(self.send_one(index, message).await);
        }

        Ok(report)
    }

    async fn publish_batch(&self, messages: &[UploadMessage]) -> DeliveryOutcome {
        let target = self.topic.target();
        let result = match render_batch(messages) {
            Ok(body) => self.topic.publish(NOTIFICATION_SUBJECT, &body).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!(
                    "Published {} messages to SNS topic {}",
                    messages.len(),
                    target
                );
                DeliveryOutcome::delivered(target)
            }
            Err(e) => {
                error!(code = e.code(), "Failed to publish to SNS: {}", e);
                DeliveryOutcome::failed(target, &e)
            }
        }
    }

    async fn send_one(&self, index: usize, message: &UploadMessage) -> DeliveryOutcome {
        let target = self.queue.target();
        let result = match message.to_json() {
            Ok(body) => self.queue.send(&body).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("Sent message to SQS queue {}: {:?}", target, message);
                DeliveryOutcome::delivered(target)
            }
            Err(e) => {
                error!(
                    code = e.code(),
                    index,
                    key = %message.key,
                    "Failed to send message to SQS: {}",
                    e
                );
                DeliveryOutcome::failed(target, &e)
            }
        }
    }
}

/// One message per S3 record, in input order
pub fn build_messages(event: &S3EventMessage) -> Result<Vec<UploadMessage>> {
    let messages = event
        .s3_records()
        .map(UploadMessage::from_record)
        .collect::<Result<Vec<_>>>()?;

    let skipped = event.records.len() - messages.len();
    if skipped > 0 {
        debug!("Skipped {} records from other event sources", skipped);
    }
    Ok(messages)
}
