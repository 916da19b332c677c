//! Delivery seams
//!
//! The notifier only talks to the outside world through these two traits so
//! that SNS and SQS can be swapped for test doubles.

use async_trait::async_trait;
use courier_core::Result;

/// Fan-out topic receiving the aggregate notification
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Topic identifier used in logs and delivery outcomes
    fn target(&self) -> &str;

    async fn publish(&self, subject: &str, body: &str) -> Result<()>;
}

/// Work queue receiving one message per upload
#[async_trait]
pub trait QueueSender: Send + Sync {
    /// Queue identifier used in logs and delivery outcomes
    fn target(&self) -> &str;

    async fn send(&self, body: &str) -> Result<()>;
}
