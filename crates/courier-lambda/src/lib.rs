//! Courier Lambda
//!
//! Relays S3 object-created events to an SNS topic (one aggregate alert per
//! invocation) and an SQS queue (one message per upload).

pub mod aws;
pub mod logging;
pub mod notifier;
pub mod publisher;

pub use notifier::Notifier;
pub use publisher::{QueueSender, TopicPublisher};
