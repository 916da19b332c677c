//! Courier Core Library
//!
//! Wire types, configuration and error handling for the Courier upload
//! notifier. Nothing in this crate talks to the network.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::NotifierConfig;
pub use error::{Error, Result};

/// Courier version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event source tag carried by S3 notification records
pub const S3_EVENT_SOURCE: &str = "aws:s3";

/// Subject line of the aggregate topic notification
pub const NOTIFICATION_SUBJECT: &str = "New image uploaded";

/// Environment variable holding the notification topic ARN
pub const TOPIC_ARN_VAR: &str = "SNS_TOPIC_ARN";

/// Environment variable holding the work queue URL
pub const QUEUE_URL_VAR: &str = "SQS_QUEUE_URL";
