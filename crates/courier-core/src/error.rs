//! Error types for Courier

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration Errors
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Event Errors
    #[error("Malformed S3 record: {0}")]
    MalformedRecord(String),

    // Delivery Errors
    #[error("Topic publish failed: {0}")]
    TopicPublish(String),

    #[error("Queue send failed: {0}")]
    QueueSend(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingConfig(_) => "MissingConfig",
            Error::InvalidConfig(_) => "InvalidConfig",
            Error::MalformedRecord(_) => "MalformedRecord",
            Error::TopicPublish(_) => "TopicPublishFailed",
            Error::QueueSend(_) => "QueueSendFailed",
            Error::Serialization(_) => "SerializationError",
        }
    }
}
