//! Configuration for Courier
//!
//! Both settings are required and read once at process start:
//!
//! ```text
//! SNS_TOPIC_ARN=arn:aws:sns:us-east-1:123456789012:image-uploads
//! SQS_QUEUE_URL=https://sqs.us-east-1.amazonaws.com/123456789012/image-uploads
//! ```

use crate::{Error, Result, QUEUE_URL_VAR, TOPIC_ARN_VAR};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// ARN of the notification topic receiving the aggregate message
    pub topic_arn: String,
    /// URL of the work queue receiving one message per upload, as configured
    pub queue_url: String,
}

impl NotifierConfig {
    pub fn new(topic_arn: impl Into<String>, queue_url: impl Into<String>) -> Self {
        Self {
            topic_arn: topic_arn.into(),
            queue_url: queue_url.into(),
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let topic_arn = required(&lookup, TOPIC_ARN_VAR)?;
        let queue_url = required(&lookup, QUEUE_URL_VAR)?;

        let config = Self::new(topic_arn, queue_url);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.topic_arn.trim().is_empty() {
            return Err(Error::InvalidConfig(format!(
                "{} must not be blank",
                TOPIC_ARN_VAR
            )));
        }
        let parsed = Url::parse(&self.queue_url).map_err(|e| {
            Error::InvalidConfig(format!(
                "{} is not a valid URL ({}): {}",
                QUEUE_URL_VAR, self.queue_url, e
            ))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "{} must be an absolute URL: {}",
                QUEUE_URL_VAR, self.queue_url
            )));
        }
        Ok(())
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Some(_) => Err(Error::InvalidConfig(format!("{} must not be blank", name))),
        None => Err(Error::MissingConfig(name)),
    }
}
