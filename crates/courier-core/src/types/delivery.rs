//! Delivery outcomes and the handler response
//!
//! Every publish or send attempt is recorded as a [`DeliveryOutcome`]. A
//! [`ResponsePolicy`] decides how the collected [`DeliveryReport`] maps onto
//! the status returned to the invoking platform.

use crate::Error;
use serde::{Deserialize, Serialize};

/// Body returned when the event carried no S3 records
pub const NO_RECORDS_BODY: &str = "No S3 records to process.";

/// Result of one delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Topic ARN or queue URL the attempt targeted
    pub target: String,
    pub success: bool,
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub fn delivered(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(target: impl Into<String>, error: &Error) -> Self {
        Self {
            target: target.into(),
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Everything that happened during one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Number of qualifying records, regardless of delivery success
    pub processed: usize,
    /// Aggregate topic publish, absent when nothing was published
    pub topic: Option<DeliveryOutcome>,
    /// Queue sends in input order
    pub queue: Vec<DeliveryOutcome>,
}

impl DeliveryReport {
    pub fn new(processed: usize) -> Self {
        Self {
            processed,
            ..Default::default()
        }
    }

    /// Number of failed delivery attempts
    pub fn failures(&self) -> usize {
        self.topic.iter().chain(&self.queue).filter(|o| !o.success).count()
    }

    pub fn is_complete(&self) -> bool {
        self.failures() == 0
    }
}

/// How a delivery report turns into the handler response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Always report success; failures are visible in logs only
    #[default]
    AlwaysOk,
    /// Report 502 when any delivery failed
    SurfaceFailures,
}

impl ResponsePolicy {
    pub fn respond(&self, report: &DeliveryReport) -> HandlerResponse {
        if report.processed == 0 {
            return HandlerResponse::ok(NO_RECORDS_BODY);
        }

        let failures = report.failures();
        match self {
            ResponsePolicy::SurfaceFailures if failures > 0 => HandlerResponse {
                status_code: 502,
                body: format!(
                    "Processed {} image uploads with {} failed deliveries.",
                    report.processed, failures
                ),
            },
            _ => HandlerResponse::ok(format!("Processed {} image uploads.", report.processed)),
        }
    }
}

/// Value returned to the invoking platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }
}
