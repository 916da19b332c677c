//! Normalized upload message
//!
//! The unit Courier produces: one per qualifying S3 record, published in
//! aggregate to the topic and individually to the queue.

use crate::types::S3EventRecord;
use crate::utils::decode_object_key;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Message kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    #[serde(rename = "image_upload")]
    ImageUpload,
}

/// Upload message derived from exactly one S3 record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub bucket: String,
    /// Fully decoded object key
    pub key: String,
    pub size: Option<u64>,
    pub event_time: Option<String>,
}

impl UploadMessage {
    /// Build the message for a qualifying record.
    ///
    /// Fails when the record lacks a bucket name or object key.
    pub fn from_record(record: &S3EventRecord) -> Result<Self> {
        Ok(Self {
            kind: MessageKind::ImageUpload,
            bucket: record.bucket_name()?.to_string(),
            key: decode_object_key(record.raw_key()?),
            size: record.object_size(),
            event_time: record.event_time.clone(),
        })
    }

    /// Compact JSON body for a queue message
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Pretty-printed JSON array body for the aggregate notification
pub fn render_batch(messages: &[UploadMessage]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}
