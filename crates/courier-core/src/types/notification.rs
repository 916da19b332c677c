//! S3 event notification types
//!
//! Inbound side of the notifier: the envelope S3 hands to the function and
//! the records inside it. Only the handful of fields the notifier reads are
//! modelled; everything else on the wire is ignored.

use crate::{Error, Result, S3_EVENT_SOURCE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Event Envelope
// ============================================================================

/// S3 event message (contains multiple records)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct S3EventMessage {
    #[serde(default, deserialize_with = "lenient_records")]
    pub records: Vec<S3EventRecord>,
}

impl S3EventMessage {
    /// Records emitted by S3 itself, in input order
    pub fn s3_records(&self) -> impl Iterator<Item = &S3EventRecord> {
        self.records.iter().filter(|r| r.is_s3())
    }
}

// ============================================================================
// Event Record
// ============================================================================

/// One entry of the triggering batch.
///
/// Every member is read leniently: a value of an unexpected type reads as
/// absent, so a foreign record never breaks the batch and one bad optional
/// member never hides its siblings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub event_source: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub s3: Option<S3Info>,
}

impl S3EventRecord {
    /// Whether this record was produced by S3
    pub fn is_s3(&self) -> bool {
        self.event_source.as_deref() == Some(S3_EVENT_SOURCE)
    }

    pub fn bucket_name(&self) -> Result<&str> {
        self.s3
            .as_ref()
            .and_then(|s3| s3.bucket.as_ref())
            .and_then(|bucket| bucket.name.as_deref())
            .ok_or_else(|| Error::MalformedRecord("missing s3.bucket.name".into()))
    }

    /// Object key exactly as received (still URL-encoded)
    pub fn raw_key(&self) -> Result<&str> {
        self.object()
            .and_then(|object| object.key.as_deref())
            .ok_or_else(|| Error::MalformedRecord("missing s3.object.key".into()))
    }

    pub fn object_size(&self) -> Option<u64> {
        self.object().and_then(|object| object.size)
    }

    fn object(&self) -> Option<&S3ObjectInfo> {
        self.s3.as_ref().and_then(|s3| s3.object.as_ref())
    }
}

/// Read a member as absent when its value has an unexpected type
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Read the batch entry by entry; an entry that is not an object becomes an
/// empty record and is skipped with the other foreign records
fn lenient_records<'de, D>(deserializer: D) -> std::result::Result<Vec<S3EventRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<serde_json::Value> = lenient(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Info {
    #[serde(default, deserialize_with = "lenient")]
    pub bucket: Option<S3BucketInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub object: Option<S3ObjectInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3BucketInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ObjectInfo {
    /// URL-encoded object key
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_s3_record() {
        let event: S3EventMessage = serde_json::from_value(json!({
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2024-01-01T00:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "bucket": { "name": "photos", "arn": "arn:aws:s3:::photos" },
                    "object": { "key": "img%2F1.png", "size": 2048, "eTag": "abc" }
                }
            }]
        }))
        .unwrap();

        let record = &event.records[0];
        assert!(record.is_s3());
        assert_eq!(record.bucket_name().unwrap(), "photos");
        assert_eq!(record.raw_key().unwrap(), "img%2F1.png");
        assert_eq!(record.object_size(), Some(2048));
        assert_eq!(record.event_time.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_missing_records_is_empty() {
        let event: S3EventMessage = serde_json::from_value(json!({})).unwrap();
        assert!(event.records.is_empty());
    }

    #[test]
    fn test_foreign_records_are_skipped() {
        let event: S3EventMessage = serde_json::from_value(json!({
            "Records": [
                { "eventSource": "aws:sqs", "body": "hello" },
                { "EventSource": "aws:sns", "Sns": { "Message": "hi" } },
                { "eventSource": "custom", "s3": ["unexpected", "shape"] },
                { "eventSource": "aws:s3", "s3": { "bucket": { "name": "b" }, "object": { "key": "k" } } }
            ]
        }))
        .unwrap();

        assert_eq!(event.records.len(), 4);
        assert!(event.records[2].s3.is_none());
        assert_eq!(event.s3_records().count(), 1);
    }

    #[test]
    fn test_badly_typed_foreign_record_keeps_batch() {
        let event: S3EventMessage = serde_json::from_value(json!({
            "Records": [
                { "eventSource": "aws:kinesis", "eventTime": 1700000000 },
                { "eventSource": 42, "s3": { "bucket": "not an object" } },
                {
                    "eventSource": "aws:s3",
                    "eventTime": "2024-01-01T00:00:00Z",
                    "s3": { "bucket": { "name": "photos" }, "object": { "key": "a.png", "size": 1 } }
                }
            ]
        }))
        .unwrap();

        assert_eq!(event.records.len(), 3);
        assert_eq!(event.records[0].event_time, None);
        assert_eq!(event.records[1].event_source, None);

        let records: Vec<_> = event.s3_records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bucket_name().unwrap(), "photos");
    }

    #[test]
    fn test_non_object_entries_keep_batch() {
        let event: S3EventMessage = serde_json::from_value(json!({
            "Records": [
                42,
                "text",
                null,
                { "eventSource": "aws:s3", "s3": { "bucket": { "name": "photos" }, "object": { "key": "k" } } }
            ]
        }))
        .unwrap();

        assert_eq!(event.records.len(), 4);
        assert_eq!(event.s3_records().count(), 1);

        let event: S3EventMessage =
            serde_json::from_value(json!({ "Records": "not a list" })).unwrap();
        assert!(event.records.is_empty());
    }

    #[test]
    fn test_badly_typed_size_keeps_bucket_and_key() {
        let event: S3EventMessage = serde_json::from_value(json!({
            "Records": [
                {
                    "eventSource": "aws:s3",
                    "s3": { "bucket": { "name": "photos" }, "object": { "key": "a.png", "size": "2048" } }
                },
                {
                    "eventSource": "aws:s3",
                    "s3": { "bucket": { "name": "photos" }, "object": { "key": "b.png", "size": -1 } }
                }
            ]
        }))
        .unwrap();

        for record in &event.records {
            assert_eq!(record.bucket_name().unwrap(), "photos");
            assert!(record.raw_key().is_ok());
            assert_eq!(record.object_size(), None);
        }
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let record = S3EventRecord {
            event_source: Some(S3_EVENT_SOURCE.to_string()),
            ..Default::default()
        };

        assert!(matches!(record.bucket_name(), Err(Error::MalformedRecord(_))));
        assert!(matches!(record.raw_key(), Err(Error::MalformedRecord(_))));
        assert_eq!(record.object_size(), None);
    }
}
