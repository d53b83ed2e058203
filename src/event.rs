//! Decoding of S3 object-created notification events.
//!
//! Only the fields this relay consumes are modeled: the bucket name and the
//! object key of each record. Keys arrive percent-encoded with `+` standing
//! in for spaces, so they are decoded before use.

use crate::error::RelayError;
use serde::Deserialize;

/// An S3 bucket notification event, as delivered to the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    #[serde(default)]
    pub key: String,
}

/// A (bucket, key) pair locating one object, with the key already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    /// Extract the source object location from the first event record.
    ///
    /// Events carrying more than one record are truncated to the first; the
    /// notification configurations this relay is attached to deliver one
    /// record per object.
    pub fn from_event(event: &S3Event) -> Result<Self, RelayError> {
        let record = event
            .records
            .first()
            .ok_or_else(|| RelayError::MalformedEvent("event contains no records".to_string()))?;

        let bucket = record.s3.bucket.name.clone();
        if bucket.is_empty() {
            return Err(RelayError::MalformedEvent(
                "record is missing the bucket name".to_string(),
            ));
        }

        let key = decode_object_key(&record.s3.object.key)?;
        if key.is_empty() {
            return Err(RelayError::MalformedEvent(
                "record is missing the object key".to_string(),
            ));
        }

        Ok(Self { bucket, key })
    }
}

/// Decode a percent-encoded object key, treating `+` as a space.
fn decode_object_key(raw: &str) -> Result<String, RelayError> {
    let plus_decoded = raw.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|cow| cow.into_owned())
        .map_err(|e| RelayError::MalformedEvent(format!("object key is not decodable: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_json(bucket: &str, key: &str) -> S3Event {
        serde_json::from_value(serde_json::json!({
            "Records": [{
                "s3": {
                    "bucket": { "name": bucket },
                    "object": { "key": key }
                }
            }]
        }))
        .expect("valid event JSON")
    }

    #[test]
    fn test_from_event_extracts_bucket_and_key() {
        let event = event_json("input-bucket", "input.json");

        let location = ObjectLocation::from_event(&event).expect("valid event");

        assert_eq!(location.bucket, "input-bucket");
        assert_eq!(location.key, "input.json");
    }

    #[test]
    fn test_from_event_decodes_percent_encoding() {
        let event = event_json("input-bucket", "folder%2Fmy%20file.json");

        let location = ObjectLocation::from_event(&event).expect("valid event");

        assert_eq!(location.key, "folder/my file.json");
    }

    #[test]
    fn test_from_event_decodes_plus_as_space() {
        let event = event_json("input-bucket", "my+file+name.json");

        let location = ObjectLocation::from_event(&event).expect("valid event");

        assert_eq!(location.key, "my file name.json");
    }

    #[test]
    fn test_from_event_takes_first_record_only() {
        let event: S3Event = serde_json::from_value(serde_json::json!({
            "Records": [
                { "s3": { "bucket": { "name": "first" }, "object": { "key": "a.json" } } },
                { "s3": { "bucket": { "name": "second" }, "object": { "key": "b.json" } } }
            ]
        }))
        .expect("valid event JSON");

        let location = ObjectLocation::from_event(&event).expect("valid event");

        assert_eq!(location.bucket, "first");
        assert_eq!(location.key, "a.json");
    }

    #[test]
    fn test_from_event_rejects_empty_records() {
        let event: S3Event =
            serde_json::from_value(serde_json::json!({ "Records": [] })).expect("valid JSON");

        let err = ObjectLocation::from_event(&event).unwrap_err();

        assert!(matches!(err, RelayError::MalformedEvent(_)));
        assert!(err.to_string().contains("no records"));
    }

    #[test]
    fn test_from_event_rejects_missing_records_field() {
        let event: S3Event =
            serde_json::from_value(serde_json::json!({})).expect("records field defaults");

        assert!(ObjectLocation::from_event(&event).is_err());
    }

    #[test]
    fn test_from_event_rejects_empty_bucket_name() {
        let event = event_json("", "input.json");

        let err = ObjectLocation::from_event(&event).unwrap_err();

        assert!(err.to_string().contains("bucket"));
    }

    #[test]
    fn test_from_event_rejects_empty_key() {
        let event = event_json("input-bucket", "");

        let err = ObjectLocation::from_event(&event).unwrap_err();

        assert!(err.to_string().contains("object key"));
    }

    #[test]
    fn test_decode_object_key_plain() {
        assert_eq!(decode_object_key("input.json").unwrap(), "input.json");
    }

    #[test]
    fn test_decode_object_key_encoded_plus() {
        // %2B is a literal '+' in the original key
        assert_eq!(decode_object_key("a%2Bb.json").unwrap(), "a+b.json");
    }

    #[test]
    fn test_decode_object_key_unicode() {
        assert_eq!(
            decode_object_key("caf%C3%A9.json").unwrap(),
            "café.json"
        );
    }
}
