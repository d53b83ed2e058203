//! The Translation Relay Handler.
//!
//! One invocation per notification event, strictly linear: locate the source
//! object, fetch and validate the input document, translate, write the result
//! to the destination bucket, report. The destination write is the last step,
//! so no failure path leaves partial output behind; re-delivered events
//! overwrite the same destination key with identical content.

use crate::error::{RelayError, StorageError};
use crate::event::{ObjectLocation, S3Event};
use crate::storage::ObjectStore;
use crate::translator::Translator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// AWS Translate's documented input ceiling. The guard exists to produce a
/// clear local error instead of an opaque remote rejection.
pub const MAX_TEXT_BYTES: usize = 10_000;

/// Destination keys are the source key behind this literal prefix.
pub const OUTPUT_KEY_PREFIX: &str = "translated_";

/// Validated input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

/// Raw input shape before validation; fields may be absent.
#[derive(Debug, Deserialize)]
struct RawTranslationRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    target_language: Option<String>,
}

/// Output document, written once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
}

/// Status returned to the invoking platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: ResponseBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ResponseBody {
    Success { message: String, output_key: String },
    Failure { error: String },
}

impl InvocationResult {
    fn success(output_key: String) -> Self {
        Self {
            status_code: 200,
            body: ResponseBody::Success {
                message: "Translation completed".to_string(),
                output_key,
            },
        }
    }

    fn failure(error: String) -> Self {
        Self {
            status_code: 500,
            body: ResponseBody::Failure { error },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    pub fn output_key(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Success { output_key, .. } => Some(output_key),
            ResponseBody::Failure { .. } => None,
        }
    }
}

/// Parse and validate the fetched input bytes.
fn parse_request(bytes: &[u8]) -> Result<TranslationRequest, RelayError> {
    let text = String::from_utf8(bytes.to_vec())?;
    let raw: RawTranslationRequest = serde_json::from_str(&text)?;

    let text = match raw.text {
        Some(t) if !t.is_empty() => t,
        _ => return Err(RelayError::MissingField("text")),
    };
    let target_language = match raw.target_language {
        Some(l) if !l.is_empty() => l,
        _ => return Err(RelayError::MissingField("target_language")),
    };

    // Measured in UTF-8 bytes, not characters
    if text.len() > MAX_TEXT_BYTES {
        return Err(RelayError::PayloadTooLarge {
            size: text.len(),
            limit: MAX_TEXT_BYTES,
        });
    }

    Ok(TranslationRequest {
        text,
        target_language,
    })
}

/// The relay itself. Collaborators are injected so tests can substitute
/// doubles; there are no ambient clients.
pub struct TranslationRelay {
    store: Arc<dyn ObjectStore>,
    translator: Arc<dyn Translator>,
    target_bucket: String,
}

impl TranslationRelay {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        translator: Arc<dyn Translator>,
        target_bucket: String,
    ) -> Self {
        Self {
            store,
            translator,
            target_bucket,
        }
    }

    /// Process one event and report the outcome. Every error is caught here,
    /// logged, and converted into a failure result; nothing escapes to the
    /// invoking platform.
    pub async fn handle(&self, event: &S3Event) -> InvocationResult {
        match self.process(event).await {
            Ok(output_key) => {
                info!("Translation written to {output_key} in {}", self.target_bucket);
                InvocationResult::success(output_key)
            },
            Err(err) => {
                error!("Relay invocation failed: {err}");
                InvocationResult::failure(err.to_string())
            },
        }
    }

    /// The linear pipeline. Returns the destination key on success.
    async fn process(&self, event: &S3Event) -> Result<String, RelayError> {
        let source = ObjectLocation::from_event(event)?;
        info!("Processing {} from bucket {}", source.key, source.bucket);

        let bytes = self
            .store
            .get_object(&source.bucket, &source.key)
            .await
            .map_err(|e| RelayError::InputNotFound {
                key: source.key.clone(),
                source: match e {
                    StorageError::NotFound(msg) => anyhow::anyhow!(msg),
                    StorageError::Service(err) => err,
                },
            })?;

        let request = parse_request(&bytes)?;
        info!(
            "Translating {} bytes to {}",
            request.text.len(),
            request.target_language
        );

        let translated_text = self
            .translator
            .translate(&request.text, &request.target_language)
            .await
            .map_err(RelayError::TranslationService)?;

        let result = TranslationResult {
            original_text: request.text,
            translated_text,
            target_language: request.target_language,
        };

        let output_key = format!("{OUTPUT_KEY_PREFIX}{}", source.key);
        // serde_json leaves non-ASCII unescaped, as required for the output
        let body = serde_json::to_vec(&result).map_err(|e| RelayError::OutputWrite {
            key: output_key.clone(),
            source: e.into(),
        })?;
        self.store
            .put_object(&self.target_bucket, &output_key, body)
            .await
            .map_err(|e| RelayError::OutputWrite {
                key: output_key.clone(),
                source: e.into(),
            })?;

        Ok(output_key)
    }
}
