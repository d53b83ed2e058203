//! Translation capability collaborator.
//!
//! [`HttpTranslator`] speaks the LibreTranslate-compatible wire format:
//! POST `{q, source, target, format}` and read back `{translatedText}`.
//! Source language is always `"auto"`; the remote service owns detection and
//! the set of supported target codes. One call per invocation, no retry —
//! re-delivery is the platform's job.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`, detecting the source language.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct TranslateApiRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateApiResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Clone, Debug)]
pub struct HttpTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(client: reqwest::Client, api_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let request = TranslateApiRequest {
            q: text,
            source: "auto",
            target: target_language,
            format: "text",
        };

        let mut builder = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .send()
            .await
            .context("Failed to send request to translation API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            anyhow::bail!("Translation API error ({}): {}", status, body);
        }

        let api_response: TranslateApiResponse = response
            .json()
            .await
            .context("Failed to parse translation API response")?;

        if api_response.translated_text.is_empty() {
            anyhow::bail!("Translation API returned an empty translation");
        }

        Ok(api_response.translated_text)
    }
}
