use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Destination
    pub target_bucket: String,

    // Translation API
    pub translate_api_url: String,
    pub translate_api_key: Option<String>,

    // S3 (endpoint override for MinIO/LocalStack; path-style when set)
    pub s3_endpoint_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Destination bucket for translated documents
            target_bucket: std::env::var("TARGET_BUCKET_NAME")
                .context("TARGET_BUCKET_NAME not set")?,

            // Translation API
            translate_api_url: std::env::var("TRANSLATE_API_URL")
                .context("TRANSLATE_API_URL not set")?,
            translate_api_key: std::env::var("TRANSLATE_API_KEY").ok(),

            // S3
            s3_endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
        })
    }
}
