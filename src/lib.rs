//! Single-event translation relay.
//!
//! Reacts to an S3 object-created notification, reads a JSON document
//! `{ text, target_language }` from the source bucket, translates the text
//! through an external translation API with automatic source-language
//! detection, and writes `{ original_text, translated_text, target_language }`
//! to the configured destination bucket under `translated_<source key>`.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod storage;
pub mod translator;
