//! Client for the remote transcription service.
//!
//! Covers the four endpoint families the service exposes: transcription
//! (multipart audio upload), transcript history, translation, and login.
//! All calls are independent of each other; failures are surfaced to the
//! caller and never retried.

mod auth;
mod client;
mod history;
mod transcribe;
mod translate;

pub use client::{ApiClient, DEFAULT_TIMEOUT_SECS};
pub use history::{HistoryFormat, TranscriptRecord};
