//! Google Cloud Speech-to-Text adapter (REST `speech:recognize`, API key auth)

pub mod data;
pub mod stt;

pub use stt::{GoogleCloudTranscriber, GoogleSttDefaults};

use super::http::Vendor;

pub(crate) const GOOGLE: Vendor = Vendor::new("Google Cloud").error_at(&["/error/message"]);

pub(crate) const API_KEY_VAR: &str = "GOOGLE_CLOUD_API_KEY";
