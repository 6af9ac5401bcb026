//! Deepgram adapters
//!
//! Both adapters accept a missing key at construction so they can be listed;
//! the first capability call fails instead.

pub mod data;
pub mod stt;
pub mod tts;

pub use stt::{DeepgramTranscriber, NovaDefaults};
pub use tts::{AuraDefaults, DeepgramSynthesizer};

use super::http::Vendor;

pub(crate) const DEEPGRAM: Vendor = Vendor::new("Deepgram").error_at(&["/err_msg", "/error"]);

pub(crate) const API_KEY_VAR: &str = "DEEPGRAM_API_KEY";

pub(crate) fn auth_header(key: &str) -> String {
    format!("Token {}", key)
}
