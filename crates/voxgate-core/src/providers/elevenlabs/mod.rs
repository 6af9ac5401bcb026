//! ElevenLabs text to speech

pub mod data;
pub mod tts;

pub use tts::{ElevenLabsDefaults, ElevenLabsSynthesizer};

use super::http::Vendor;

pub(crate) const ELEVENLABS: Vendor =
    Vendor::new("ElevenLabs").error_at(&["/detail/message", "/detail"]);

pub(crate) const API_KEY_VAR: &str = "ELEVENLABS_API_KEY";
