//! OpenAI adapters
//!
//! - Transcription: Whisper (`/audio/transcriptions`, multipart)
//! - Speech: `/audio/speech`, mp3 output

pub mod data;
pub mod stt;
pub mod tts;

pub use stt::{OpenAiTranscriber, WhisperDefaults};
pub use tts::{OpenAiSpeechDefaults, OpenAiSynthesizer};

use super::http::Vendor;

pub(crate) const OPENAI: Vendor = Vendor::new("OpenAI").error_at(&["/error/message"]);

pub(crate) const API_KEY_VAR: &str = "OPENAI_API_KEY";
