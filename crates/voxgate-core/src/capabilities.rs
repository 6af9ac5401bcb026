//! Capability type definitions for the provider system
//!
//! Request options and results for the three capabilities: transcription,
//! chat completion and speech synthesis. All of them are plain values created
//! per call.

use serde::{Deserialize, Serialize};

/// Language values that ask the vendor to detect the spoken language.
pub const AUTO_DETECT_SENTINELS: &[&str] = &["auto", "multi", "detect"];

/// Language hint used by the conversation pipeline when the caller sends none.
pub const DEFAULT_PIPELINE_LANGUAGE: &str = "multi";

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Chat request options. Absent fields use the adapter default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Default::default()
        }
    }
}

/// Chat completion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResult {
    /// Assistant reply text
    pub message: String,
    /// Model that was actually invoked
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
}

/// How an adapter should pick the spoken language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSelection {
    /// No hint, or one of [`AUTO_DETECT_SENTINELS`]
    AutoDetect,
    /// Caller-supplied language code
    Code(String),
}

/// Transcription request options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeOptions {
    /// Language code, or "auto" / "multi" / "detect"
    pub language: Option<String>,
    pub model: Option<String>,
}

impl TranscribeOptions {
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            model: None,
        }
    }

    pub fn language_selection(&self) -> LanguageSelection {
        match self.language.as_deref().map(str::trim) {
            None | Some("") => LanguageSelection::AutoDetect,
            Some(code) if AUTO_DETECT_SENTINELS.contains(&code) => LanguageSelection::AutoDetect,
            Some(code) => LanguageSelection::Code(code.to_string()),
        }
    }
}

/// Transcription result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Transcribed text, empty when nothing was recognized
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Detected or requested language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Audio duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
}

/// Speech synthesis request options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesizeOptions {
    /// Vendor voice identifier
    pub voice: Option<String>,
    /// Adapter-defined speed (or stability) value
    pub speed: Option<f32>,
    pub model: Option<String>,
}

impl SynthesizeOptions {
    pub fn with_voice(voice: impl Into<String>) -> Self {
        Self {
            voice: Some(voice.into()),
            ..Default::default()
        }
    }
}

/// Synthesized audio, fully materialized in memory
#[derive(Debug, Clone, PartialEq)]
pub struct AudioResult {
    pub audio: Vec<u8>,
    /// Container/codec tag, e.g. "mp3" or "wav"
    pub format: String,
    /// Duration in seconds
    pub duration: Option<f32>,
}

impl AudioResult {
    pub fn new(audio: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            audio,
            format: format.into(),
            duration: None,
        }
    }
}

/// A selectable synthesis voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Declarative voice table row, see the per-vendor `data` modules
#[derive(Debug, Clone, Copy)]
pub struct VoiceSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub language: Option<&'static str>,
    pub gender: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl VoiceSpec {
    pub const fn new(id: &'static str, name: &'static str) -> Self {
        Self {
            id,
            name,
            language: None,
            gender: None,
            description: None,
        }
    }

    pub const fn language(mut self, language: &'static str) -> Self {
        self.language = Some(language);
        self
    }

    pub const fn gender(mut self, gender: &'static str) -> Self {
        self.gender = Some(gender);
        self
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl From<&VoiceSpec> for Voice {
    fn from(spec: &VoiceSpec) -> Self {
        Voice {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            language: spec.language.map(str::to_string),
            gender: spec.gender.map(str::to_string),
            description: spec.description.map(str::to_string),
        }
    }
}

/// Materialize a static voice table
pub fn voices_from(table: &[VoiceSpec]) -> Vec<Voice> {
    table.iter().map(Voice::from).collect()
}
