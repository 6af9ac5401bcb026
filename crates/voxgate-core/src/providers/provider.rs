//! Capability traits
//!
//! One trait per capability. Adapters implement exactly one of them and are
//! used through trait objects, so every trait is object safe.

use crate::Result;
use crate::capabilities::{
    AudioResult, ChatMessage, ChatOptions, ChatResult, SynthesizeOptions, TranscribeOptions,
    TranscriptionResult, Voice,
};
use async_trait::async_trait;

/// Speech to text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Vendor display name
    fn name(&self) -> &str;

    /// Transcribe one complete audio blob
    ///
    /// # Arguments
    /// * `audio` - Encoded audio bytes (usually webm/opus from a browser)
    /// * `options` - Language hint and model override
    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult>;

    fn supported_formats(&self) -> &'static [&'static str];

    fn supported_languages(&self) -> &'static [&'static str];
}

/// Chat completion
#[async_trait]
pub trait Chatter: Send + Sync {
    /// Vendor display name
    fn name(&self) -> &str;

    /// Send the full message list and return the assistant reply.
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<ChatResult>;

    /// Model identifiers this adapter can be asked for
    fn available_models(&self) -> Vec<String>;
}

/// Text to speech
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Vendor display name
    fn name(&self) -> &str;

    async fn synthesize(&self, text: &str, options: &SynthesizeOptions) -> Result<AudioResult>;

    /// Voices usable as `SynthesizeOptions::voice`.
    ///
    /// Adapters backed by a remote listing may degrade to a static list (or an
    /// empty one) instead of failing.
    async fn list_voices(&self) -> Result<Vec<Voice>>;

    fn supported_formats(&self) -> &'static [&'static str];
}
