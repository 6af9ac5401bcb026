//! Shared test utilities for pipeline testing
//!
//! Recording doubles for the three capabilities and an [`AdapterFactory`]
//! that hands them out, so orchestrator and server tests can run the whole
//! pipeline without any vendor.

use crate::capabilities::{
    AudioResult, ChatMessage, ChatOptions, ChatResult, SynthesizeOptions, TranscribeOptions,
    TranscriptionResult, Voice,
};
use crate::polling::Sleeper;
use crate::providers::{
    AdapterFactory, Chatter, LlmAdapter, SttAdapter, Synthesizer, Transcriber, TtsAdapter,
};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock transcriber
///
/// Returns a fixed transcript and records every call.
#[derive(Clone)]
pub struct MockTranscriber {
    text: String,
    language: Option<String>,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<(Vec<u8>, TranscribeOptions)>>>,
}

impl MockTranscriber {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            failure: None,
            calls: Arc::default(),
        }
    }

    /// Report this language as detected
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Fail every call with a provider error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> Vec<(Vec<u8>, TranscribeOptions)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    fn name(&self) -> &str {
        "mock-stt"
    }

    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult> {
        lock(&self.calls).push((audio.to_vec(), options.clone()));

        if let Some(ref message) = self.failure {
            return Err(Error::provider("mock-stt", message.clone()));
        }

        Ok(TranscriptionResult {
            text: self.text.clone(),
            confidence: Some(1.0),
            language: self.language.clone().or_else(|| options.language.clone()),
            duration: None,
        })
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        &["webm"]
    }

    fn supported_languages(&self) -> &'static [&'static str] {
        &["en"]
    }
}

/// Mock chatter
///
/// Replies with a fixed message and records the messages it was sent.
#[derive(Clone)]
pub struct MockChatter {
    reply: String,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<(Vec<ChatMessage>, ChatOptions)>>>,
}

impl MockChatter {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            failure: None,
            calls: Arc::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> Vec<(Vec<ChatMessage>, ChatOptions)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl Chatter for MockChatter {
    fn name(&self) -> &str {
        "mock-llm"
    }

    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<ChatResult> {
        lock(&self.calls).push((messages.to_vec(), options.clone()));

        if let Some(ref message) = self.failure {
            return Err(Error::provider("mock-llm", message.clone()));
        }

        Ok(ChatResult {
            message: self.reply.clone(),
            model: options.model.clone().unwrap_or_else(|| "mock-model".to_string()),
            tokens_used: None,
        })
    }

    fn available_models(&self) -> Vec<String> {
        vec!["mock-model".to_string()]
    }
}

/// Mock synthesizer
///
/// Returns fixed audio bytes and records the text it was asked to speak.
#[derive(Clone)]
pub struct MockSynthesizer {
    audio: Vec<u8>,
    format: String,
    failure: Option<String>,
    calls: Arc<Mutex<Vec<(String, SynthesizeOptions)>>>,
}

impl MockSynthesizer {
    pub fn new(audio: impl Into<Vec<u8>>, format: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            format: format.into(),
            failure: None,
            calls: Arc::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(Vec::new(), "mp3")
        }
    }

    pub fn calls(&self) -> Vec<(String, SynthesizeOptions)> {
        lock(&self.calls).clone()
    }
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new(b"mock-audio".to_vec(), "mp3")
    }
}

#[async_trait]
impl Synthesizer for MockSynthesizer {
    fn name(&self) -> &str {
        "mock-tts"
    }

    async fn synthesize(&self, text: &str, options: &SynthesizeOptions) -> Result<AudioResult> {
        lock(&self.calls).push((text.to_string(), options.clone()));

        if let Some(ref message) = self.failure {
            return Err(Error::provider("mock-tts", message.clone()));
        }

        Ok(AudioResult::new(self.audio.clone(), self.format.clone()))
    }

    async fn list_voices(&self) -> Result<Vec<Voice>> {
        Ok(vec![Voice {
            id: "mock-voice".to_string(),
            name: "Mock".to_string(),
            language: Some("en".to_string()),
            gender: None,
            description: None,
        }])
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        &["mp3"]
    }
}

/// Factory handing out clones of the three mocks
///
/// Every resolution is recorded as `"<capability>:<identifier>"`.
#[derive(Clone)]
pub struct MockFactory {
    pub transcriber: MockTranscriber,
    pub chatter: MockChatter,
    pub synthesizer: MockSynthesizer,
    resolved: Arc<Mutex<Vec<String>>>,
}

impl MockFactory {
    pub fn new(
        transcriber: MockTranscriber,
        chatter: MockChatter,
        synthesizer: MockSynthesizer,
    ) -> Self {
        Self {
            transcriber,
            chatter,
            synthesizer,
            resolved: Arc::default(),
        }
    }

    pub fn resolved(&self) -> Vec<String> {
        lock(&self.resolved).clone()
    }
}

impl Default for MockFactory {
    fn default() -> Self {
        Self::new(
            MockTranscriber::new("Hello"),
            MockChatter::new("Hi there"),
            MockSynthesizer::default(),
        )
    }
}

impl AdapterFactory for MockFactory {
    fn transcriber(&self, adapter: SttAdapter) -> Result<Box<dyn Transcriber>> {
        lock(&self.resolved).push(format!("stt:{}", adapter));
        Ok(Box::new(self.transcriber.clone()))
    }

    fn chatter(&self, adapter: LlmAdapter) -> Result<Box<dyn Chatter>> {
        lock(&self.resolved).push(format!("llm:{}", adapter));
        Ok(Box::new(self.chatter.clone()))
    }

    fn synthesizer(&self, adapter: TtsAdapter) -> Result<Box<dyn Synthesizer>> {
        lock(&self.resolved).push(format!("tts:{}", adapter));
        Ok(Box::new(self.synthesizer.clone()))
    }
}

/// Sleeper that returns immediately and counts how often it was asked to wait
#[derive(Debug, Default)]
pub struct InstantSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl InstantSleeper {
    pub fn count(&self) -> usize {
        lock(&self.sleeps).len()
    }
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        lock(&self.sleeps).push(duration);
    }
}
