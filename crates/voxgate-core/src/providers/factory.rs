//! Provider factory and registry
//!
//! Maps the adapter identifiers used in the catalog to concrete adapters.
//! The set of adapters is closed: each capability has an enum and the
//! registry matches on it. A fresh adapter is built for every resolution.

use super::deepgram::{DeepgramSynthesizer, DeepgramTranscriber};
use super::elevenlabs::ElevenLabsSynthesizer;
use super::google::GoogleCloudTranscriber;
use super::hamsa::{HamsaSynthesizer, HamsaTranscriber};
use super::openai::{OpenAiSynthesizer, OpenAiTranscriber};
use super::openrouter::OpenRouterChatter;
use super::provider::{Chatter, Synthesizer, Transcriber};
use crate::config::ProviderSettings;
use crate::polling::{Sleeper, TokioSleeper};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Speech-to-text adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SttAdapter {
    OpenAi,
    Hamsa,
    Deepgram,
    GoogleCloud,
}

impl SttAdapter {
    pub const ALL: [SttAdapter; 4] = [
        SttAdapter::OpenAi,
        SttAdapter::Hamsa,
        SttAdapter::Deepgram,
        SttAdapter::GoogleCloud,
    ];

    /// Identifier used in the catalog
    pub fn as_str(&self) -> &'static str {
        match self {
            SttAdapter::OpenAi => "OpenAISTT",
            SttAdapter::Hamsa => "HamsaSTT",
            SttAdapter::Deepgram => "DeepgramSTT",
            SttAdapter::GoogleCloud => "GoogleCloudSTT",
        }
    }
}

/// Chat adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmAdapter {
    OpenRouter,
}

impl LlmAdapter {
    pub const ALL: [LlmAdapter; 1] = [LlmAdapter::OpenRouter];

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmAdapter::OpenRouter => "OpenRouterLLM",
        }
    }
}

/// Text-to-speech adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtsAdapter {
    OpenAi,
    Hamsa,
    Deepgram,
    ElevenLabs,
}

impl TtsAdapter {
    pub const ALL: [TtsAdapter; 4] = [
        TtsAdapter::OpenAi,
        TtsAdapter::Hamsa,
        TtsAdapter::Deepgram,
        TtsAdapter::ElevenLabs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TtsAdapter::OpenAi => "OpenAITTS",
            TtsAdapter::Hamsa => "HamsaTTS",
            TtsAdapter::Deepgram => "DeepgramTTS",
            TtsAdapter::ElevenLabs => "ElevenLabsTTS",
        }
    }
}

impl FromStr for SttAdapter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

impl FromStr for LlmAdapter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

impl FromStr for TtsAdapter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for SttAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LlmAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TtsAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds adapters for the orchestrator
///
/// The default implementation is [`ProviderRegistry`]; tests substitute
/// recording doubles.
pub trait AdapterFactory: Send + Sync {
    fn transcriber(&self, adapter: SttAdapter) -> Result<Box<dyn Transcriber>>;

    fn chatter(&self, adapter: LlmAdapter) -> Result<Box<dyn Chatter>>;

    fn synthesizer(&self, adapter: TtsAdapter) -> Result<Box<dyn Synthesizer>>;

    /// Parse an identifier and build the adapter
    ///
    /// # Errors
    /// `UnknownProvider` for an unmapped identifier, or the adapter's
    /// construction error (e.g. a missing eager credential)
    fn resolve_transcriber(&self, identifier: &str) -> Result<Box<dyn Transcriber>> {
        self.transcriber(identifier.parse()?)
    }

    fn resolve_chatter(&self, identifier: &str) -> Result<Box<dyn Chatter>> {
        self.chatter(identifier.parse()?)
    }

    fn resolve_synthesizer(&self, identifier: &str) -> Result<Box<dyn Synthesizer>> {
        self.synthesizer(identifier.parse()?)
    }
}

/// Adapter registry backed by shared provider settings
#[derive(Clone)]
pub struct ProviderRegistry {
    settings: Arc<ProviderSettings>,
    sleeper: Arc<dyn Sleeper>,
}

impl ProviderRegistry {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the sleeper used by polling adapters
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }
}

impl AdapterFactory for ProviderRegistry {
    fn transcriber(&self, adapter: SttAdapter) -> Result<Box<dyn Transcriber>> {
        let settings = self.settings.as_ref();
        Ok(match adapter {
            SttAdapter::OpenAi => Box::new(OpenAiTranscriber::new(settings)?),
            SttAdapter::Hamsa => Box::new(
                HamsaTranscriber::new(settings)?.with_sleeper(self.sleeper.clone()),
            ),
            SttAdapter::Deepgram => Box::new(DeepgramTranscriber::new(settings)?),
            SttAdapter::GoogleCloud => Box::new(GoogleCloudTranscriber::new(settings)?),
        })
    }

    fn chatter(&self, adapter: LlmAdapter) -> Result<Box<dyn Chatter>> {
        let settings = self.settings.as_ref();
        Ok(match adapter {
            LlmAdapter::OpenRouter => Box::new(OpenRouterChatter::new(settings)?),
        })
    }

    fn synthesizer(&self, adapter: TtsAdapter) -> Result<Box<dyn Synthesizer>> {
        let settings = self.settings.as_ref();
        Ok(match adapter {
            TtsAdapter::OpenAi => Box::new(OpenAiSynthesizer::new(settings)?),
            TtsAdapter::Hamsa => Box::new(
                HamsaSynthesizer::new(settings)?.with_sleeper(self.sleeper.clone()),
            ),
            TtsAdapter::Deepgram => Box::new(DeepgramSynthesizer::new(settings)?),
            TtsAdapter::ElevenLabs => Box::new(ElevenLabsSynthesizer::new(settings)?),
        })
    }
}
