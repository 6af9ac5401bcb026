//! Conversation pipeline
//!
//! [`Orchestrator::converse`] runs one voice turn: transcribe the caller's
//! audio, send the transcript to the LLM, speak the reply and persist the
//! audio. Stages run strictly in order and the first failure ends the turn,
//! attributed to its stage. The single-capability operations used by the HTTP
//! layer go through the same catalog lookup and adapter resolution.

use crate::capabilities::{
    ChatMessage, ChatOptions, ChatResult, DEFAULT_PIPELINE_LANGUAGE, SynthesizeOptions,
    TranscribeOptions, TranscriptionResult, Voice,
};
use crate::catalog::{CapabilityKind, ModelInfo, ProviderDescriptor, ProvidersCatalog};
use crate::config::GatewayConfig;
use crate::providers::{AdapterFactory, ProviderRegistry};
use crate::storage::AudioStore;
use crate::{Error, Result, Stage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Instruction prepended to every conversation
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Always respond in plain text \
without using any markdown formatting. Do not use headers, bold, italics, lists, code blocks, \
or any other markdown syntax. Just provide your response as simple, clean text that can be \
read naturally by text-to-speech.";

/// One conversational turn
#[derive(Debug, Clone, Default)]
pub struct ConversationRequest {
    pub audio: Vec<u8>,
    pub stt_provider: String,
    pub llm_provider: String,
    pub llm_model: String,
    pub tts_provider: String,
    pub tts_voice: String,
    /// Earlier turns, sent to the LLM unmodified
    pub history: Vec<ChatMessage>,
    /// Language hint, defaults to auto-detection
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResult {
    pub transcription: String,
    pub detected_language: Option<String>,
    pub llm_response: String,
    pub audio_url: String,
    pub format: String,
}

/// Persisted speech from a standalone synthesis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisOutcome {
    pub audio_url: String,
    pub format: String,
    pub duration: Option<f32>,
}

/// STT → LLM → TTS orchestrator
pub struct Orchestrator {
    catalog: Arc<ProvidersCatalog>,
    factory: Arc<dyn AdapterFactory>,
    store: AudioStore,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Wire the production registry, catalog and audio store from configuration
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            catalog: Arc::new(config.catalog()),
            factory: Arc::new(ProviderRegistry::new(config.provider_settings())),
            store: AudioStore::new(&config.storage.audio_dir, &config.storage.public_prefix),
        }
    }

    pub fn catalog(&self) -> &ProvidersCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &AudioStore {
        &self.store
    }

    /// Run one full turn.
    ///
    /// # Errors
    /// Any failure is returned as `Error::Stage` naming the stage it happened
    /// in. Later stages are not resolved once an earlier one fails.
    pub async fn converse(&self, request: ConversationRequest) -> Result<ConversationResult> {
        // Stage 1: speech to text
        let language = request
            .language
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_PIPELINE_LANGUAGE.to_string());
        let transcription = self
            .transcribe(
                &request.stt_provider,
                &request.audio,
                &TranscribeOptions::with_language(language),
            )
            .await
            .map_err(|e| e.at_stage(Stage::Stt))?;

        tracing::info!(
            provider = %request.stt_provider,
            chars = transcription.text.len(),
            language = ?transcription.language,
            "Transcription complete"
        );

        // Stage 2: chat
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(request.history.iter().cloned());
        messages.push(ChatMessage::user(transcription.text.clone()));

        let reply = self
            .chat(
                &request.llm_provider,
                &messages,
                &ChatOptions::with_model(request.llm_model.clone()),
            )
            .await
            .map_err(|e| e.at_stage(Stage::Llm))?;

        tracing::info!(
            provider = %request.llm_provider,
            model = %reply.model,
            "LLM response received"
        );

        // Stage 3: text to speech
        let synthesizer = self
            .catalog
            .find_enabled(CapabilityKind::Tts, &request.tts_provider)
            .and_then(|descriptor| self.factory.resolve_synthesizer(&descriptor.adapter))
            .map_err(|e| e.at_stage(Stage::Tts))?;
        let audio = synthesizer
            .synthesize(
                &reply.message,
                &SynthesizeOptions::with_voice(request.tts_voice.clone()),
            )
            .await
            .map_err(|e| e.at_stage(Stage::Tts))?;

        tracing::info!(
            provider = %request.tts_provider,
            bytes = audio.audio.len(),
            format = %audio.format,
            "Speech synthesized"
        );

        // Stage 4: persist
        let stored = self
            .store
            .persist(&audio)
            .await
            .map_err(|e| e.at_stage(Stage::Storage))?;

        Ok(ConversationResult {
            transcription: transcription.text,
            detected_language: transcription.language,
            llm_response: reply.message,
            audio_url: stored.url,
            format: audio.format,
        })
    }

    /// Enabled providers for one capability, in catalog order
    pub fn providers(&self, capability: CapabilityKind) -> Vec<ProviderDescriptor> {
        self.catalog.enabled(capability).cloned().collect()
    }

    /// Models declared for an LLM provider
    pub fn models(&self, provider_id: &str) -> Result<Vec<ModelInfo>> {
        let descriptor = self.catalog.find_enabled(CapabilityKind::Llm, provider_id)?;
        Ok(descriptor.models.clone())
    }

    pub async fn voices(&self, provider_id: &str) -> Result<Vec<Voice>> {
        let descriptor = self.catalog.find_enabled(CapabilityKind::Tts, provider_id)?;
        let synthesizer = self.factory.resolve_synthesizer(&descriptor.adapter)?;
        synthesizer.list_voices().await
    }

    pub async fn transcribe(
        &self,
        provider_id: &str,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult> {
        let descriptor = self.catalog.find_enabled(CapabilityKind::Stt, provider_id)?;
        let transcriber = self.factory.resolve_transcriber(&descriptor.adapter)?;

        tracing::debug!(
            provider = provider_id,
            adapter = %descriptor.adapter,
            bytes = audio.len(),
            "Transcribing"
        );
        transcriber.transcribe(audio, options).await
    }

    pub async fn chat(
        &self,
        provider_id: &str,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<ChatResult> {
        let descriptor = self.catalog.find_enabled(CapabilityKind::Llm, provider_id)?;
        let chatter = self.factory.resolve_chatter(&descriptor.adapter)?;
        chatter.chat(messages, options).await
    }

    /// Synthesize and persist, returning the public URL
    pub async fn synthesize(
        &self,
        provider_id: &str,
        text: &str,
        options: &SynthesizeOptions,
    ) -> Result<SynthesisOutcome> {
        let descriptor = self.catalog.find_enabled(CapabilityKind::Tts, provider_id)?;
        let synthesizer = self.factory.resolve_synthesizer(&descriptor.adapter)?;

        let audio = synthesizer.synthesize(text, options).await?;
        let stored = self.store.persist(&audio).await?;

        Ok(SynthesisOutcome {
            audio_url: stored.url,
            format: audio.format,
            duration: audio.duration,
        })
    }
}

pub struct OrchestratorBuilder {
    catalog: Option<ProvidersCatalog>,
    factory: Option<Arc<dyn AdapterFactory>>,
    store: Option<AudioStore>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            factory: None,
            store: None,
        }
    }

    /// Defaults to the builtin catalog
    pub fn catalog(mut self, catalog: ProvidersCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn factory(mut self, factory: Arc<dyn AdapterFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn store(mut self, store: AudioStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<Orchestrator> {
        let factory = self
            .factory
            .ok_or_else(|| Error::config_error("Adapter factory is required"))?;
        let store = self
            .store
            .ok_or_else(|| Error::config_error("Audio store is required"))?;

        Ok(Orchestrator {
            catalog: Arc::new(self.catalog.unwrap_or_default()),
            factory,
            store,
        })
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
