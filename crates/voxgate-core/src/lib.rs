//! Core traits and types for voxgate
//!
//! This crate provides the capability abstractions, vendor adapters and the
//! STT → LLM → TTS conversation pipeline.

pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod error;
pub mod language;
pub mod pipeline;
pub mod polling;
pub mod providers;
pub mod storage;
pub mod testing;

// Re-exports
pub use capabilities::{
    AudioResult, ChatMessage, ChatOptions, ChatResult, LanguageSelection, Role, SynthesizeOptions,
    TranscribeOptions, TranscriptionResult, Voice,
};
pub use catalog::{CapabilityKind, ModelInfo, ProviderDescriptor, ProvidersCatalog};
pub use config::{GatewayConfig, LogFormat, LoggingConfig, ProviderSettings};
pub use error::{Error, Result, Stage};
pub use pipeline::{
    ConversationRequest, ConversationResult, Orchestrator, OrchestratorBuilder, SYSTEM_PROMPT,
    SynthesisOutcome,
};
pub use polling::{JobPoller, JobStatus, PollPolicy, Sleeper, TokioSleeper};
pub use providers::{
    AdapterFactory, Chatter, LlmAdapter, ProviderRegistry, SttAdapter, Synthesizer, Transcriber,
    TtsAdapter,
};
pub use storage::{AudioStore, StoredAudio};
