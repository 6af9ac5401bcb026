//! Vendor adapters for speech-to-text, chat and text-to-speech
//!
//! Each vendor lives in its own module with a `Vendor` descriptor, a
//! `data.rs` of static tables where it has any, and one file per capability.
//! Adapters are built through [`ProviderRegistry`] from the adapter
//! identifiers declared in the catalog.
//!
//! # Available adapters
//!
//! | Identifier | Capability | Vendor |
//! |---|---|---|
//! | `OpenAISTT` | STT | OpenAI Whisper |
//! | `HamsaSTT` | STT | Hamsa (job based) |
//! | `DeepgramSTT` | STT | Deepgram Nova-3 |
//! | `GoogleCloudSTT` | STT | Google Cloud Speech |
//! | `OpenRouterLLM` | LLM | OpenRouter |
//! | `OpenAITTS` | TTS | OpenAI |
//! | `HamsaTTS` | TTS | Hamsa (job based) |
//! | `DeepgramTTS` | TTS | Deepgram Aura |
//! | `ElevenLabsTTS` | TTS | ElevenLabs |
//!
//! # Example
//!
//! ```ignore
//! use voxgate_core::{AdapterFactory, GatewayConfig, ProviderRegistry};
//!
//! let config = GatewayConfig::load()?;
//! let registry = ProviderRegistry::new(config.provider_settings());
//!
//! let stt = registry.resolve_transcriber("DeepgramSTT")?;
//! let result = stt.transcribe(&audio, &Default::default()).await?;
//! ```

pub mod factory;
pub mod http;
pub mod provider;

pub mod deepgram;
pub mod elevenlabs;
pub mod google;
pub mod hamsa;
pub mod openai;
pub mod openrouter;


pub use factory::{AdapterFactory, LlmAdapter, ProviderRegistry, SttAdapter, TtsAdapter};
pub use provider::{Chatter, Synthesizer, Transcriber};

pub use deepgram::{DeepgramSynthesizer, DeepgramTranscriber};
pub use elevenlabs::ElevenLabsSynthesizer;
pub use google::GoogleCloudTranscriber;
pub use hamsa::{HamsaSynthesizer, HamsaTranscriber};
pub use openai::{OpenAiSynthesizer, OpenAiTranscriber};
pub use openrouter::OpenRouterChatter;
