//! # voxgate telemetry
//!
//! Structured logging for the gateway: subscriber initialization driven by
//! the `[logging]` section and span helpers that tag every log line of a
//! request with its providers.

mod spans;
mod tracer;

pub use spans::{ConversationSpanAttributes, capability_span, conversation_span};
pub use tracer::{filter_directives, init_tracing};

/// Span field names shared by the gateway
pub mod attributes {
    pub const REQUEST_ID: &str = "voxgate.request_id";
    pub const CAPABILITY: &str = "voxgate.capability";
    pub const PROVIDER_ID: &str = "voxgate.provider_id";
    pub const STT_PROVIDER: &str = "voxgate.stt.provider";
    pub const LLM_PROVIDER: &str = "voxgate.llm.provider";
    pub const LLM_MODEL: &str = "voxgate.llm.model";
    pub const TTS_PROVIDER: &str = "voxgate.tts.provider";
}

