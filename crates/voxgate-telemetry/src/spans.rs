//! Span helpers for gateway requests

use crate::attributes::*;
use tracing::Span;
use voxgate_core::CapabilityKind;

/// Attributes recorded on a conversation turn
#[derive(Debug, Clone)]
pub struct ConversationSpanAttributes {
    pub request_id: String,
    pub stt_provider: String,
    pub llm_provider: String,
    pub llm_model: String,
    pub tts_provider: String,
}

/// Span covering one full STT → LLM → TTS turn.
///
/// Stage logs emitted inside the turn carry these fields, which is what ties
/// the three vendor calls of one request together in the JSON output.
pub fn conversation_span(attrs: &ConversationSpanAttributes) -> Span {
    tracing::info_span!(
        "conversation",
        { REQUEST_ID } = %attrs.request_id,
        { STT_PROVIDER } = %attrs.stt_provider,
        { LLM_PROVIDER } = %attrs.llm_provider,
        { LLM_MODEL } = %attrs.llm_model,
        { TTS_PROVIDER } = %attrs.tts_provider,
    )
}

/// Span for a single-capability call
pub fn capability_span(request_id: &str, capability: CapabilityKind, provider_id: &str) -> Span {
    tracing::info_span!(
        "capability",
        { REQUEST_ID } = %request_id,
        { CAPABILITY } = %capability,
        { PROVIDER_ID } = %provider_id,
    )
}
