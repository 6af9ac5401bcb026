use serde::{Deserialize, Serialize};
use voxgate_core::{ChatMessage, ModelInfo, ProviderDescriptor, Voice};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Public view of a catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummary {
    pub id: String,
    pub name: String,
    pub requires_auth: bool,
}

impl From<ProviderDescriptor> for ProviderSummary {
    fn from(descriptor: ProviderDescriptor) -> Self {
        Self {
            id: descriptor.id,
            name: descriptor.name,
            requires_auth: descriptor.requires_auth,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<Voice>,
}

/// Body of `POST /api/tts/synthesize`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    pub provider: Option<String>,
    pub text: Option<String>,
    pub voice: Option<String>,
}

/// Body of `POST /api/llm/chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub messages: Option<Vec<ChatMessage>>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}
