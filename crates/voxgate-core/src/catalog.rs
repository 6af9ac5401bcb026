//! Static provider catalog
//!
//! Declares, per capability, which provider ids exist, whether they are
//! enabled, which adapter backs them and (for chat) which models can be
//! selected. The catalog is built once at startup and only read afterwards.

use crate::providers::factory::{LlmAdapter, SttAdapter, TtsAdapter};
use crate::providers::openrouter::data::OPENROUTER_MODELS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    /// Audio to text transcription
    Stt,
    /// Chat completion
    Llm,
    /// Text to speech
    Tts,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityKind::Stt => "STT",
            CapabilityKind::Llm => "LLM",
            CapabilityKind::Tts => "TTS",
        };
        f.write_str(name)
    }
}

/// Model information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier sent to the vendor
    pub id: String,
    /// Display name
    pub name: String,
    /// Upstream model publisher
    pub provider: String,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    /// Stable routing key used by callers
    pub id: String,
    /// Display name
    pub name: String,
    /// Adapter identifier, e.g. "DeepgramSTT"
    #[serde(alias = "class")]
    pub adapter: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true", alias = "requires_auth")]
    pub requires_auth: bool,
    /// Selectable models (chat providers only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelInfo>,
}

impl ProviderDescriptor {
    pub fn new(id: &str, name: &str, adapter: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            adapter: adapter.to_string(),
            enabled: true,
            requires_auth: true,
            models: Vec::new(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_models(mut self, models: Vec<ModelInfo>) -> Self {
        self.models = models;
        self
    }
}

fn default_true() -> bool {
    true
}

/// The three ordered provider lists
///
/// A capability left out of a config override keeps its builtin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersCatalog {
    #[serde(default = "builtin_stt")]
    pub stt: Vec<ProviderDescriptor>,
    #[serde(default = "builtin_tts")]
    pub tts: Vec<ProviderDescriptor>,
    #[serde(default = "builtin_llm")]
    pub llm: Vec<ProviderDescriptor>,
}

fn builtin_stt() -> Vec<ProviderDescriptor> {
    ProvidersCatalog::builtin().stt
}

fn builtin_tts() -> Vec<ProviderDescriptor> {
    ProvidersCatalog::builtin().tts
}

fn builtin_llm() -> Vec<ProviderDescriptor> {
    ProvidersCatalog::builtin().llm
}

impl Default for ProvidersCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProvidersCatalog {
    /// The catalog shipped with the gateway
    pub fn builtin() -> Self {
        let openrouter_models = OPENROUTER_MODELS
            .iter()
            .map(|(id, name, provider)| ModelInfo {
                id: id.to_string(),
                name: name.to_string(),
                provider: provider.to_string(),
            })
            .collect();

        Self {
            stt: vec![
                ProviderDescriptor::new("openai-whisper", "OpenAI Whisper", "OpenAISTT"),
                ProviderDescriptor::new("hamsa-stt", "Hamsa AI STT", "HamsaSTT"),
                ProviderDescriptor::new("deepgram-stt", "Deepgram Nova-3", "DeepgramSTT"),
                ProviderDescriptor::new(
                    "google-cloud-stt",
                    "Google Cloud Speech-to-Text",
                    "GoogleCloudSTT",
                )
                .disabled(),
            ],
            tts: vec![
                ProviderDescriptor::new("openai-tts", "OpenAI TTS", "OpenAITTS"),
                ProviderDescriptor::new("hamsa-tts", "Hamsa AI TTS", "HamsaTTS"),
                ProviderDescriptor::new("deepgram-tts", "Deepgram Aura", "DeepgramTTS"),
                ProviderDescriptor::new("elevenlabs-tts", "ElevenLabs", "ElevenLabsTTS"),
            ],
            llm: vec![
                ProviderDescriptor::new("openrouter", "OpenRouter", "OpenRouterLLM")
                    .with_models(openrouter_models),
            ],
        }
    }

    pub fn list(&self, capability: CapabilityKind) -> &[ProviderDescriptor] {
        match capability {
            CapabilityKind::Stt => &self.stt,
            CapabilityKind::Llm => &self.llm,
            CapabilityKind::Tts => &self.tts,
        }
    }

    /// Enabled entries, in declaration order
    pub fn enabled(&self, capability: CapabilityKind) -> impl Iterator<Item = &ProviderDescriptor> {
        self.list(capability).iter().filter(|p| p.enabled)
    }

    /// Look up an enabled entry by id
    ///
    /// # Errors
    /// `ProviderNotFoundOrDisabled` when the id is missing or the entry is disabled
    pub fn find_enabled(&self, capability: CapabilityKind, id: &str) -> Result<&ProviderDescriptor> {
        self.list(capability)
            .iter()
            .find(|p| p.id == id)
            .filter(|p| p.enabled)
            .ok_or_else(|| Error::not_found(capability, id))
    }

    /// Check that every capability has entries and that every entry names an
    /// adapter registered for its capability.
    pub fn validate(&self) -> Result<()> {
        for capability in [CapabilityKind::Stt, CapabilityKind::Llm, CapabilityKind::Tts] {
            if self.list(capability).is_empty() {
                return Err(Error::config_error(format!(
                    "Provider catalog declares no {} providers",
                    capability
                )));
            }
        }

        for p in &self.stt {
            p.adapter.parse::<SttAdapter>()?;
        }
        for p in &self.llm {
            p.adapter.parse::<LlmAdapter>()?;
        }
        for p in &self.tts {
            p.adapter.parse::<TtsAdapter>()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = ProvidersCatalog::builtin();
        catalog.validate().unwrap();

        assert_eq!(catalog.stt.len(), 4);
        assert_eq!(catalog.tts.len(), 4);
        assert_eq!(catalog.llm.len(), 1);
        assert!(!catalog.llm[0].models.is_empty());
    }

    #[test]
    fn test_find_enabled() {
        let catalog = ProvidersCatalog::builtin();

        let deepgram = catalog
            .find_enabled(CapabilityKind::Stt, "deepgram-stt")
            .unwrap();
        assert_eq!(deepgram.adapter, "DeepgramSTT");

        // Declared but disabled
        let err = catalog
            .find_enabled(CapabilityKind::Stt, "google-cloud-stt")
            .unwrap_err();
        assert!(matches!(err, Error::ProviderNotFoundOrDisabled { .. }));

        // Wrong capability list
        assert!(catalog.find_enabled(CapabilityKind::Tts, "deepgram-stt").is_err());
    }

    #[test]
    fn test_enabled_preserves_order() {
        let catalog = ProvidersCatalog::builtin();
        let ids: Vec<&str> = catalog
            .enabled(CapabilityKind::Stt)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["openai-whisper", "hamsa-stt", "deepgram-stt"]);
    }

    #[test]
    fn test_validate_rejects_unknown_adapter() {
        let mut catalog = ProvidersCatalog::builtin();
        catalog
            .tts
            .push(ProviderDescriptor::new("acme", "Acme", "AcmeTTS"));

        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, Error::UnknownProvider(ref name) if name == "AcmeTTS"));
    }

    #[test]
    fn test_descriptor_accepts_class_alias() {
        let toml_src = r#"
            [[stt]]
            id = "dg"
            name = "Deepgram"
            class = "DeepgramSTT"
            requiresAuth = false
        "#;
        let catalog: ProvidersCatalog = toml::from_str(toml_src).unwrap();
        assert_eq!(catalog.stt[0].adapter, "DeepgramSTT");
        assert!(catalog.stt[0].enabled);
        assert!(!catalog.stt[0].requires_auth);
    }

    #[test]
    fn test_omitted_capabilities_keep_builtin_lists() {
        let toml_src = r#"
            [[stt]]
            id = "dg"
            name = "Deepgram"
            adapter = "DeepgramSTT"
        "#;
        let catalog: ProvidersCatalog = toml::from_str(toml_src).unwrap();
        let builtin = ProvidersCatalog::builtin();

        assert_eq!(catalog.stt.len(), 1);
        assert_eq!(catalog.llm, builtin.llm);
        assert_eq!(catalog.tts, builtin.tts);
        catalog.validate().unwrap();
        assert!(catalog.find_enabled(CapabilityKind::Llm, "openrouter").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_capability() {
        let catalog: ProvidersCatalog = toml::from_str("tts = []").unwrap();

        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, Error::Configuration(ref m) if m.contains("no TTS providers")));
    }
}
