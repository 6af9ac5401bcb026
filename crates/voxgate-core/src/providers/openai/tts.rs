use super::data::{SPEECH_FORMATS, SPEECH_VOICES};
use super::{API_KEY_VAR, OPENAI};
use crate::Result;
use crate::capabilities::{AudioResult, SynthesizeOptions, Voice, voices_from};
use crate::config::ProviderSettings;
use crate::providers::Synthesizer;
use crate::providers::http::require_key;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Request defaults for OpenAI speech
pub struct OpenAiSpeechDefaults;

impl OpenAiSpeechDefaults {
    pub const MODEL: &'static str = "tts-1";
    pub const VOICE: &'static str = "alloy";
    pub const SPEED: f32 = 1.0;
    pub const FORMAT: &'static str = "mp3";
}

/// OpenAI text to speech
pub struct OpenAiSynthesizer {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAiSynthesizer {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let api_key = require_key(settings.credentials.openai_api_key.as_ref(), API_KEY_VAR)?;
        Ok(Self {
            api_key,
            base_url: settings.endpoints.openai.clone(),
            client: OPENAI.client(settings.http.timeout())?,
        })
    }
}

#[async_trait]
impl Synthesizer for OpenAiSynthesizer {
    fn name(&self) -> &str {
        "OpenAI TTS"
    }

    async fn synthesize(&self, text: &str, options: &SynthesizeOptions) -> Result<AudioResult> {
        let url = format!("{}/audio/speech", self.base_url);
        let body = json!({
            "model": options.model.as_deref().unwrap_or(OpenAiSpeechDefaults::MODEL),
            "voice": options.voice.as_deref().unwrap_or(OpenAiSpeechDefaults::VOICE),
            "input": text,
            "speed": options.speed.unwrap_or(OpenAiSpeechDefaults::SPEED),
        });

        let audio = OPENAI
            .send_bytes(
                self.client
                    .post(&url)
                    .bearer_auth(&self.api_key)
                    .json(&body),
            )
            .await?;

        Ok(AudioResult::new(audio, OpenAiSpeechDefaults::FORMAT))
    }

    async fn list_voices(&self) -> Result<Vec<Voice>> {
        Ok(voices_from(SPEECH_VOICES))
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        SPEECH_FORMATS
    }
}
