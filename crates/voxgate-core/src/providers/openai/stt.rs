use super::data::{TRANSCRIPTION_FORMATS, TRANSCRIPTION_LANGUAGES};
use super::{API_KEY_VAR, OPENAI};
use crate::capabilities::{LanguageSelection, TranscribeOptions, TranscriptionResult};
use crate::config::ProviderSettings;
use crate::providers::Transcriber;
use crate::providers::http::{require_key, str_at};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

/// Request defaults for Whisper transcription
pub struct WhisperDefaults;

impl WhisperDefaults {
    pub const MODEL: &'static str = "whisper-1";
    pub const FILE_NAME: &'static str = "audio.webm";
    pub const MIME: &'static str = "audio/webm";
}

/// OpenAI Whisper transcription
pub struct OpenAiTranscriber {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpenAiTranscriber {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let api_key = require_key(settings.credentials.openai_api_key.as_ref(), API_KEY_VAR)?;
        Ok(Self {
            api_key,
            base_url: settings.endpoints.openai.clone(),
            client: OPENAI.client(settings.http.timeout())?,
        })
    }
}

/// Whisper detects the language itself when the field is omitted.
fn language_param(selection: &LanguageSelection) -> Option<&str> {
    match selection {
        LanguageSelection::AutoDetect => None,
        LanguageSelection::Code(code) => Some(code.as_str()),
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    fn name(&self) -> &str {
        "OpenAI Whisper"
    }

    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let model = options.model.as_deref().unwrap_or(WhisperDefaults::MODEL);
        let selection = options.language_selection();

        let file_part = Part::bytes(audio.to_vec())
            .file_name(WhisperDefaults::FILE_NAME)
            .mime_str(WhisperDefaults::MIME)
            .map_err(|e| Error::provider(OPENAI.name, format!("Invalid mime type: {}", e)))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("model", model.to_string());

        if let Some(language) = language_param(&selection) {
            form = form.text("language", language.to_string());
        }

        tracing::debug!(model, language = ?language_param(&selection), "Whisper request");

        let json = OPENAI
            .send_json(
                self.client
                    .post(&url)
                    .bearer_auth(&self.api_key)
                    .multipart(form),
            )
            .await?;

        let detected = str_at(&json, "/language");
        let language = if detected.is_empty() {
            language_param(&selection).map(str::to_string)
        } else {
            Some(detected.to_string())
        };

        Ok(TranscriptionResult {
            text: str_at(&json, "/text").to_string(),
            confidence: None,
            language,
            duration: json["duration"].as_f64().map(|d| d as f32),
        })
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        TRANSCRIPTION_FORMATS
    }

    fn supported_languages(&self) -> &'static [&'static str] {
        TRANSCRIPTION_LANGUAGES
    }
}
