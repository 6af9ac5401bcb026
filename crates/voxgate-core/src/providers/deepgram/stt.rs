use super::data::{LANGUAGES, TRANSCRIPTION_FORMATS, TRANSCRIPTION_LANGUAGES};
use super::{API_KEY_VAR, DEEPGRAM, auth_header};
use crate::Result;
use crate::capabilities::{DEFAULT_PIPELINE_LANGUAGE, TranscribeOptions, TranscriptionResult};
use crate::config::ProviderSettings;
use crate::providers::Transcriber;
use crate::providers::http::{lazy_key, str_at};
use async_trait::async_trait;
use reqwest::Client;

/// Request defaults for Nova transcription
pub struct NovaDefaults;

impl NovaDefaults {
    pub const MODEL: &'static str = "nova-3";
}

/// Deepgram pre-recorded transcription
pub struct DeepgramTranscriber {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl DeepgramTranscriber {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        Ok(Self {
            api_key: settings.credentials.deepgram_api_key.clone(),
            base_url: settings.endpoints.deepgram.clone(),
            client: DEEPGRAM.client(settings.http.timeout())?,
        })
    }
}

#[async_trait]
impl Transcriber for DeepgramTranscriber {
    fn name(&self) -> &str {
        "Deepgram"
    }

    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult> {
        let api_key = lazy_key(self.api_key.as_deref(), API_KEY_VAR)?;

        let url = format!("{}/v1/listen", self.base_url);
        let language = LANGUAGES.normalize(&options.language_selection());
        let model = options.model.as_deref().unwrap_or(NovaDefaults::MODEL);

        tracing::debug!(model, %language, bytes = audio.len(), "Deepgram listen request");

        // No encoding or content type: Deepgram sniffs the container itself.
        let json = DEEPGRAM
            .send_json(
                self.client
                    .post(&url)
                    .header("Authorization", auth_header(api_key))
                    .query(&[
                        ("model", model),
                        ("language", language.as_str()),
                        ("smart_vocab", "true"),
                        ("punctuate", "true"),
                        ("paragraphs", "true"),
                        ("diarize", "false"),
                    ])
                    .body(audio.to_vec()),
            )
            .await?;

        let alternative = &json["results"]["channels"][0]["alternatives"][0];
        let detected = str_at(alternative, "/languages/0");
        let language = if detected.is_empty() {
            options
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_PIPELINE_LANGUAGE.to_string())
        } else {
            detected.to_string()
        };

        Ok(TranscriptionResult {
            text: str_at(alternative, "/transcript").to_string(),
            confidence: Some(alternative["confidence"].as_f64().unwrap_or(0.0) as f32),
            language: Some(language),
            duration: json["metadata"]["duration"].as_f64().map(|d| d as f32),
        })
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        TRANSCRIPTION_FORMATS
    }

    fn supported_languages(&self) -> &'static [&'static str] {
        TRANSCRIPTION_LANGUAGES
    }
}
