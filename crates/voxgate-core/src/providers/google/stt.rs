use super::data::{TRANSCRIPTION_FORMATS, TRANSCRIPTION_LANGUAGES};
use super::{API_KEY_VAR, GOOGLE};
use crate::Result;
use crate::capabilities::{TranscribeOptions, TranscriptionResult};
use crate::config::ProviderSettings;
use crate::language::LanguageMap;
use crate::providers::Transcriber;
use crate::providers::http::{lazy_key, str_at};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde_json::{Value, json};

/// Request defaults for Google recognition
pub struct GoogleSttDefaults;

impl GoogleSttDefaults {
    pub const LANGUAGE: &'static str = "ar-SA";
    pub const MODEL: &'static str = "chirp";
    pub const ENCODING: &'static str = "WEBM_OPUS";
    pub const SAMPLE_RATE_HERTZ: u32 = 48000;
}

const LANGUAGES: LanguageMap = LanguageMap::passthrough(GoogleSttDefaults::LANGUAGE);

/// Google Cloud synchronous recognition
pub struct GoogleCloudTranscriber {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GoogleCloudTranscriber {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        Ok(Self {
            api_key: settings.credentials.google_cloud_api_key.clone(),
            base_url: settings.endpoints.google_speech.clone(),
            client: GOOGLE.client(settings.http.timeout())?,
        })
    }
}

/// First alternatives joined by newlines, and their mean confidence.
fn collect_results(json: &Value) -> (String, f32) {
    let results = json["results"].as_array().map(Vec::as_slice).unwrap_or(&[]);
    if results.is_empty() {
        return (String::new(), 0.0);
    }

    let text = results
        .iter()
        .map(|r| str_at(r, "/alternatives/0/transcript"))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let total: f64 = results
        .iter()
        .map(|r| r["alternatives"][0]["confidence"].as_f64().unwrap_or(0.0))
        .sum();

    (text, (total / results.len() as f64) as f32)
}

#[async_trait]
impl Transcriber for GoogleCloudTranscriber {
    fn name(&self) -> &str {
        "Google Cloud Speech-to-Text"
    }

    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult> {
        let api_key = lazy_key(self.api_key.as_deref(), API_KEY_VAR)?;

        let language = LANGUAGES.normalize(&options.language_selection());
        let body = json!({
            "config": {
                "encoding": GoogleSttDefaults::ENCODING,
                "sampleRateHertz": GoogleSttDefaults::SAMPLE_RATE_HERTZ,
                "languageCode": language,
                "audioChannelCount": 1,
                "enableAutomaticPunctuation": true,
                "model": options.model.as_deref().unwrap_or(GoogleSttDefaults::MODEL),
            },
            "audio": { "content": STANDARD.encode(audio) },
        });

        let json = GOOGLE
            .send_json(
                self.client
                    .post(format!("{}/v1/speech:recognize", self.base_url))
                    .query(&[("key", api_key)])
                    .json(&body),
            )
            .await?;

        let (text, confidence) = collect_results(&json);

        Ok(TranscriptionResult {
            text,
            confidence: Some(confidence),
            language: Some(language),
            duration: None,
        })
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        TRANSCRIPTION_FORMATS
    }

    fn supported_languages(&self) -> &'static [&'static str] {
        TRANSCRIPTION_LANGUAGES
    }
}
