use super::data::FALLBACK_VOICES;
use super::{API_KEY_VAR, ELEVENLABS};
use crate::Result;
use crate::capabilities::{AudioResult, SynthesizeOptions, Voice, voices_from};
use crate::config::ProviderSettings;
use crate::providers::Synthesizer;
use crate::providers::http::{first_str, require_key, str_at};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

/// Request defaults for ElevenLabs speech
pub struct ElevenLabsDefaults;

impl ElevenLabsDefaults {
    /// "Rachel"
    pub const VOICE: &'static str = "21m00Tcm4TlvDq8ikWAM";
    pub const MODEL: &'static str = "eleven_multilingual_v2";
    pub const STABILITY: f32 = 0.5;
    pub const SIMILARITY_BOOST: f32 = 0.75;
    pub const FORMAT: &'static str = "mp3";
}

/// ElevenLabs text to speech
pub struct ElevenLabsSynthesizer {
    api_key: String,
    base_url: String,
    default_voice: String,
    default_model: String,
    client: Client,
}

impl ElevenLabsSynthesizer {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let api_key = require_key(
            settings.credentials.elevenlabs_api_key.as_ref(),
            API_KEY_VAR,
        )?;
        let voices = &settings.voices;
        Ok(Self {
            api_key,
            base_url: settings.endpoints.elevenlabs.clone(),
            default_voice: voices
                .elevenlabs_default_voice_id
                .clone()
                .unwrap_or_else(|| ElevenLabsDefaults::VOICE.to_string()),
            default_model: voices
                .elevenlabs_default_model
                .clone()
                .unwrap_or_else(|| ElevenLabsDefaults::MODEL.to_string()),
            client: ELEVENLABS.client(settings.http.timeout())?,
        })
    }

    async fn fetch_voices(&self) -> Result<Vec<Voice>> {
        let json = ELEVENLABS
            .send_json(
                self.client
                    .get(format!("{}/voices", self.base_url))
                    .header("xi-api-key", &self.api_key),
            )
            .await?;

        Ok(json["voices"]
            .as_array()
            .map(|voices| voices.iter().map(voice_from_listing).collect())
            .unwrap_or_default())
    }
}

/// Language is best effort: `labels.language`, then `labels.accent`.
fn voice_from_listing(voice: &Value) -> Voice {
    let labels = &voice["labels"];
    Voice {
        id: str_at(voice, "/voice_id").to_string(),
        name: str_at(voice, "/name").to_string(),
        language: first_str(labels, &["/language", "/accent"]).map(str::to_string),
        gender: first_str(labels, &["/gender"]).map(str::to_string),
        description: first_str(voice, &["/description"]).map(str::to_string),
    }
}

#[async_trait]
impl Synthesizer for ElevenLabsSynthesizer {
    fn name(&self) -> &str {
        "ElevenLabs"
    }

    async fn synthesize(&self, text: &str, options: &SynthesizeOptions) -> Result<AudioResult> {
        let voice = options
            .voice
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.default_voice);
        let model = options.model.as_deref().unwrap_or(&self.default_model);

        // The generic speed knob drives stability here
        let body = json!({
            "text": text,
            "model_id": model,
            "voice_settings": {
                "stability": options.speed.unwrap_or(ElevenLabsDefaults::STABILITY),
                "similarity_boost": ElevenLabsDefaults::SIMILARITY_BOOST,
            },
        });

        let audio = ELEVENLABS
            .send_bytes(
                self.client
                    .post(format!("{}/text-to-speech/{}", self.base_url, voice))
                    .header("xi-api-key", &self.api_key)
                    .json(&body),
            )
            .await?;

        Ok(AudioResult::new(audio, ElevenLabsDefaults::FORMAT))
    }

    async fn list_voices(&self) -> Result<Vec<Voice>> {
        match self.fetch_voices().await {
            Ok(voices) => Ok(voices),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch ElevenLabs voices, using fallback list");
                Ok(voices_from(FALLBACK_VOICES))
            }
        }
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        &["mp3"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::config::{Credentials, Endpoints};
    use mockito::Matcher;

    fn settings(base: &str) -> ProviderSettings {
        ProviderSettings {
            credentials: Credentials {
                elevenlabs_api_key: Some("xi-key".to_string()),
                ..Default::default()
            },
            endpoints: Endpoints::all(base),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_key_fails_at_construction() {
        let err = ElevenLabsSynthesizer::new(&ProviderSettings::default())
            .err()
            .unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_synthesize_defaults() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/text-to-speech/21m00Tcm4TlvDq8ikWAM")
            .match_header("xi-api-key", "xi-key")
            .match_body(Matcher::Json(json!({
                "text": "Hello",
                "model_id": "eleven_multilingual_v2",
                "voice_settings": {"stability": 0.5, "similarity_boost": 0.75}
            })))
            .with_body(b"mp3-bytes")
            .create_async()
            .await;

        let tts = ElevenLabsSynthesizer::new(&settings(&server.url())).unwrap();
        let audio = tts
            .synthesize("Hello", &SynthesizeOptions::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(audio.format, "mp3");
    }

    #[tokio::test]
    async fn test_defaults_are_stable_across_calls() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/text-to-speech/21m00Tcm4TlvDq8ikWAM")
            .match_body(Matcher::Json(json!({
                "text": "Again",
                "model_id": "eleven_multilingual_v2",
                "voice_settings": {"stability": 0.5, "similarity_boost": 0.75}
            })))
            .with_body(b"mp3-bytes")
            .expect(2)
            .create_async()
            .await;

        let tts = ElevenLabsSynthesizer::new(&settings(&server.url())).unwrap();
        let options = SynthesizeOptions::default();
        let first = tts.synthesize("Again", &options).await.unwrap();
        let second = tts.synthesize("Again", &options).await.unwrap();

        mock.assert_async().await;
        assert_eq!(first, second);
        assert_eq!(options, SynthesizeOptions::default());
    }

    #[tokio::test]
    async fn test_vendor_error_detail() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/text-to-speech/bad-voice")
            .with_status(404)
            .with_body(r#"{"detail":{"status":"voice_not_found","message":"Voice not found"}}"#)
            .create_async()
            .await;

        let tts = ElevenLabsSynthesizer::new(&settings(&server.url())).unwrap();
        let err = tts
            .synthesize("Hello", &SynthesizeOptions::with_voice("bad-voice"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "ElevenLabs request failed: Voice not found");
    }

    #[tokio::test]
    async fn test_list_voices() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/voices")
            .with_body(
                r#"{"voices":[
                    {"voice_id":"a","name":"Amira","labels":{"accent":"arabic","gender":"female"}},
                    {"voice_id":"b","name":"Ben","labels":{}}
                ]}"#,
            )
            .create_async()
            .await;

        let tts = ElevenLabsSynthesizer::new(&settings(&server.url())).unwrap();
        let voices = tts.list_voices().await.unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].language.as_deref(), Some("arabic"));
        assert_eq!(voices[0].gender.as_deref(), Some("female"));
        assert_eq!(voices[1].language, None);
    }

    #[tokio::test]
    async fn test_list_voices_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/voices")
            .with_status(401)
            .with_body(r#"{"detail":{"message":"missing_permissions"}}"#)
            .create_async()
            .await;

        let tts = ElevenLabsSynthesizer::new(&settings(&server.url())).unwrap();
        let voices = tts.list_voices().await.unwrap();
        assert_eq!(voices.len(), 10);
        assert_eq!(voices[0].name, "Rachel");
    }

    #[tokio::test]
    async fn test_list_voices_falls_back_when_unreachable() {
        // Nothing listens on port 1
        let tts = ElevenLabsSynthesizer::new(&settings("http://127.0.0.1:1")).unwrap();
        let voices = tts.list_voices().await.unwrap();
        assert_eq!(voices, voices_from(FALLBACK_VOICES));
        assert_eq!(voices.len(), 10);
    }
}
