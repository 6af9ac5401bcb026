use super::data::{SPEECH_FORMATS, SPEECH_VOICES};
use super::{API_KEY_VAR, DEEPGRAM, auth_header};
use crate::Result;
use crate::capabilities::{AudioResult, SynthesizeOptions, Voice, voices_from};
use crate::config::ProviderSettings;
use crate::providers::Synthesizer;
use crate::providers::http::lazy_key;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Request defaults for Aura speech
pub struct AuraDefaults;

impl AuraDefaults {
    pub const VOICE: &'static str = "aura-2-thalia";
    pub const ENCODING: &'static str = "mp3";
}

/// Deepgram Aura text to speech
pub struct DeepgramSynthesizer {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl DeepgramSynthesizer {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        Ok(Self {
            api_key: settings.credentials.deepgram_api_key.clone(),
            base_url: settings.endpoints.deepgram.clone(),
            client: DEEPGRAM.client(settings.http.timeout())?,
        })
    }
}

#[async_trait]
impl Synthesizer for DeepgramSynthesizer {
    fn name(&self) -> &str {
        "Deepgram Aura"
    }

    async fn synthesize(&self, text: &str, options: &SynthesizeOptions) -> Result<AudioResult> {
        let api_key = lazy_key(self.api_key.as_deref(), API_KEY_VAR)?;

        let url = format!("{}/v1/speak", self.base_url);
        // Aura selects the voice through the model parameter
        let voice = options.voice.as_deref().unwrap_or(AuraDefaults::VOICE);

        let audio = DEEPGRAM
            .send_bytes(
                self.client
                    .post(&url)
                    .header("Authorization", auth_header(api_key))
                    .query(&[("model", voice), ("encoding", AuraDefaults::ENCODING)])
                    .json(&json!({ "text": text })),
            )
            .await?;

        Ok(AudioResult::new(audio, AuraDefaults::ENCODING))
    }

    async fn list_voices(&self) -> Result<Vec<Voice>> {
        Ok(voices_from(SPEECH_VOICES))
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        SPEECH_FORMATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, Endpoints};
    use mockito::Matcher;

    fn settings(base: &str, key: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            credentials: Credentials {
                deepgram_api_key: key.map(str::to_string),
                ..Default::default()
            },
            endpoints: Endpoints::all(base),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_voices_listable_without_key() {
        let tts = DeepgramSynthesizer::new(&settings("http://unused", None)).unwrap();
        let voices = tts.list_voices().await.unwrap();
        assert_eq!(voices.len(), 12);
        assert_eq!(voices[0].id, AuraDefaults::VOICE);
        assert_eq!(tts.supported_formats(), &["mp3", "pcm", "mulaw"]);

        assert!(tts.synthesize("hi", &SynthesizeOptions::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_synthesize_uses_voice_as_model() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/speak")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("model".into(), "aura-2-luna".into()),
                Matcher::UrlEncoded("encoding".into(), "mp3".into()),
            ]))
            .match_body(Matcher::Json(json!({ "text": "Good morning" })))
            .with_status(200)
            .with_body(b"ID3audio")
            .create_async()
            .await;

        let tts = DeepgramSynthesizer::new(&settings(&server.url(), Some("k"))).unwrap();
        let audio = tts
            .synthesize("Good morning", &SynthesizeOptions::with_voice("aura-2-luna"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(audio.audio, b"ID3audio".to_vec());
        assert_eq!(audio.format, "mp3");
    }

    #[tokio::test]
    async fn test_error_body_err_msg() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/speak")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"err_code":"INVALID_MODEL","err_msg":"No such model"}"#)
            .create_async()
            .await;

        let tts = DeepgramSynthesizer::new(&settings(&server.url(), Some("k"))).unwrap();
        let err = tts
            .synthesize("hi", &SynthesizeOptions::with_voice("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Deepgram request failed: No such model");
    }
}
