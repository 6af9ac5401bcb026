use super::{
    API_KEY_VAR, HAMSA, STATUS_COMPLETED, STATUS_FAILED, auth_header, fetch_job, job_record,
};
use crate::capabilities::{AudioResult, SynthesizeOptions, Voice};
use crate::config::ProviderSettings;
use crate::polling::{JobPoller, JobStatus, PollPolicy, Sleeper};
use crate::providers::Synthesizer;
use crate::providers::http::{first_str, require_key, str_at};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Request defaults for Hamsa speech
pub struct HamsaTtsDefaults;

impl HamsaTtsDefaults {
    pub const FORMAT: &'static str = "wav";
    pub const POLL: PollPolicy = PollPolicy::new(30, Duration::from_secs(2));
}

/// Hamsa text to speech
///
/// There is no built-in voice: the voice comes from the request or from the
/// configured `HAMSA_DEFAULT_VOICE_ID`.
pub struct HamsaSynthesizer {
    api_key: String,
    base_url: String,
    default_voice: Option<String>,
    client: Client,
    poller: JobPoller,
}

impl HamsaSynthesizer {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let api_key = require_key(settings.credentials.hamsa_api_key.as_ref(), API_KEY_VAR)?;

        let default_voice = settings
            .voices
            .hamsa_default_voice_id
            .clone()
            .filter(|v| !v.is_empty());
        if default_voice.is_none() {
            tracing::warn!(
                "HAMSA_DEFAULT_VOICE_ID is not set; Hamsa synthesis requires an explicit voice"
            );
        }

        Ok(Self {
            api_key,
            base_url: settings.endpoints.hamsa.clone(),
            default_voice,
            client: HAMSA.client(settings.http.timeout())?,
            poller: JobPoller::new(HamsaTtsDefaults::POLL),
        })
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.poller = self.poller.with_sleeper(sleeper);
        self
    }

    async fn submit(&self, voice_id: &str, text: &str) -> Result<Value> {
        let json = HAMSA
            .send_json(
                self.client
                    .post(format!("{}/jobs/text-to-speech", self.base_url))
                    .header("Authorization", auth_header(&self.api_key))
                    .json(&json!({ "voiceId": voice_id, "text": text })),
            )
            .await?;

        let data = &json["data"];
        if json["success"] != Value::Bool(true) && !data.is_object() {
            let message = first_str(&json, &["/message"]).unwrap_or("Failed to submit TTS job");
            return Err(Error::provider(HAMSA.name, message));
        }
        Ok(data.clone())
    }

    async fn check(&self, job_id: &str) -> Result<JobStatus<String>> {
        let json = fetch_job(&self.client, &self.base_url, &self.api_key, job_id).await?;
        let job = job_record(&json);

        Ok(match job["status"].as_str() {
            Some(STATUS_COMPLETED) => match first_str(job, &["/jobResponse/mediaUrl", "/mediaUrl"]) {
                Some(url) => JobStatus::Completed(url.to_string()),
                None => JobStatus::Failed("Job completed but no media URL found".to_string()),
            },
            Some(STATUS_FAILED) => JobStatus::Failed(
                first_str(job, &["/jobResponse/error"])
                    .unwrap_or("TTS job failed")
                    .to_string(),
            ),
            _ => JobStatus::Pending,
        })
    }

    /// Media URLs are public; no auth header.
    async fn download(&self, media_url: &str) -> Result<AudioResult> {
        let audio = HAMSA.send_bytes(self.client.get(media_url)).await?;
        Ok(AudioResult::new(audio, HamsaTtsDefaults::FORMAT))
    }
}

#[async_trait]
impl Synthesizer for HamsaSynthesizer {
    fn name(&self) -> &str {
        "Hamsa AI"
    }

    async fn synthesize(&self, text: &str, options: &SynthesizeOptions) -> Result<AudioResult> {
        let voice_id = options
            .voice
            .as_deref()
            .filter(|v| !v.is_empty())
            .or(self.default_voice.as_deref())
            .ok_or_else(|| {
                Error::provider(
                    HAMSA.name,
                    "Voice ID is required. Set HAMSA_DEFAULT_VOICE_ID or pass a voice id",
                )
            })?;

        let job = self.submit(voice_id, text).await?;

        // Short texts can complete synchronously
        if str_at(&job, "/status") == STATUS_COMPLETED
            && let Some(media_url) = first_str(&job, &["/mediaUrl", "/jobResponse/ttsMediaFile"])
        {
            tracing::debug!(%media_url, "Hamsa TTS completed on submit");
            return self.download(media_url).await;
        }

        let job_id = first_str(&job, &["/jobId", "/id"])
            .map(str::to_string)
            .ok_or_else(|| Error::provider(HAMSA.name, "No job ID returned from Hamsa"))?;

        let job_ref = job_id.as_str();
        let media_url = self
            .poller
            .run(HAMSA.name, job_ref, |_| self.check(job_ref))
            .await?;

        self.download(&media_url).await
    }

    async fn list_voices(&self) -> Result<Vec<Voice>> {
        let request = self
            .client
            .get(format!("{}/tts/voices", self.base_url))
            .header("Authorization", auth_header(&self.api_key));

        let json = match HAMSA.send_json(request).await {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to fetch Hamsa voices");
                return Ok(Vec::new());
            }
        };

        if json["success"] != Value::Bool(true) {
            return Ok(Vec::new());
        }

        let voices = json["data"]
            .as_array()
            .map(|voices| {
                voices
                    .iter()
                    .map(|voice| Voice {
                        id: str_at(voice, "/id").to_string(),
                        name: str_at(voice, "/name").to_string(),
                        language: first_str(voice, &["/language"]).map(str::to_string),
                        gender: None,
                        description: first_str(voice, &["/dialect/name"]).map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(voices)
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        &["wav"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, Endpoints, VoiceDefaults};
    use mockito::Matcher;

    fn settings(base: &str, default_voice: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            credentials: Credentials {
                hamsa_api_key: Some("hamsa-key".to_string()),
                ..Default::default()
            },
            voices: VoiceDefaults {
                hamsa_default_voice_id: default_voice.map(str::to_string),
                ..Default::default()
            },
            endpoints: Endpoints::all(base),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_voice_is_an_error() {
        let tts = HamsaSynthesizer::new(&settings("http://unused", None)).unwrap();
        let err = tts
            .synthesize("مرحبا", &SynthesizeOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Voice ID is required"));
    }

    #[tokio::test]
    async fn test_completed_on_submit_downloads_directly() {
        let mut server = mockito::Server::new_async().await;
        let media_url = format!("{}/media/out.wav", server.url());

        let submit = server
            .mock("POST", "/jobs/text-to-speech")
            .match_header("authorization", "Token hamsa-key")
            .match_body(Matcher::Json(json!({"voiceId": "voice-1", "text": "hi"})))
            .with_body(
                json!({"success": true, "data": {"status": "COMPLETED", "mediaUrl": media_url}})
                    .to_string(),
            )
            .create_async()
            .await;
        let poll = server
            .mock("GET", "/jobs")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let download = server
            .mock("GET", "/media/out.wav")
            .with_body(b"RIFFwav")
            .create_async()
            .await;

        let tts = HamsaSynthesizer::new(&settings(&server.url(), Some("voice-1"))).unwrap();
        let audio = tts
            .synthesize("hi", &SynthesizeOptions::default())
            .await
            .unwrap();

        submit.assert_async().await;
        poll.assert_async().await;
        download.assert_async().await;
        assert_eq!(audio.format, "wav");
        assert_eq!(audio.audio, b"RIFFwav".to_vec());
    }

    #[tokio::test]
    async fn test_polled_job() {
        let mut server = mockito::Server::new_async().await;
        let media_url = format!("{}/media/polled.wav", server.url());

        let _submit = server
            .mock("POST", "/jobs/text-to-speech")
            .with_body(r#"{"success":true,"data":{"jobId":"tts-1","status":"PENDING"}}"#)
            .create_async()
            .await;
        let _poll = server
            .mock("GET", "/jobs")
            .match_query(Matcher::UrlEncoded("jobId".into(), "tts-1".into()))
            .with_body(
                json!({"data": {"status": "COMPLETED", "jobResponse": {"mediaUrl": media_url}}})
                    .to_string(),
            )
            .create_async()
            .await;
        let _download = server
            .mock("GET", "/media/polled.wav")
            .with_body(b"RIFF")
            .create_async()
            .await;

        let tts = HamsaSynthesizer::new(&settings(&server.url(), None)).unwrap();
        let audio = tts
            .synthesize("hi", &SynthesizeOptions::with_voice("voice-2"))
            .await
            .unwrap();
        assert_eq!(audio.audio, b"RIFF".to_vec());
    }

    #[tokio::test]
    async fn test_completed_without_media_url_fails() {
        let mut server = mockito::Server::new_async().await;
        let _submit = server
            .mock("POST", "/jobs/text-to-speech")
            .with_body(r#"{"success":true,"data":{"jobId":"tts-2"}}"#)
            .create_async()
            .await;
        let _poll = server
            .mock("GET", "/jobs")
            .match_query(Matcher::UrlEncoded("jobId".into(), "tts-2".into()))
            .with_body(r#"{"data":{"status":"COMPLETED","jobResponse":{}}}"#)
            .create_async()
            .await;

        let tts = HamsaSynthesizer::new(&settings(&server.url(), Some("v"))).unwrap();
        let err = tts
            .synthesize("hi", &SynthesizeOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpstreamJobFailed { .. }));
    }

    #[tokio::test]
    async fn test_list_voices() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/tts/voices")
            .with_body(
                r#"{"success":true,"data":[
                    {"id":"v-1","name":"Layla","language":"ar","dialect":{"name":"Gulf"}}
                ]}"#,
            )
            .create_async()
            .await;

        let tts = HamsaSynthesizer::new(&settings(&server.url(), None)).unwrap();
        let voices = tts.list_voices().await.unwrap();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].name, "Layla");
        assert_eq!(voices[0].description.as_deref(), Some("Gulf"));
    }

    #[tokio::test]
    async fn test_list_voices_degrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/tts/voices")
            .with_status(500)
            .create_async()
            .await;

        let tts = HamsaSynthesizer::new(&settings(&server.url(), None)).unwrap();
        assert!(tts.list_voices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_voices_unreachable_is_empty() {
        // Nothing listens on port 1
        let tts = HamsaSynthesizer::new(&settings("http://127.0.0.1:1", None)).unwrap();
        assert_eq!(tts.list_voices().await.unwrap(), Vec::<Voice>::new());
    }
}
