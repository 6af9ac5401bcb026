use super::{
    API_KEY_VAR, HAMSA, STATUS_COMPLETED, STATUS_FAILED, auth_header, fetch_job, job_record,
};
use crate::capabilities::{TranscribeOptions, TranscriptionResult};
use crate::config::ProviderSettings;
use crate::language::LanguageMap;
use crate::polling::{JobPoller, JobStatus, PollPolicy, Sleeper};
use crate::providers::Transcriber;
use crate::providers::http::{first_str, require_key};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Request defaults for Hamsa transcription
pub struct HamsaSttDefaults;

impl HamsaSttDefaults {
    pub const MODEL: &'static str = "Hamsa-General-V2.0";
    /// Hamsa has no auto-detect; Arabic is the fallback
    pub const LANGUAGE: &'static str = "ar";
    pub const POLL: PollPolicy = PollPolicy::new(60, Duration::from_secs(3));
    /// Lifetime requested from the temporary file host
    pub const UPLOAD_TTL: &'static str = "24h";
}

const LANGUAGES: LanguageMap = LanguageMap::passthrough(HamsaSttDefaults::LANGUAGE);

const FORMATS: &[&str] = &["audio/webm", "audio/wav", "audio/mp3", "audio/mpeg", "audio/ogg"];

/// Hamsa transcription
///
/// Hamsa only accepts a media URL, so the audio is first pushed to a
/// temporary public file host.
pub struct HamsaTranscriber {
    api_key: String,
    base_url: String,
    upload_url: String,
    client: Client,
    poller: JobPoller,
}

impl HamsaTranscriber {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let api_key = require_key(settings.credentials.hamsa_api_key.as_ref(), API_KEY_VAR)?;
        Ok(Self {
            api_key,
            base_url: settings.endpoints.hamsa.clone(),
            upload_url: settings.endpoints.media_upload_url.clone(),
            client: HAMSA.client(settings.http.timeout())?,
            poller: JobPoller::new(HamsaSttDefaults::POLL),
        })
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.poller = self.poller.with_sleeper(sleeper);
        self
    }

    /// Upload the audio and return its public URL
    async fn upload(&self, audio: &[u8]) -> Result<String> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        let file_part = Part::bytes(audio.to_vec())
            .file_name(format!("audio-{}.webm", millis))
            .mime_str("audio/webm")
            .map_err(|e| Error::provider(HAMSA.name, format!("Invalid mime type: {}", e)))?;

        let form = Form::new()
            .text("reqtype", "fileupload")
            .text("time", HamsaSttDefaults::UPLOAD_TTL)
            .part("fileToUpload", file_part);

        let response = HAMSA
            .send(self.client.post(&self.upload_url).multipart(form))
            .await?;
        let body = response
            .text()
            .await
            .map_err(|e| Error::provider(HAMSA.name, format!("Media upload failed: {}", e)))?;

        parse_media_url(&body)
    }

    async fn submit(&self, media_url: &str, model: &str, language: &str) -> Result<String> {
        let json = HAMSA
            .send_json(
                self.client
                    .post(format!("{}/jobs/transcribe", self.base_url))
                    .header("Authorization", auth_header(&self.api_key))
                    .json(&json!({
                        "mediaUrl": media_url,
                        "model": model,
                        "language": language,
                    })),
            )
            .await?;

        if json["success"] == Value::Bool(false) {
            let message = first_str(&json, &["/message"]).unwrap_or("Failed to submit transcription job");
            return Err(Error::provider(HAMSA.name, message));
        }

        first_str(&json, &["/data/jobId", "/data/id"])
            .map(str::to_string)
            .ok_or_else(|| Error::provider(HAMSA.name, "No job ID returned from Hamsa"))
    }

    async fn check(&self, job_id: &str) -> Result<JobStatus<Value>> {
        let json = fetch_job(&self.client, &self.base_url, &self.api_key, job_id).await?;
        let job = job_record(&json);

        Ok(match job["status"].as_str() {
            Some(STATUS_COMPLETED) => {
                let response = &job["jobResponse"];
                JobStatus::Completed(if response.is_object() {
                    response.clone()
                } else {
                    job.clone()
                })
            }
            Some(STATUS_FAILED) => JobStatus::Failed(
                first_str(job, &["/jobResponse/error"])
                    .unwrap_or("Transcription job failed")
                    .to_string(),
            ),
            _ => JobStatus::Pending,
        })
    }
}

/// The file host answers with a bare URL in plain text.
fn parse_media_url(body: &str) -> Result<String> {
    let candidate = body.trim();
    match url::Url::parse(candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(candidate.to_string()),
        _ => Err(Error::provider(
            HAMSA.name,
            "Failed to get valid URL from file hosting service",
        )),
    }
}

#[async_trait]
impl Transcriber for HamsaTranscriber {
    fn name(&self) -> &str {
        "Hamsa AI"
    }

    async fn transcribe(
        &self,
        audio: &[u8],
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult> {
        let media_url = self.upload(audio).await?;

        let language = LANGUAGES.normalize(&options.language_selection());
        let model = options.model.as_deref().unwrap_or(HamsaSttDefaults::MODEL);
        tracing::info!(%language, model, "Submitting Hamsa transcription job");

        let job_id = self.submit(&media_url, model, &language).await?;

        let job_ref = job_id.as_str();
        let response = self
            .poller
            .run(HAMSA.name, job_ref, |_| self.check(job_ref))
            .await?;

        Ok(TranscriptionResult {
            text: first_str(&response, &["/text", "/transcription"])
                .unwrap_or("")
                .to_string(),
            confidence: response["confidence"].as_f64().map(|c| c as f32),
            language: Some(language),
            duration: None,
        })
    }

    fn supported_formats(&self) -> &'static [&'static str] {
        FORMATS
    }

    fn supported_languages(&self) -> &'static [&'static str] {
        &["ar", "en"]
    }
}
