use crate::error::AppError;
use crate::types::*;
use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    routing::{get, post},
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Instrument, Level};
use voxgate_core::{
    CapabilityKind, ChatMessage, ChatOptions, ChatResult, ConversationRequest, ConversationResult,
    Orchestrator, SynthesisOutcome, SynthesizeOptions, TranscribeOptions, TranscriptionResult,
};
use voxgate_telemetry::{ConversationSpanAttributes, capability_span, conversation_span};

/// Room for the non-audio multipart fields on top of the audio limit
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

const DEFAULT_AUDIO_ROUTE: &str = "/audio";

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, max_upload_bytes: usize) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            max_upload_bytes,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let store = state.orchestrator.store();
    let audio_route = match store.public_prefix() {
        "" => DEFAULT_AUDIO_ROUTE.to_string(),
        prefix => prefix.to_string(),
    };
    let audio_dir = store.dir().to_path_buf();
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/api/health", get(health_check))
        // Speech to text
        .route("/api/stt/providers", get(stt_providers))
        .route("/api/stt/transcribe", post(transcribe))
        // Text to speech
        .route("/api/tts/providers", get(tts_providers))
        .route("/api/tts/voices/:provider_id", get(tts_voices))
        .route("/api/tts/synthesize", post(synthesize))
        // Chat
        .route("/api/llm/providers", get(llm_providers))
        .route("/api/llm/models/:provider_id", get(llm_models))
        .route("/api/llm/chat", post(chat))
        // Full pipeline
        .route("/api/agent/conversation", post(conversation))
        .nest_service(&audio_route, ServeDir::new(audio_dir))
        .fallback(not_found)
        // Middleware layers (applied in reverse order)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    tracing::debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

fn providers_response(state: &AppState, capability: CapabilityKind) -> Json<ProvidersResponse> {
    let providers = state
        .orchestrator
        .providers(capability)
        .into_iter()
        .map(ProviderSummary::from)
        .collect();
    Json(ProvidersResponse { providers })
}

async fn stt_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    providers_response(&state, CapabilityKind::Stt)
}

async fn tts_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    providers_response(&state, CapabilityKind::Tts)
}

async fn llm_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    providers_response(&state, CapabilityKind::Llm)
}

async fn llm_models(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
) -> Result<Json<ModelsResponse>, AppError> {
    let models = state.orchestrator.models(&provider_id)?;
    Ok(Json(ModelsResponse { models }))
}

async fn tts_voices(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
) -> Result<Json<VoicesResponse>, AppError> {
    let span = capability_span(&request_id(), CapabilityKind::Tts, &provider_id);
    let voices = state
        .orchestrator
        .voices(&provider_id)
        .instrument(span)
        .await?;
    Ok(Json(VoicesResponse { voices }))
}

async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResult>, AppError> {
    let multipart = multipart.map_err(|e| AppError::bad_request(e.body_text()))?;
    let form = read_upload(multipart, state.max_upload_bytes).await?;

    let provider = form
        .text("provider")
        .ok_or_else(|| AppError::bad_request("Provider is required"))?;
    let audio = form
        .audio
        .as_deref()
        .ok_or_else(|| AppError::bad_request("Audio file is required"))?;

    let options = TranscribeOptions {
        language: form.text("language").map(str::to_string),
        model: form.text("model").map(str::to_string),
    };

    let span = capability_span(&request_id(), CapabilityKind::Stt, provider);
    let result = state
        .orchestrator
        .transcribe(provider, audio, &options)
        .instrument(span)
        .await?;

    Ok(Json(result))
}

async fn synthesize(
    State(state): State<AppState>,
    payload: Result<Json<SynthesizeRequest>, JsonRejection>,
) -> Result<Json<SynthesisOutcome>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    let (Some(provider), Some(text)) = (non_empty(req.provider), non_empty(req.text)) else {
        return Err(AppError::bad_request("Provider and text are required"));
    };

    let options = SynthesizeOptions {
        voice: non_empty(req.voice),
        ..Default::default()
    };

    let span = capability_span(&request_id(), CapabilityKind::Tts, &provider);
    let outcome = state
        .orchestrator
        .synthesize(&provider, &text, &options)
        .instrument(span)
        .await?;

    Ok(Json(outcome))
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResult>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    let (Some(provider), Some(model), Some(messages)) =
        (non_empty(req.provider), non_empty(req.model), req.messages)
    else {
        return Err(AppError::bad_request(
            "Provider, model, and messages array are required",
        ));
    };

    let options = ChatOptions {
        model: Some(model),
        temperature: req.temperature,
        max_tokens: req.max_tokens,
    };

    let span = capability_span(&request_id(), CapabilityKind::Llm, &provider);
    let result = state
        .orchestrator
        .chat(&provider, &messages, &options)
        .instrument(span)
        .await?;

    Ok(Json(result))
}

async fn conversation(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ConversationResult>, AppError> {
    let multipart = multipart.map_err(|e| AppError::bad_request(e.body_text()))?;
    let mut form = read_upload(multipart, state.max_upload_bytes).await?;
    let upload = form.audio.take();

    let required = (
        form.text("sttProvider"),
        form.text("llmProvider"),
        form.text("llmModel"),
        form.text("ttsProvider"),
        form.text("ttsVoice"),
    );
    let (Some(stt), Some(llm), Some(model), Some(tts), Some(voice)) = required else {
        return Err(AppError::bad_request(
            "sttProvider, llmProvider, llmModel, ttsProvider, and ttsVoice are required",
        ));
    };

    let history = match form.text("conversationHistory") {
        Some(raw) => serde_json::from_str::<Vec<ChatMessage>>(raw).map_err(|e| {
            AppError::bad_request(format!("conversationHistory is not a valid message array: {}", e))
        })?,
        None => Vec::new(),
    };

    let audio = upload.ok_or_else(|| AppError::bad_request("Audio file is required"))?;

    let request = ConversationRequest {
        audio,
        stt_provider: stt.to_string(),
        llm_provider: llm.to_string(),
        llm_model: model.to_string(),
        tts_provider: tts.to_string(),
        tts_voice: voice.to_string(),
        history,
        language: form.text("language").map(str::to_string),
    };

    let span = conversation_span(&ConversationSpanAttributes {
        request_id: request_id(),
        stt_provider: request.stt_provider.clone(),
        llm_provider: request.llm_provider.clone(),
        llm_model: request.llm_model.clone(),
        tts_provider: request.tts_provider.clone(),
    });

    let result = state
        .orchestrator
        .converse(request)
        .instrument(span)
        .await?;

    Ok(Json(result))
}

/// Multipart upload: the `audio` file plus plain text fields
#[derive(Debug, Default)]
struct UploadForm {
    audio: Option<Vec<u8>>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Trimmed text field, `None` when absent or blank
    fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

async fn read_upload(mut multipart: Multipart, max_bytes: usize) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "audio" {
            let content_type = field.content_type().unwrap_or_default().to_string();
            if !content_type.starts_with("audio/") {
                return Err(AppError::bad_request("Only audio files are allowed"));
            }

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(format!("Failed to read audio: {}", e)))?;

            if data.len() > max_bytes {
                return Err(AppError::bad_request(format!(
                    "Audio file too large: {} bytes (max {})",
                    data.len(),
                    max_bytes
                )));
            }

            tracing::debug!(bytes = data.len(), %content_type, "Received audio upload");
            form.audio = Some(data.to_vec());
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::bad_request(format!("Invalid field {}: {}", name, e)))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
