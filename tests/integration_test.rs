//! End-to-end tests: HTTP router → orchestrator → real vendor adapters,
//! with every vendor served by one mock server.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use voxgate_core::config::Endpoints;
use voxgate_core::testing::InstantSleeper;
use voxgate_core::{AudioStore, GatewayConfig, Orchestrator, ProviderRegistry};
use voxgate_server::{AppState, create_router};

const BOUNDARY: &str = "voxgate-e2e";

fn gateway(server: &ServerGuard, dir: &TempDir) -> Router {
    let mut settings = GatewayConfig::test_defaults().provider_settings();
    settings.endpoints = Endpoints::all(&server.url());

    let registry =
        ProviderRegistry::new(settings).with_sleeper(Arc::new(InstantSleeper::default()));

    let orchestrator = Orchestrator::builder()
        .factory(Arc::new(registry))
        .store(AudioStore::new(dir.path(), "/audio"))
        .build()
        .unwrap();

    create_router(AppState::new(orchestrator, 1024 * 1024))
}

fn conversation_request(fields: &[(&str, &str)], audio: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"audio\"; filename=\"clip.webm\"\r\nContent-Type: audio/webm\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(audio);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/agent/conversation")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn deepgram_transcript(text: &str) -> String {
    json!({
        "metadata": {"duration": 1.5},
        "results": {"channels": [{"alternatives": [{
            "transcript": text,
            "confidence": 0.97,
            "languages": ["en"]
        }]}]}
    })
    .to_string()
}

#[tokio::test]
async fn test_conversation_through_vendors() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let listen = server
        .mock("POST", "/v1/listen")
        .match_header("authorization", "Token test-deepgram-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("model".into(), "nova-3".into()),
            Matcher::UrlEncoded("language".into(), "multi".into()),
        ]))
        .match_body(Matcher::Exact("fake-webm".to_string()))
        .with_body(deepgram_transcript("what time is it"))
        .create_async()
        .await;

    let chat = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-openrouter-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"model": "z-ai/glm-4.5-air"})),
            Matcher::Regex(r#""role":"system""#.to_string()),
            Matcher::Regex(r#""content":"Hello!""#.to_string()),
            Matcher::Regex(r#""content":"what time is it""#.to_string()),
        ]))
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "It is noon."}}],
                "usage": {"total_tokens": 42}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let speech = server
        .mock("POST", "/text-to-speech/21m00Tcm4TlvDq8ikWAM")
        .match_header("xi-api-key", "test-elevenlabs-key")
        .match_body(Matcher::PartialJson(json!({"text": "It is noon."})))
        .with_header("content-type", "audio/mpeg")
        .with_body(b"ID3-noon".to_vec())
        .create_async()
        .await;

    let app = gateway(&server, &dir);
    let history = json!([
        {"role": "user", "content": "hi"},
        {"role": "assistant", "content": "Hello!"}
    ])
    .to_string();

    let (status, body) = send(
        &app,
        conversation_request(
            &[
                ("sttProvider", "deepgram-stt"),
                ("llmProvider", "openrouter"),
                ("llmModel", "z-ai/glm-4.5-air"),
                ("ttsProvider", "elevenlabs-tts"),
                ("ttsVoice", "21m00Tcm4TlvDq8ikWAM"),
                ("conversationHistory", &history),
            ],
            b"fake-webm",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));

    let result: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(result["transcription"], "what time is it");
    assert_eq!(result["detectedLanguage"], "en");
    assert_eq!(result["llmResponse"], "It is noon.");
    assert_eq!(result["format"], "mp3");

    listen.assert_async().await;
    chat.assert_async().await;
    speech.assert_async().await;

    let audio_url = result["audioUrl"].as_str().unwrap();
    assert!(audio_url.starts_with("/audio/"));

    let (status, audio) = send(
        &app,
        Request::builder().uri(audio_url).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(audio, b"ID3-noon");
}

#[tokio::test]
async fn test_vendor_failure_maps_to_stage_error() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    server
        .mock("POST", "/v1/listen")
        .match_query(Matcher::Any)
        .with_body(deepgram_transcript("hello"))
        .create_async()
        .await;

    server
        .mock("POST", "/chat/completions")
        .with_status(402)
        .with_body(json!({"error": {"message": "Insufficient credits"}}).to_string())
        .create_async()
        .await;

    let speech = server
        .mock("POST", Matcher::Regex("^/text-to-speech/.*".to_string()))
        .expect(0)
        .create_async()
        .await;

    let app = gateway(&server, &dir);
    let (status, body) = send(
        &app,
        conversation_request(
            &[
                ("sttProvider", "deepgram-stt"),
                ("llmProvider", "openrouter"),
                ("llmModel", "z-ai/glm-4.5-air"),
                ("ttsProvider", "elevenlabs-tts"),
                ("ttsVoice", "21m00Tcm4TlvDq8ikWAM"),
            ],
            b"fake-webm",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        error["error"],
        "LLM stage failed: LLM request failed: Insufficient credits"
    );
    assert_eq!(error["status"], 500);

    speech.assert_async().await;
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_disabled_provider_is_not_found() {
    let server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let app = gateway(&server, &dir);

    let (status, body) = send(
        &app,
        conversation_request(
            &[
                ("sttProvider", "google-cloud-stt"),
                ("llmProvider", "openrouter"),
                ("llmModel", "z-ai/glm-4.5-air"),
                ("ttsProvider", "openai-tts"),
                ("ttsVoice", "nova"),
            ],
            b"fake-webm",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        error["error"],
        "STT provider 'google-cloud-stt' not found or disabled"
    );
}

#[tokio::test]
async fn test_synthesize_endpoint_with_openai() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let speech = server
        .mock("POST", "/audio/speech")
        .match_header("authorization", "Bearer test-openai-key")
        .match_body(Matcher::PartialJson(json!({"input": "Good morning", "voice": "nova"})))
        .with_body(b"openai-mp3".to_vec())
        .create_async()
        .await;

    let app = gateway(&server, &dir);
    let request = Request::builder()
        .method("POST")
        .uri("/api/tts/synthesize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"provider": "openai-tts", "text": "Good morning", "voice": "nova"}).to_string(),
        ))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));
    speech.assert_async().await;

    let outcome: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(outcome["format"], "mp3");
    let file_name = outcome["audioUrl"]
        .as_str()
        .unwrap()
        .trim_start_matches("/audio/");
    assert_eq!(std::fs::read(dir.path().join(file_name)).unwrap(), b"openai-mp3");
}
