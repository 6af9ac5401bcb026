//! Configuration management for voxgate
//!
//! Loads configuration with priority:
//! 1. voxgate.toml (or specified config file)
//! 2. Environment variables (fallback for credentials and voice defaults)
//! 3. Defaults

use crate::catalog::ProvidersCatalog;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "voxgate.toml";

/// Gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub http: HttpConfig,

    /// Vendor API keys (can reference env vars with ${VAR_NAME})
    #[serde(default)]
    pub credentials: Credentials,

    #[serde(default)]
    pub voices: VoiceDefaults,

    #[serde(default)]
    pub endpoints: Endpoints,

    /// Catalog override; the builtin catalog is used when absent
    pub providers: Option<ProvidersCatalog>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where synthesized audio is written and how it is addressed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// URL prefix the audio directory is served under
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Outbound HTTP settings shared by all adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Chat completions can run long; they get their own budget
    #[serde(default = "default_timeout_secs")]
    pub llm_timeout_secs: u64,

    /// Sent as HTTP-Referer to OpenRouter
    #[serde(default = "default_referer")]
    pub referer: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

/// Vendor API keys
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub hamsa_api_key: Option<String>,
    pub deepgram_api_key: Option<String>,
    pub google_cloud_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
}

/// Operator-chosen default voices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceDefaults {
    pub hamsa_default_voice_id: Option<String>,
    pub elevenlabs_default_voice_id: Option<String>,
    pub elevenlabs_default_model: Option<String>,
}

/// Vendor base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_openai_url")]
    pub openai: String,
    #[serde(default = "default_hamsa_url")]
    pub hamsa: String,
    #[serde(default = "default_deepgram_url")]
    pub deepgram: String,
    #[serde(default = "default_google_speech_url")]
    pub google_speech: String,
    #[serde(default = "default_openrouter_url")]
    pub openrouter: String,
    #[serde(default = "default_elevenlabs_url")]
    pub elevenlabs: String,
    /// Temporary public file host used before Hamsa transcription
    #[serde(default = "default_media_upload_url")]
    pub media_upload_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            public_prefix: default_public_prefix(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            llm_timeout_secs: default_timeout_secs(),
            referer: default_referer(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openai: default_openai_url(),
            hamsa: default_hamsa_url(),
            deepgram: default_deepgram_url(),
            google_speech: default_google_speech_url(),
            openrouter: default_openrouter_url(),
            elevenlabs: default_elevenlabs_url(),
            media_upload_url: default_media_upload_url(),
        }
    }
}

impl Endpoints {
    /// Point every vendor at the same base URL (mock servers in tests)
    pub fn all(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            openai: base.to_string(),
            hamsa: base.to_string(),
            deepgram: base.to_string(),
            google_speech: base.to_string(),
            openrouter: base.to_string(),
            elevenlabs: base.to_string(),
            media_upload_url: format!("{}/upload", base),
        }
    }
}

/// The subset of configuration adapters are built from
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub credentials: Credentials,
    pub voices: VoiceDefaults,
    pub endpoints: Endpoints,
    pub http: HttpConfig,
}

impl GatewayConfig {
    /// Load configuration with the following priority:
    /// 1. voxgate.toml in the current directory or a parent
    /// 2. Environment variables (fallback)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file, or search for one
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(config_path) => {
                tracing::debug!("Loading configuration from: {:?}", config_path);

                let contents = fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

                toml::from_str::<GatewayConfig>(&contents)
                    .with_context(|| format!("Failed to parse config file: {:?}", config_path))?
            }
            None => {
                tracing::debug!("No {} found, using defaults and environment", CONFIG_FILE_NAME);
                GatewayConfig::default()
            }
        };

        config.resolve_env_vars();

        if let Some(ref catalog) = config.providers {
            catalog
                .validate()
                .context("Invalid [providers] catalog in configuration")?;
        }

        Ok(config)
    }

    /// Defaults plus environment, ignoring any config file
    pub fn from_env() -> Self {
        let mut config = GatewayConfig::default();
        config.resolve_env_vars();
        config
    }

    /// Find voxgate.toml by searching current directory and parents
    fn find_config_file() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolve ${VAR_NAME} references, falling back to the conventional variables
    fn resolve_env_vars(&mut self) {
        let creds = &mut self.credentials;
        resolve_or_env(&mut creds.openai_api_key, "OPENAI_API_KEY");
        resolve_or_env(&mut creds.hamsa_api_key, "HAMSA_API_KEY");
        resolve_or_env(&mut creds.deepgram_api_key, "DEEPGRAM_API_KEY");
        resolve_or_env(&mut creds.google_cloud_api_key, "GOOGLE_CLOUD_API_KEY");
        resolve_or_env(&mut creds.openrouter_api_key, "OPENROUTER_API_KEY");
        resolve_or_env(&mut creds.elevenlabs_api_key, "ELEVENLABS_API_KEY");

        let voices = &mut self.voices;
        resolve_or_env(&mut voices.hamsa_default_voice_id, "HAMSA_DEFAULT_VOICE_ID");
        resolve_or_env(
            &mut voices.elevenlabs_default_voice_id,
            "ELEVENLABS_DEFAULT_VOICE_ID",
        );
        resolve_or_env(&mut voices.elevenlabs_default_model, "ELEVENLABS_DEFAULT_MODEL");

        if let Some(referer) = Self::resolve_env_var(&self.http.referer) {
            self.http.referer = referer;
        }
    }

    /// Resolve a single ${VAR_NAME} reference
    fn resolve_env_var(value: &str) -> Option<String> {
        if value.starts_with("${") && value.ends_with('}') {
            let var_name = &value[2..value.len() - 1];
            env::var(var_name).ok()
        } else {
            Some(value.to_string())
        }
    }

    /// The effective provider catalog
    pub fn catalog(&self) -> ProvidersCatalog {
        self.providers.clone().unwrap_or_else(ProvidersCatalog::builtin)
    }

    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            credentials: self.credentials.clone(),
            voices: self.voices.clone(),
            endpoints: self.endpoints.clone(),
            http: self.http.clone(),
        }
    }

    /// Create test-friendly defaults (dummy keys, no environment lookups)
    pub fn test_defaults() -> Self {
        Self {
            credentials: Credentials {
                openai_api_key: Some("test-openai-key".to_string()),
                hamsa_api_key: Some("test-hamsa-key".to_string()),
                deepgram_api_key: Some("test-deepgram-key".to_string()),
                google_cloud_api_key: Some("test-google-key".to_string()),
                openrouter_api_key: Some("test-openrouter-key".to_string()),
                elevenlabs_api_key: Some("test-elevenlabs-key".to_string()),
            },
            ..Default::default()
        }
    }
}

/// Resolve a configured value, or read `var` when the value is absent,
/// empty, or an unresolvable reference.
fn resolve_or_env(slot: &mut Option<String>, var: &str) {
    let resolved = match slot.as_deref() {
        Some(value) if !value.is_empty() => GatewayConfig::resolve_env_var(value),
        _ => None,
    };
    *slot = resolved
        .or_else(|| env::var(var).ok())
        .filter(|value| !value.is_empty());
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("temp")
}

fn default_public_prefix() -> String {
    "/audio".to_string()
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_referer() -> String {
    "http://localhost:3000".to_string()
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_hamsa_url() -> String {
    "https://api.tryhamsa.com/v1".to_string()
}

fn default_deepgram_url() -> String {
    "https://api.deepgram.com".to_string()
}

fn default_google_speech_url() -> String {
    "https://speech.googleapis.com".to_string()
}

fn default_openrouter_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_media_upload_url() -> String {
    "https://litterbox.catbox.moe/resources/internals/api.php".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::test_defaults();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.storage.audio_dir, PathBuf::from("temp"));
        assert_eq!(config.limits.max_upload_bytes, 25 * 1024 * 1024);
        assert_eq!(config.http.llm_timeout(), Duration::from_secs(120));
        assert!(config.credentials.deepgram_api_key.is_some());
        assert_eq!(config.catalog(), ProvidersCatalog::builtin());
    }

    /// Sets a variable for the life of one test and removes it on drop, even
    /// when the test panics. Every test uses its own variable name since
    /// tests share the process environment across threads.
    struct ScopedEnv(&'static str);

    impl ScopedEnv {
        fn set(name: &'static str, value: &str) -> Self {
            unsafe {
                env::set_var(name, value);
            }
            Self(name)
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            unsafe {
                env::remove_var(self.0);
            }
        }
    }

    #[test]
    fn test_resolve_env_var() {
        {
            let _var = ScopedEnv::set("VOXGATE_TEST_RESOLVE_VAR", "test_value");

            let resolved = GatewayConfig::resolve_env_var("${VOXGATE_TEST_RESOLVE_VAR}");
            assert_eq!(resolved, Some("test_value".to_string()));

            let not_var = GatewayConfig::resolve_env_var("plain_value");
            assert_eq!(not_var, Some("plain_value".to_string()));
        }

        assert_eq!(
            GatewayConfig::resolve_env_var("${VOXGATE_TEST_RESOLVE_VAR}"),
            None
        );
    }

    #[test]
    fn test_absent_key_falls_back_to_conventional_variable() {
        {
            let _var = ScopedEnv::set("VOXGATE_TEST_FALLBACK_KEY", "from-env");

            let mut absent = None;
            resolve_or_env(&mut absent, "VOXGATE_TEST_FALLBACK_KEY");
            assert_eq!(absent.as_deref(), Some("from-env"));

            let mut explicit = Some("from-file".to_string());
            resolve_or_env(&mut explicit, "VOXGATE_TEST_FALLBACK_KEY");
            assert_eq!(explicit.as_deref(), Some("from-file"));

            let mut dangling = Some("${VOXGATE_TEST_NEVER_SET}".to_string());
            resolve_or_env(&mut dangling, "VOXGATE_TEST_FALLBACK_KEY");
            assert_eq!(dangling.as_deref(), Some("from-env"));
        }

        let mut empty = Some(String::new());
        resolve_or_env(&mut empty, "VOXGATE_TEST_FALLBACK_KEY");
        assert_eq!(empty, None);
    }

    #[test]
    fn test_scoped_env_removes_variable() {
        {
            let _var = ScopedEnv::set("VOXGATE_TEST_SCOPED", "1");
            assert_eq!(env::var("VOXGATE_TEST_SCOPED").as_deref(), Ok("1"));
        }
        assert!(env::var("VOXGATE_TEST_SCOPED").is_err());

        let panicked = std::panic::catch_unwind(|| {
            let _var = ScopedEnv::set("VOXGATE_TEST_SCOPED_PANIC", "1");
            panic!("test body failed");
        });
        assert!(panicked.is_err());
        assert!(env::var("VOXGATE_TEST_SCOPED_PANIC").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let _var = ScopedEnv::set("VOXGATE_TEST_DG_KEY", "dg-secret");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
port = 9000

[storage]
audio_dir = "/tmp/voxgate-audio"

[logging]
format = "json"

[credentials]
deepgram_api_key = "${{VOXGATE_TEST_DG_KEY}}"

[endpoints]
deepgram = "http://localhost:1234"

[[providers.stt]]
id = "dg"
name = "Deepgram"
adapter = "DeepgramSTT"
"#
        )
        .unwrap();

        let config = GatewayConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.credentials.deepgram_api_key.as_deref(),
            Some("dg-secret")
        );
        assert_eq!(config.endpoints.deepgram, "http://localhost:1234");
        assert_eq!(config.endpoints.openrouter, "https://openrouter.ai/api/v1");

        // Only STT is overridden; the other capabilities keep the builtin lists
        let catalog = config.catalog();
        assert_eq!(catalog.stt.len(), 1);
        assert_eq!(catalog.tts, ProvidersCatalog::builtin().tts);
    }

    #[test]
    fn test_load_rejects_empty_capability() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[providers]
llm = []
"#
        )
        .unwrap();

        let err = GatewayConfig::load_from(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("no LLM providers"));
    }

    #[test]
    fn test_load_rejects_unknown_adapter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[providers.tts]]
id = "acme"
name = "Acme"
adapter = "AcmeTTS"
"#
        )
        .unwrap();

        let err = GatewayConfig::load_from(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("AcmeTTS"));
    }

    #[test]
    fn test_endpoints_all() {
        let endpoints = Endpoints::all("http://127.0.0.1:5000/");
        assert_eq!(endpoints.hamsa, "http://127.0.0.1:5000");
        assert_eq!(endpoints.media_upload_url, "http://127.0.0.1:5000/upload");
    }
}
