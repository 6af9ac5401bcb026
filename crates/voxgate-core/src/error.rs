use crate::catalog::CapabilityKind;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an orchestrator failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Stt,
    Llm,
    Tts,
    Storage,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Stt => "STT",
            Stage::Llm => "LLM",
            Stage::Tts => "TTS",
            Stage::Storage => "storage",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{provider} request failed: {message}")]
    Provider { provider: String, message: String },

    #[error("{message}")]
    Timeout { provider: String, message: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("{capability} provider '{id}' not found or disabled")]
    ProviderNotFoundOrDisabled {
        capability: CapabilityKind,
        id: String,
    },

    #[error("{provider} job {job_id} failed: {message}")]
    UpstreamJobFailed {
        provider: String,
        job_id: String,
        message: String,
    },

    #[error("{provider} job {job_id} still pending after {attempts} status checks")]
    UpstreamJobTimeout {
        provider: String,
        job_id: String,
        attempts: u32,
    },

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Helper for creating configuration errors
    ///
    /// # Example
    /// ```
    /// use voxgate_core::Error;
    /// let err = Error::config_error("DEEPGRAM_API_KEY is not set");
    /// ```
    pub fn config_error(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Helper for creating vendor failures
    ///
    /// # Example
    /// ```
    /// use voxgate_core::Error;
    /// let err = Error::provider("Deepgram", "Invalid credentials");
    /// assert_eq!(err.to_string(), "Deepgram request failed: Invalid credentials");
    /// ```
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Provider {
            provider: provider.into(),
            message: msg.into(),
        }
    }

    pub fn not_found(capability: CapabilityKind, id: impl Into<String>) -> Self {
        Error::ProviderNotFoundOrDisabled {
            capability,
            id: id.into(),
        }
    }

    /// Attribute this error to a pipeline stage.
    pub fn at_stage(self, stage: Stage) -> Self {
        Error::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The stage this error is attributed to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Innermost error, looking through stage attribution.
    pub fn root(&self) -> &Error {
        match self {
            Error::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self.root(),
            Error::Timeout { .. } | Error::UpstreamJobTimeout { .. }
        )
    }
}
