//! OpenRouter chat completions (OpenAI-compatible wire format)

pub mod chat;
pub mod data;

pub use chat::{OpenRouterChatter, OpenRouterDefaults};

use super::http::Vendor;

pub(crate) const OPENROUTER: Vendor = Vendor::new("LLM")
    .error_at(&["/error/message"])
    .on_timeout("LLM request timed out. The model is taking too long to respond.");

pub(crate) const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
