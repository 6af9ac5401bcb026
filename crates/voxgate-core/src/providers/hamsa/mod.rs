//! Hamsa adapters
//!
//! Both capabilities are asynchronous jobs: submit, then poll
//! `GET /jobs?jobId=` until the job is COMPLETED or FAILED.

pub mod stt;
pub mod tts;

pub use stt::{HamsaSttDefaults, HamsaTranscriber};
pub use tts::{HamsaSynthesizer, HamsaTtsDefaults};

use super::http::Vendor;
use crate::Result;
use reqwest::Client;
use serde_json::Value;

pub(crate) const HAMSA: Vendor = Vendor::new("Hamsa").error_at(&["/message", "/error"]);

pub(crate) const API_KEY_VAR: &str = "HAMSA_API_KEY";

pub(crate) const STATUS_COMPLETED: &str = "COMPLETED";
pub(crate) const STATUS_FAILED: &str = "FAILED";

pub(crate) fn auth_header(key: &str) -> String {
    format!("Token {}", key)
}

/// Fetch the raw job status document
pub(crate) async fn fetch_job(
    client: &Client,
    base_url: &str,
    api_key: &str,
    job_id: &str,
) -> Result<Value> {
    HAMSA
        .send_json(
            client
                .get(format!("{}/jobs", base_url))
                .header("Authorization", auth_header(api_key))
                .query(&[("jobId", job_id)]),
        )
        .await
}

/// The job record sits at `data.data` or directly at `data`.
pub(crate) fn job_record(json: &Value) -> &Value {
    let nested = &json["data"]["data"];
    if nested.is_object() { nested } else { &json["data"] }
}
