//! HTTP server for voxgate

pub mod error;
pub mod rest;
pub mod types;

pub use error::AppError;
pub use rest::{AppState, create_router};
pub use types::*;
