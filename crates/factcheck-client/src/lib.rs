//! Client library for the Health Fact Checker service.
//!
//! Provides the HTTP client for the `/api/chat` family of endpoints and the
//! request/response cycle that turns one accepted utterance into exactly one
//! conversation store mutation.

pub mod config;
pub mod cycle;
pub mod error;
pub mod http;
pub mod stream;
pub mod wire;

pub use config::{ClientConfig, DeploymentMode, DEV_BASE_URL, MODE_ENV_VAR};
pub use cycle::{ChatApi, CycleOutcome, RequestCycle};
pub use error::{ClientError, FailureKind};
pub use http::HttpChatClient;
pub use stream::SseDecoder;
pub use wire::{ChatReply, ChatRequest, StreamEvent};
