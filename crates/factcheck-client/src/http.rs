//! HTTP client for the fact-checking service.

use std::collections::VecDeque;

use async_trait::async_trait;
use futures_util::{stream, Stream, StreamExt};
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::cycle::ChatApi;
use crate::error::ClientError;
use crate::stream::SseDecoder;
use crate::wire::{ChatReply, ChatRequest, StreamEvent};

const CHAT_PATH: &str = "/api/chat";
const CHAT_STREAM_PATH: &str = "/api/chat/stream";
const HEALTH_PATH: &str = "/health";

/// Longest error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 512;

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP client for the fact-checking service.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpChatClient {
    /// Create a new HTTP client for a base URL (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from a resolved configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(&config.base_url()?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the service to fact-check one utterance.
    pub async fn ask(&self, message: &str) -> Result<ChatReply, ClientError> {
        let url = self.url(CHAT_PATH);
        debug!(url = %url, len = message.len(), "POST chat request");

        let response = self
            .inner
            .post(&url)
            .json(&ChatRequest::new(message))
            .send()
            .await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        let reply: ChatReply = serde_json::from_str(&body)
            .map_err(|e| ClientError::MalformedPayload(e.to_string()))?;

        debug!(
            response_len = reply.response.len(),
            sources = reply.sources.as_ref().map_or(0, Vec::len),
            "Chat reply received"
        );
        Ok(reply)
    }

    /// Ask the streaming endpoint and yield its events as they arrive.
    ///
    /// The stream ends when the connection closes; a `Done` event is yielded
    /// if the service sent one.
    pub async fn chat_stream(
        &self,
        message: &str,
    ) -> Result<impl Stream<Item = Result<StreamEvent, ClientError>>, ClientError> {
        let url = self.url(CHAT_STREAM_PATH);
        debug!(url = %url, "POST chat stream request");

        let response = self
            .inner
            .post(&url)
            .json(&ChatRequest::new(message))
            .send()
            .await?;
        let response = check_status(response).await?;

        let state = StreamState {
            bytes: Box::pin(response.bytes_stream()),
            decoder: SseDecoder::new(),
            ready: VecDeque::new(),
            finished: false,
        };

        Ok(stream::unfold(state, |mut state| async move {
            loop {
                if let Some(event) = state.ready.pop_front() {
                    return Some((event, state));
                }
                if state.finished {
                    return None;
                }
                match state.bytes.next().await {
                    Some(Ok(chunk)) => state.ready.extend(state.decoder.push(&chunk)),
                    Some(Err(e)) => {
                        state.finished = true;
                        state.ready.push_back(Err(ClientError::Http(e)));
                    }
                    None => {
                        state.finished = true;
                        state.ready.extend(state.decoder.finish());
                    }
                }
            }
        }))
    }

    /// Check if the service reports itself healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = self.url(HEALTH_PATH);
        debug!(url = %url, "Checking health");

        let response = self.inner.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }

        let health: HealthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedPayload(e.to_string()))?;
        Ok(health.status == "healthy")
    }
}

struct StreamState<S> {
    bytes: std::pin::Pin<Box<S>>,
    decoder: SseDecoder,
    ready: VecDeque<Result<StreamEvent, ClientError>>,
    finished: bool,
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }

    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl ChatApi for HttpChatClient {
    async fn chat(&self, message: &str) -> Result<ChatReply, ClientError> {
        self.ask(message).await
    }
}
