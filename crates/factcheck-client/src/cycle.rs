//! Request/response cycle: one accepted utterance, one call, one resolution.
//!
//! The cycle is split in two so the conversation store is never borrowed
//! across the network await:
//!
//! 1. [`RequestCycle::execute`] issues the single call and collapses every
//!    failure into [`CycleOutcome::Failed`] after logging it.
//! 2. [`CycleOutcome::apply`] performs the single store mutation.
//!
//! Callers that own the store outright can use [`RequestCycle::submit`],
//! which runs accept, execute and apply in sequence.

use async_trait::async_trait;
use tracing::{debug, warn};

use factcheck_core::{ConversationStore, CoreError, MessageId};

use crate::error::{ClientError, FailureKind};
use crate::wire::ChatReply;

/// Seam between the cycle and the transport.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send one utterance and await one reply.
    async fn chat(&self, message: &str) -> Result<ChatReply, ClientError>;
}

/// Result of one executed request, ready to be applied to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The service answered.
    Answered(ChatReply),
    /// The request failed; the kind is kept for diagnostics only.
    Failed(FailureKind),
}

impl CycleOutcome {
    /// Append the single assistant entry this outcome calls for.
    pub fn apply(self, store: &mut ConversationStore) -> Result<MessageId, CoreError> {
        match self {
            Self::Answered(reply) => store.resolve_success(reply.response, reply.sources),
            Self::Failed(_) => store.resolve_failure(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Answered(_))
    }
}

/// Drives utterances through a [`ChatApi`].
pub struct RequestCycle<A> {
    api: A,
}

impl<A: ChatApi> RequestCycle<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Issue exactly one request for an already accepted utterance.
    ///
    /// Never fails: error detail goes to the log and the outcome only says
    /// that the request failed.
    pub async fn execute(&self, utterance: &str) -> CycleOutcome {
        match self.api.chat(utterance).await {
            Ok(reply) => {
                debug!(
                    sources = reply.sources.as_ref().map_or(0, Vec::len),
                    "Fact-check answered"
                );
                CycleOutcome::Answered(reply)
            }
            Err(e) => {
                let kind = e.kind();
                warn!(error = %e, kind = %kind, "Fact-check request failed");
                CycleOutcome::Failed(kind)
            }
        }
    }

    /// Accept, execute and resolve one utterance against a store.
    ///
    /// Returns the id of the appended assistant message. A refused
    /// submission makes no request and leaves the store unchanged.
    pub async fn submit(
        &self,
        store: &mut ConversationStore,
        text: &str,
    ) -> Result<MessageId, CoreError> {
        store.append_user(text)?;
        let outcome = self.execute(text).await;
        outcome.apply(store)
    }
}
