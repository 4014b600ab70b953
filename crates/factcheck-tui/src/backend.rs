//! Background task that performs fact-check requests.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use factcheck_client::{ChatApi, RequestCycle};

use crate::event::{BackendCommand, UiEvent};

/// Run the request loop.
///
/// This function runs in a separate thread with its own tokio runtime.
/// Each `Ask` produces exactly one `Resolved` event. Commands are handled
/// one at a time; the UI only sends `Ask` while its store is idle.
///
/// `Quit` (or a closed command channel) is still honoured while a request
/// is outstanding: the request is dropped and the loop exits.
pub async fn run_backend<A: ChatApi>(
    cycle: RequestCycle<A>,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
) {
    info!("Request loop started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            BackendCommand::Ask(utterance) => {
                debug!(len = utterance.len(), "Sending fact-check request");
                let request = cycle.execute(&utterance);
                tokio::pin!(request);

                let outcome = loop {
                    tokio::select! {
                        outcome = &mut request => break Some(outcome),
                        cmd = cmd_rx.recv() => match cmd {
                            Some(BackendCommand::Ask(_)) => {
                                warn!("Request already outstanding, ignoring Ask");
                            }
                            Some(BackendCommand::Quit) | None => break None,
                        },
                    }
                };

                let Some(outcome) = outcome else {
                    info!("Quit while a request was outstanding, dropping it");
                    break;
                };
                if ui_tx.send(UiEvent::Resolved(outcome)).await.is_err() {
                    debug!("UI channel closed, dropping outcome");
                    break;
                }
            }
            BackendCommand::Quit => {
                info!("Received quit command, shutting down request loop");
                break;
            }
        }
    }

    info!("Request loop shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use factcheck_client::{ChatReply, ClientError, CycleOutcome};

    /// Answers every utterance with an echo.
    struct EchoApi;

    #[async_trait]
    impl ChatApi for EchoApi {
        async fn chat(&self, message: &str) -> Result<ChatReply, ClientError> {
            Ok(ChatReply {
                response: format!("echo: {}", message),
                sources: None,
            })
        }
    }

    #[tokio::test]
    async fn test_each_ask_resolves_once() {
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run_backend(RequestCycle::new(EchoApi), ui_tx, cmd_rx));

        cmd_tx.send(BackendCommand::Ask("first".into())).await.unwrap();
        cmd_tx.send(BackendCommand::Ask("second".into())).await.unwrap();
        cmd_tx.send(BackendCommand::Quit).await.unwrap();
        handle.await.unwrap();

        let mut responses = Vec::new();
        while let Ok(UiEvent::Resolved(outcome)) = ui_rx.try_recv() {
            match outcome {
                CycleOutcome::Answered(reply) => responses.push(reply.response),
                CycleOutcome::Failed(kind) => panic!("unexpected failure: {}", kind),
            }
        }
        assert_eq!(responses, vec!["echo: first", "echo: second"]);
    }

    /// Never answers.
    struct StalledApi;

    #[async_trait]
    impl ChatApi for StalledApi {
        async fn chat(&self, _message: &str) -> Result<ChatReply, ClientError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_quit_while_request_outstanding() {
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run_backend(RequestCycle::new(StalledApi), ui_tx, cmd_rx));

        cmd_tx.send(BackendCommand::Ask("q".into())).await.unwrap();
        cmd_tx.send(BackendCommand::Quit).await.unwrap();

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("request loop did not stop on Quit")
            .unwrap();
        assert!(ui_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_command_channel_stops_outstanding_request() {
        let (ui_tx, _ui_rx) = mpsc::channel(8);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run_backend(RequestCycle::new(StalledApi), ui_tx, cmd_rx));

        cmd_tx.send(BackendCommand::Ask("q".into())).await.unwrap();
        drop(cmd_tx);

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("request loop did not stop when the UI went away")
            .unwrap();
    }
}
