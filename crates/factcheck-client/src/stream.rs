//! Incremental decoder for the `data: {json}` event stream.

use crate::error::ClientError;
use crate::wire::StreamEvent;

/// Splits a byte stream into events separated by a blank line.
///
/// Bytes are buffered until a frame is complete, so chunk boundaries may
/// fall anywhere, including inside a UTF-8 sequence.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every event completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<StreamEvent, ClientError>> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(end) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(event) = parse_frame(&frame[..end]) {
                events.push(event);
            }
        }
        events
    }

    /// Flush a trailing frame that was not terminated by a blank line.
    pub fn finish(&mut self) -> Option<Result<StreamEvent, ClientError>> {
        let frame = std::mem::take(&mut self.buffer);
        parse_frame(&frame)
    }
}

fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

/// Parse one frame; frames without `data:` lines are skipped.
fn parse_frame(frame: &[u8]) -> Option<Result<StreamEvent, ClientError>> {
    let text = match std::str::from_utf8(frame) {
        Ok(text) => text,
        Err(e) => return Some(Err(ClientError::MalformedPayload(e.to_string()))),
    };

    let data: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|payload| payload.strip_prefix(' ').unwrap_or(payload))
        .collect();

    if data.is_empty() {
        return None;
    }

    let payload = data.join("\n");
    Some(
        serde_json::from_str(&payload)
            .map_err(|e| ClientError::MalformedPayload(format!("{}: {}", e, payload))),
    )
}
