/*!
 * Streaming workflow-output extraction.
 *
 * The workflow service answers in an SSE-like framing: newline-delimited
 * records, `event: <token>` lines, `data: <json>` lines and blank
 * separators. This module consumes the raw byte stream chunk by chunk,
 * reassembles records across arbitrary chunk boundaries (a boundary may
 * fall inside a multi-byte character) and captures the `outputs` payload
 * of the last `workflow_finished` event seen before the stream ends.
 */

use std::error::Error as StdError;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use log::{debug, warn};
use serde_json::Value;

use crate::errors::ExtractError;

/// Event kind that carries the terminal workflow payload
pub const WORKFLOW_FINISHED_EVENT: &str = "workflow_finished";

/// Classification of one logical line of the incoming stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamRecord<'a> {
    /// Record separator
    Blank,
    /// `event: <token>` line, carries no payload
    Comment(&'a str),
    /// `data: <json>` line
    Data(&'a str),
    /// Anything else
    Unknown(&'a str),
}

impl<'a> StreamRecord<'a> {
    /// Classify a line after trimming surrounding whitespace (including `\r`)
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Self::Blank
        } else if let Some(event_type) = trimmed.strip_prefix("event: ") {
            Self::Comment(event_type.trim())
        } else if let Some(json) = trimmed.strip_prefix("data: ") {
            Self::Data(json)
        } else {
            Self::Unknown(trimmed)
        }
    }
}

/// Incremental UTF-8 decoder that keeps partial trailing sequences between chunks
#[derive(Debug, Default)]
struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every fully decodable character into `out`.
    /// An incomplete trailing sequence is retained for the next chunk,
    /// invalid bytes decode to U+FFFD.
    fn decode(&mut self, chunk: &[u8], out: &mut String) {
        self.pending.extend_from_slice(chunk);
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    out.push_str(valid);
                    self.pending.clear();
                    return;
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    out.push_str(
                        std::str::from_utf8(&self.pending[..valid_up_to]).unwrap_or_default(),
                    );
                    match err.error_len() {
                        Some(invalid_len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid_up_to + invalid_len);
                        }
                        None => {
                            // Partial character at the end of the chunk
                            self.pending.drain(..valid_up_to);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Flush at end of stream; a dangling partial character becomes U+FFFD
    fn flush(&mut self, out: &mut String) {
        if !self.pending.is_empty() {
            out.push(char::REPLACEMENT_CHARACTER);
            self.pending.clear();
        }
    }
}

/// Consume an SSE-style byte stream and return the `outputs` object of the
/// last `workflow_finished` event, or `None` if the stream ends without one.
///
/// Malformed individual records are logged and skipped; only a transport
/// failure aborts the walk.
pub async fn extract_workflow_outputs<S, E>(mut stream: S) -> Result<Option<Value>, ExtractError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: StdError + Send + Sync + 'static,
{
    let mut decoder = Utf8StreamDecoder::new();
    let mut buffer = String::new();
    let mut finished_outputs: Option<Value> = None;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| ExtractError::Transport(err.to_string()))?;
        decoder.decode(&chunk, &mut buffer);

        // Process every complete line, leave the remainder for the next chunk
        while let Some(newline_index) = buffer.find('\n') {
            let line: String = buffer.drain(..=newline_index).collect();
            if let Some(outputs) = process_line(&line) {
                finished_outputs = Some(outputs);
            }
        }
    }

    decoder.flush(&mut buffer);
    if !buffer.is_empty() {
        // No guarantee the stream ends with a newline, take the tail as a line
        debug!("Stream ended with an unterminated line: {}", buffer);
        if let Some(outputs) = process_line(&buffer) {
            finished_outputs = Some(outputs);
        }
    }

    Ok(finished_outputs)
}

/// Process one line of the stream, returning the captured outputs when the
/// line is a `workflow_finished` data record
fn process_line(line: &str) -> Option<Value> {
    match StreamRecord::classify(line) {
        StreamRecord::Blank => None,
        StreamRecord::Comment(event_type) => {
            debug!("Received SSE event type: {}", event_type);
            None
        }
        StreamRecord::Data(json) => match serde_json::from_str::<Value>(json) {
            Ok(event) => {
                let kind = event.get("event").and_then(Value::as_str);
                if kind == Some(WORKFLOW_FINISHED_EVENT) {
                    debug!("Workflow finished event detected in data payload");
                    // A finished event without outputs carries no payload
                    event.get("data").and_then(|data| data.get("outputs")).cloned()
                } else {
                    debug!("Received data event type: {}", kind.unwrap_or("unknown"));
                    None
                }
            }
            Err(err) => {
                warn!("Failed to parse JSON from data line: {} ({})", json, err);
                None
            }
        },
        StreamRecord::Unknown(other) => {
            warn!("Skipping unknown line type: {}", other);
            None
        }
    }
}
