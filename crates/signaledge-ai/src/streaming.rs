//! Server-Sent Events (SSE) streaming parser.
//!
//! Gemini streams `streamGenerateContent?alt=sse` responses as SSE.
//! [`SseDecoder`] turns lines into events; [`parse_sse_stream`] feeds it
//! from a reqwest response.

use futures_util::StreamExt;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The event type, if the server named one.
    pub event: Option<String>,
    /// The event data (JSON string).
    pub data: String,
}

/// Line-oriented SSE decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    current_event: Option<String>,
    current_data: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without its terminator). Returns an event when the
    /// line completes one.
    pub fn push_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            // Empty line = end of event
            let event = self.take();
            self.current_event = None;
            return event;
        }

        if let Some(event_type) = line.strip_prefix("event:") {
            self.current_event = Some(event_type.trim_start().to_string());
        } else if let Some(data) = line.strip_prefix("data:") {
            if !self.current_data.is_empty() {
                self.current_data.push('\n');
            }
            self.current_data.push_str(data.strip_prefix(' ').unwrap_or(data));
        }
        // Ignore other fields (id:, retry:, comments)
        None
    }

    /// Flush any event left without a trailing blank line.
    pub fn finish(mut self) -> Option<SseEvent> {
        self.take()
    }

    fn take(&mut self) -> Option<SseEvent> {
        if self.current_data.is_empty() {
            return None;
        }
        Some(SseEvent {
            event: self.current_event.take(),
            data: std::mem::take(&mut self.current_data),
        })
    }
}

/// Parse an SSE stream from a reqwest response, calling `on_event` for each event.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    mut on_event: impl FnMut(SseEvent),
) -> Result<(), crate::AiError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    let mut lines = reader.lines();
    let mut decoder = SseDecoder::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| crate::AiError::NetworkError(e.to_string()))?
    {
        if let Some(event) = decoder.push_line(line.trim_end_matches('\r')) {
            on_event(event);
        }
    }

    if let Some(event) = decoder.finish() {
        on_event(event);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &str) -> Vec<SseEvent> {
        let mut decoder = SseDecoder::new();
        let mut events: Vec<SseEvent> = input.lines().filter_map(|l| decoder.push_line(l)).collect();
        events.extend(decoder.finish());
        events
    }

    #[test]
    fn decodes_data_events() {
        let events = decode("data: {\"a\":1}\n\ndata: {\"a\":2}\n\n");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data, "{\"a\":1}");
        assert_eq!(events[1].data, "{\"a\":2}");
        assert!(events[0].event.is_none());
    }

    #[test]
    fn joins_multiline_data_and_keeps_event_type() {
        let events = decode("event: chunk\ndata: line one\ndata: line two\n\n");
        assert_eq!(
            events,
            vec![SseEvent {
                event: Some("chunk".into()),
                data: "line one\nline two".into(),
            }]
        );
    }

    #[test]
    fn ignores_comments_and_other_fields() {
        let events = decode(": keep-alive\nid: 7\nretry: 100\ndata: x\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "x");
    }

    #[test]
    fn flushes_trailing_event_without_blank_line() {
        let events = decode("data: tail");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "tail");
    }

    #[test]
    fn blank_lines_alone_emit_nothing() {
        assert!(decode("\n\n\n").is_empty());
    }
}
