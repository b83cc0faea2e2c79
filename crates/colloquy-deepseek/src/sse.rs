//! Incremental splitter for `text/event-stream` bodies.
//!
//! Network chunks do not respect event boundaries, so bytes are buffered
//! until a blank line closes an event. Only `data:` fields matter for chat
//! completions; comments (`: keep-alive`) and other fields are skipped.

use crate::error::DeepSeekError;

/// Payload that terminates an OpenAI-style completion stream.
pub(crate) const DONE: &str = "[DONE]";

#[derive(Debug, Default)]
pub(crate) struct SseDecoder {
    buf: Vec<u8>,
}

impl SseDecoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pop the `data` payload of the next complete event, if one is buffered.
    ///
    /// Events without a `data` field are consumed and skipped. Multiple
    /// `data` lines in one event are joined with `\n`.
    pub(crate) fn next_data(&mut self) -> Result<Option<String>, DeepSeekError> {
        while let Some((end, delimiter)) = find_event_end(&self.buf) {
            let frame: Vec<u8> = self.buf.drain(..end + delimiter).collect();
            let frame = std::str::from_utf8(&frame[..end])?;

            let data: Vec<&str> = frame
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .map(|value| value.strip_prefix(' ').unwrap_or(value))
                .collect();

            if !data.is_empty() {
                return Ok(Some(data.join("\n")));
            }
        }
        Ok(None)
    }
}

fn find_event_end(buf: &[u8]) -> Option<(usize, usize)> {
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|pos| (pos, 2));
    let crlf = buf
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| (pos, 4));

    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}
