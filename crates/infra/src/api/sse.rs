//! Decoder for the chat endpoint's server-sent event body
//!
//! The backend writes one `data: {json}` line per token, followed by a blank
//! line. Network chunks do not respect line boundaries, so bytes are buffered
//! until a full line is available. Frames carry any of `token`, `error` and
//! `done`; lines that are not `data:` frames or do not parse are skipped.

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};
use tracing::debug;
use trak_domain::{ChatEvent, ChatFrame, Result, TrakError};

/// Incremental line decoder
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a `done` frame has been seen
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one chunk and return the events completed by it
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ChatEvent> {
        let mut events = Vec::new();
        if self.done {
            return events;
        }

        self.buffer.extend_from_slice(chunk);
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=end).collect();
            self.decode_line(line.strip_suffix(b"\n").unwrap_or(&line), &mut events);
            if self.done {
                self.buffer.clear();
                break;
            }
        }
        events
    }

    /// Decode whatever is left once the body has closed
    pub fn finish(&mut self) -> Vec<ChatEvent> {
        let mut events = Vec::new();
        if !self.done && !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.decode_line(&line, &mut events);
        }
        self.done = true;
        events
    }

    fn decode_line(&mut self, line: &[u8], events: &mut Vec<ChatEvent>) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let Ok(text) = std::str::from_utf8(line) else {
            debug!("skipping non-UTF-8 chat line");
            return;
        };
        let Some(payload) = text.strip_prefix("data:") else {
            return;
        };

        let frame: ChatFrame = match serde_json::from_str(payload.trim_start()) {
            Ok(frame) => frame,
            Err(err) => {
                debug!(error = %err, "skipping malformed chat frame");
                return;
            }
        };

        if let Some(token) = frame.token.filter(|t| !t.is_empty()) {
            events.push(ChatEvent::Token(token));
        }
        if let Some(error) = frame.error {
            events.push(ChatEvent::Error(error));
        }
        if frame.done == Some(true) {
            self.done = true;
        }
    }
}

struct DecodeState<S> {
    body: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<ChatEvent>,
    closed: bool,
}

/// Turn a byte stream into chat events
///
/// The stream ends after a `done` frame or when the body closes. A transport
/// error is yielded once as `TrakError::Network` and ends the stream.
pub fn chat_events<S, B, E>(body: S) -> impl Stream<Item = Result<ChatEvent>> + Send
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: Display + Send,
{
    let state = DecodeState {
        body: Box::pin(body),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        closed: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.pending.pop_front() {
                return Some((Ok(event), state));
            }
            if state.closed || state.decoder.is_done() {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => state.pending.extend(state.decoder.feed(chunk.as_ref())),
                Some(Err(err)) => {
                    state.closed = true;
                    let err = TrakError::Network(format!("chat stream interrupted: {err}"));
                    return Some((Err(err), state));
                }
                None => {
                    state.closed = true;
                    state.pending.extend(state.decoder.finish());
                }
            }
        }
    })
}
