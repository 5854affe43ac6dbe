//! Client-side helpers for consuming the payment stream.
//!
//! `SseDecoder` turns raw body chunks into [`PaymentEvent`]s; `SessionStats`
//! keeps the counters the stream subscriber prints when it stops.

use crate::domain::payment::{EventType, PaymentEvent};
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Largest frame the decoder will hold while waiting for its terminator.
pub const MAX_FRAME_BYTES: usize = 1024 * 1024;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("frame is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("frame data is not a payment event: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame exceeds {limit} bytes without a terminator")]
    FrameTooLarge { limit: usize },
}

/// Incremental decoder for a `text/event-stream` body carrying JSON `PaymentEvent`s.
///
/// Bytes are buffered raw and only complete frames are decoded, so a chunk
/// boundary may fall anywhere, including inside a multi-byte character.
#[derive(Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    /// Set after an oversized frame was dropped; bytes are discarded up to the
    /// next frame terminator.
    skipping: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one body chunk and returns every event completed by it.
    ///
    /// Comment-only frames (keep-alives) are skipped. A frame that is not UTF-8,
    /// or whose `data` is not a valid `PaymentEvent`, yields an error for that
    /// frame only.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<PaymentEvent, DecodeError>> {
        // CR never appears inside a JSON payload or a UTF-8 sequence, so
        // dropping it folds CRLF line endings into LF even across chunks.
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut events = Vec::new();
        while let Some(end) = find_terminator(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if self.skipping {
                self.skipping = false;
                continue;
            }
            match std::str::from_utf8(&frame) {
                Ok(frame) => {
                    if let Some(data) = frame_data(frame) {
                        let event = serde_json::from_str::<PaymentEvent>(&data);
                        events.push(event.map_err(Into::into));
                    }
                }
                Err(e) => events.push(Err(e.into())),
            }
        }

        if self.buffer.len() > MAX_FRAME_BYTES {
            // Keep a trailing LF: it may be the first half of the terminator.
            let keep = usize::from(self.buffer.last() == Some(&b'\n'));
            self.buffer.drain(..self.buffer.len() - keep);
            if !self.skipping {
                self.skipping = true;
                events.push(Err(DecodeError::FrameTooLarge {
                    limit: MAX_FRAME_BYTES,
                }));
            }
        }
        events
    }
}

fn find_terminator(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

/// Concatenated `data:` lines of one frame, or `None` if the frame has none.
fn frame_data(frame: &str) -> Option<String> {
    let mut data: Option<String> = None;
    for line in frame.lines() {
        if let Some(rest) = line.strip_prefix("data:") {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            match data.as_mut() {
                Some(d) => {
                    d.push('\n');
                    d.push_str(rest);
                }
                None => data = Some(rest.to_string()),
            }
        }
    }
    data
}

pub struct SessionStats {
    pub existing: u64,
    pub new: u64,
    pub total: u64,
    started: Instant,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            existing: 0,
            new: 0,
            total: 0,
            started: Instant::now(),
        }
    }
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &PaymentEvent) {
        self.total += 1;
        if event.event_type == EventType::New {
            self.new += 1;
        } else {
            self.existing += 1;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session stats:")?;
        writeln!(f, "  Total payments: {}", self.total)?;
        writeln!(f, "  Existing:       {}", self.existing)?;
        writeln!(f, "  New:            {}", self.new)?;
        write!(f, "  Duration:       {:.1}s", self.elapsed().as_secs_f64())
    }
}

/// One-line rendering of an event.
pub fn format_event(event: &PaymentEvent) -> String {
    let p = &event.payment;
    format!(
        "[{}] {} {} {:.2} {} {} {}",
        event.event_type, p.id, p.provider, p.amount, p.currency, p.status, p.customer_email
    )
}
