// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//! Dismissals become async begin/end pairs keyed by card slot, so a card's
//! flight shows up as a span from commit to settling.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted from driver milliseconds to microseconds.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Reload(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Reload",
                    "cat": "Stack",
                    "ts": ms_to_us(e.at_ms),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "total": e.total,
                        "visible": e.visible,
                    }
                }));
            }
            RecordedEvent::Split(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Split",
                    "cat": "Gesture",
                    "ts": ms_to_us(e.at_ms),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "card": e.card,
                    }
                }));
            }
            RecordedEvent::Commit(e) => {
                events.push(json!({
                    "ph": "b",
                    "name": "Dismissal",
                    "cat": "Dismissal",
                    "id": e.card,
                    "ts": ms_to_us(e.at_ms),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "direction": format!("{:?}", e.direction),
                    }
                }));
            }
            RecordedEvent::SnapBack(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "SnapBack",
                    "cat": "Gesture",
                    "ts": ms_to_us(e.at_ms),
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "card": e.card,
                    }
                }));
            }
            RecordedEvent::DismissalSettled(e) => {
                events.push(json!({
                    "ph": "e",
                    "name": "Dismissal",
                    "cat": "Dismissal",
                    "id": e.card,
                    "ts": ms_to_us(e.at_ms),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "replacement": e.replacement,
                    }
                }));
            }
            RecordedEvent::Layout(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Layout",
                    "cat": "Stack",
                    "ts": ms_to_us(e.at_ms),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "width": e.width,
                        "height": e.height,
                    }
                }));
            }
            RecordedEvent::PosesCount { at_ms, count } => {
                events.push(json!({
                    "ph": "i",
                    "name": "Poses",
                    "cat": "Rich",
                    "ts": ms_to_us(at_ms),
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "count": count,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ms_to_us(at_ms: f64) -> f64 {
    at_ms * 1000.0
}
