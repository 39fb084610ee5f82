// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are the driver's milliseconds, printed as-is.

use std::io::Write;

use cardstack_core::gesture::RemoveDirection;
use cardstack_core::trace::{
    CardPoseEvent, CommitEvent, DismissalSettledEvent, LayoutEvent, ReloadEvent, SnapBackEvent,
    SplitEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn direction_name(direction: RemoveDirection) -> &'static str {
    match direction {
        RemoveDirection::Left => "left",
        RemoveDirection::Right => "right",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_reload(&mut self, e: &ReloadEvent) {
        let _ = writeln!(
            self.writer,
            "[reload] total={} visible={} at {:.1}ms",
            e.total, e.visible, e.at_ms,
        );
    }

    fn on_split(&mut self, e: &SplitEvent) {
        let _ = writeln!(self.writer, "[split] card={} at {:.1}ms", e.card, e.at_ms);
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        let _ = writeln!(
            self.writer,
            "[commit] card={} dir={} at {:.1}ms",
            e.card,
            direction_name(e.direction),
            e.at_ms,
        );
    }

    fn on_snap_back(&mut self, e: &SnapBackEvent) {
        let _ = writeln!(
            self.writer,
            "[snapback] card={} at {:.1}ms",
            e.card, e.at_ms,
        );
    }

    fn on_dismissal_settled(&mut self, e: &DismissalSettledEvent) {
        match e.replacement {
            Some(slot) => {
                let _ = writeln!(
                    self.writer,
                    "[settled] card={} replacement={slot} at {:.1}ms",
                    e.card, e.at_ms,
                );
            }
            None => {
                let _ = writeln!(
                    self.writer,
                    "[settled] card={} replacement=none at {:.1}ms",
                    e.card, e.at_ms,
                );
            }
        }
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] stage={}x{} at {:.1}ms",
            e.width, e.height, e.at_ms,
        );
    }

    fn on_poses(&mut self, at_ms: f64, poses: &[CardPoseEvent]) {
        let _ = writeln!(self.writer, "[poses] count={} at {at_ms:.1}ms", poses.len());
    }
}
