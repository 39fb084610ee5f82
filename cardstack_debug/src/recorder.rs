// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! The rich pose event ([`on_poses`](TraceSink::on_poses)) stores only the
//! count.

use cardstack_core::gesture::RemoveDirection;
use cardstack_core::trace::{
    CardPoseEvent, CommitEvent, DismissalSettledEvent, LayoutEvent, ReloadEvent, SnapBackEvent,
    SplitEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_RELOAD: u8 = 1;
const TAG_SPLIT: u8 = 2;
const TAG_COMMIT: u8 = 3;
const TAG_SNAP_BACK: u8 = 4;
const TAG_DISMISSAL_SETTLED: u8 = 5;
const TAG_LAYOUT: u8 = 6;
const TAG_POSES_COUNT: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_bits().to_le_bytes());
    }

    fn write_option_u32(&mut self, v: Option<u32>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u32(val);
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
            }
        }
    }

    fn write_direction(&mut self, d: RemoveDirection) {
        self.write_u8(match d {
            RemoveDirection::Left => 0,
            RemoveDirection::Right => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_reload(&mut self, e: &ReloadEvent) {
        self.write_u8(TAG_RELOAD);
        self.write_f64(e.at_ms);
        self.write_u32(e.total);
        self.write_u32(e.visible);
    }

    fn on_split(&mut self, e: &SplitEvent) {
        self.write_u8(TAG_SPLIT);
        self.write_f64(e.at_ms);
        self.write_u32(e.card);
    }

    fn on_commit(&mut self, e: &CommitEvent) {
        self.write_u8(TAG_COMMIT);
        self.write_f64(e.at_ms);
        self.write_u32(e.card);
        self.write_direction(e.direction);
    }

    fn on_snap_back(&mut self, e: &SnapBackEvent) {
        self.write_u8(TAG_SNAP_BACK);
        self.write_f64(e.at_ms);
        self.write_u32(e.card);
    }

    fn on_dismissal_settled(&mut self, e: &DismissalSettledEvent) {
        self.write_u8(TAG_DISMISSAL_SETTLED);
        self.write_f64(e.at_ms);
        self.write_u32(e.card);
        self.write_option_u32(e.replacement);
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.write_u8(TAG_LAYOUT);
        self.write_f64(e.at_ms);
        self.write_f64(e.width);
        self.write_f64(e.height);
    }

    fn on_poses(&mut self, at_ms: f64, poses: &[CardPoseEvent]) {
        self.write_u8(TAG_POSES_COUNT);
        self.write_f64(at_ms);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "pose count capped at u32::MAX for recording"
        )]
        self.write_u32(poses.len().min(u32::MAX as usize) as u32);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`ReloadEvent`].
    Reload(ReloadEvent),
    /// A [`SplitEvent`].
    Split(SplitEvent),
    /// A [`CommitEvent`].
    Commit(CommitEvent),
    /// A [`SnapBackEvent`].
    SnapBack(SnapBackEvent),
    /// A [`DismissalSettledEvent`].
    DismissalSettled(DismissalSettledEvent),
    /// A [`LayoutEvent`].
    Layout(LayoutEvent),
    /// Pose count for one applied operation.
    PosesCount {
        /// Driver timestamp in milliseconds.
        at_ms: f64,
        /// Number of poses applied.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        if self.remaining() < 8 {
            return None;
        }
        let bits = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(f64::from_bits(bits))
    }

    fn read_option_u32(&mut self) -> Option<Option<u32>> {
        let present = self.read_u8()?;
        let val = self.read_u32()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_direction(&mut self) -> Option<RemoveDirection> {
        Some(match self.read_u8()? {
            0 => RemoveDirection::Left,
            _ => RemoveDirection::Right,
        })
    }

    fn decode_reload(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reload(ReloadEvent {
            at_ms: self.read_f64()?,
            total: self.read_u32()?,
            visible: self.read_u32()?,
        }))
    }

    fn decode_split(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Split(SplitEvent {
            at_ms: self.read_f64()?,
            card: self.read_u32()?,
        }))
    }

    fn decode_commit(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Commit(CommitEvent {
            at_ms: self.read_f64()?,
            card: self.read_u32()?,
            direction: self.read_direction()?,
        }))
    }

    fn decode_snap_back(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SnapBack(SnapBackEvent {
            at_ms: self.read_f64()?,
            card: self.read_u32()?,
        }))
    }

    fn decode_dismissal_settled(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DismissalSettled(DismissalSettledEvent {
            at_ms: self.read_f64()?,
            card: self.read_u32()?,
            replacement: self.read_option_u32()?,
        }))
    }

    fn decode_layout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Layout(LayoutEvent {
            at_ms: self.read_f64()?,
            width: self.read_f64()?,
            height: self.read_f64()?,
        }))
    }

    fn decode_poses_count(&mut self) -> Option<RecordedEvent> {
        let at_ms = self.read_f64()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::PosesCount { at_ms, count })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_RELOAD => self.decode_reload(),
            TAG_SPLIT => self.decode_split(),
            TAG_COMMIT => self.decode_commit(),
            TAG_SNAP_BACK => self.decode_snap_back(),
            TAG_DISMISSAL_SETTLED => self.decode_dismissal_settled(),
            TAG_LAYOUT => self.decode_layout(),
            TAG_POSES_COUNT => self.decode_poses_count(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reload() -> ReloadEvent {
        ReloadEvent {
            at_ms: 0.0,
            total: 20,
            visible: 3,
        }
    }

    fn sample_commit() -> CommitEvent {
        CommitEvent {
            at_ms: 96.5,
            card: 0,
            direction: RemoveDirection::Left,
        }
    }

    #[test]
    fn round_trip_reload() {
        let mut rec = RecorderSink::new();
        let orig = sample_reload();
        rec.on_reload(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Reload(e) => {
                assert_eq!(e.at_ms, orig.at_ms);
                assert_eq!(e.total, orig.total);
                assert_eq!(e.visible, orig.visible);
            }
            other => panic!("expected Reload, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_split_and_snap_back() {
        let mut rec = RecorderSink::new();
        rec.on_split(&SplitEvent {
            at_ms: 48.0,
            card: 2,
        });
        rec.on_snap_back(&SnapBackEvent {
            at_ms: 80.0,
            card: 2,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::Split(e) => {
                assert_eq!(e.at_ms, 48.0);
                assert_eq!(e.card, 2);
            }
            other => panic!("expected Split, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::SnapBack(e) => {
                assert_eq!(e.at_ms, 80.0);
                assert_eq!(e.card, 2);
            }
            other => panic!("expected SnapBack, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_commit() {
        let mut rec = RecorderSink::new();
        let orig = sample_commit();
        rec.on_commit(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Commit(e) => {
                assert_eq!(e.at_ms, orig.at_ms);
                assert_eq!(e.card, orig.card);
                assert_eq!(e.direction, orig.direction);
            }
            other => panic!("expected Commit, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_dismissal_settled() {
        let mut rec = RecorderSink::new();
        rec.on_dismissal_settled(&DismissalSettledEvent {
            at_ms: 296.0,
            card: 0,
            replacement: Some(3),
        });
        rec.on_dismissal_settled(&DismissalSettledEvent {
            at_ms: 512.0,
            card: 1,
            replacement: None,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::DismissalSettled(e) => {
                assert_eq!(e.card, 0);
                assert_eq!(e.replacement, Some(3));
            }
            other => panic!("expected DismissalSettled, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::DismissalSettled(e) => {
                assert_eq!(e.card, 1);
                assert_eq!(e.replacement, None);
            }
            other => panic!("expected DismissalSettled, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_layout() {
        let mut rec = RecorderSink::new();
        rec.on_layout(&LayoutEvent {
            at_ms: 16.0,
            width: 320.0,
            height: 480.0,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Layout(e) => {
                assert_eq!(e.width, 320.0);
                assert_eq!(e.height, 480.0);
            }
            other => panic!("expected Layout, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_multiple_events() {
        let mut rec = RecorderSink::new();
        rec.on_reload(&sample_reload());
        rec.on_split(&SplitEvent {
            at_ms: 48.0,
            card: 0,
        });
        rec.on_commit(&sample_commit());
        rec.on_dismissal_settled(&DismissalSettledEvent {
            at_ms: 296.0,
            card: 0,
            replacement: Some(3),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], RecordedEvent::Reload(_)));
        assert!(matches!(events[1], RecordedEvent::Split(_)));
        assert!(matches!(events[2], RecordedEvent::Commit(_)));
        assert!(matches!(events[3], RecordedEvent::DismissalSettled(_)));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_reload(&sample_reload());
        let bytes = rec.into_bytes();

        // Drop the final field; the partial record must not decode.
        let events: Vec<_> = decode(&bytes[..bytes.len() - 2]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn poses_count() {
        let mut rec = RecorderSink::new();
        let poses = vec![
            CardPoseEvent {
                card: 0,
                index: 0,
                x: 40.0,
                y: -12.0,
                scale: 1.0,
                rotation: 0.1,
                animated: false,
            },
            CardPoseEvent {
                card: 1,
                index: 1,
                x: 8.0,
                y: -36.0,
                scale: 0.866,
                rotation: 0.0,
                animated: true,
            },
        ];
        rec.on_poses(32.0, &poses);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::PosesCount { at_ms, count } => {
                assert_eq!(*at_ms, 32.0);
                assert_eq!(*count, 2);
            }
            other => panic!("expected PosesCount, got {other:?}"),
        }
    }
}
