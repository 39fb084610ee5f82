// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for stack interactions.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! interaction drivers call as the stack changes. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Events carry no clock of their own: the driver stamps each one with
//! `at_ms`, milliseconds since an origin of its choosing. Cards appear as
//! raw slot indices (via [`CardId::index`](crate::card::CardId::index)) so
//! events stay plain data.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`CardPoseEvent`] plus the
//!   corresponding `TraceSink` method. Poses fire on every pointer move.

use crate::gesture::RemoveDirection;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after the stack reloads from its data source.
#[derive(Clone, Copy, Debug)]
pub struct ReloadEvent {
    /// Driver timestamp in milliseconds.
    pub at_ms: f64,
    /// Virtual items the source reported.
    pub total: u32,
    /// Cards pulled into the visible window.
    pub visible: u32,
}

/// Emitted when a drag crosses the split distance.
#[derive(Clone, Copy, Debug)]
pub struct SplitEvent {
    /// Driver timestamp in milliseconds.
    pub at_ms: f64,
    /// Raw slot index of the dragged card.
    pub card: u32,
}

/// Emitted when a release commits the front card off the stack.
#[derive(Clone, Copy, Debug)]
pub struct CommitEvent {
    /// Driver timestamp in milliseconds.
    pub at_ms: f64,
    /// Raw slot index of the departing card.
    pub card: u32,
    /// The side the card leaves on.
    pub direction: RemoveDirection,
}

/// Emitted when a release falls short and the stack springs back.
#[derive(Clone, Copy, Debug)]
pub struct SnapBackEvent {
    /// Driver timestamp in milliseconds.
    pub at_ms: f64,
    /// Raw slot index of the front card.
    pub card: u32,
}

/// Emitted when a dismissed card's flight settles.
#[derive(Clone, Copy, Debug)]
pub struct DismissalSettledEvent {
    /// Driver timestamp in milliseconds.
    pub at_ms: f64,
    /// Raw slot index of the freed card.
    pub card: u32,
    /// Raw slot index of the appended replacement, if the source had one.
    pub replacement: Option<u32>,
}

/// Emitted when the stage is laid out against new metrics.
#[derive(Clone, Copy, Debug)]
pub struct LayoutEvent {
    /// Driver timestamp in milliseconds.
    pub at_ms: f64,
    /// Container width in stage units.
    pub width: f64,
    /// Container height in stage units.
    pub height: f64,
}

/// A pose applied to one card (requires `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct CardPoseEvent {
    /// Raw slot index of the card.
    pub card: u32,
    /// Stack depth the pose was computed for.
    pub index: u32,
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Whether the host was asked to animate.
    pub animated: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from an interaction driver.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after the stack reloads.
    fn on_reload(&mut self, e: &ReloadEvent) {
        _ = e;
    }

    /// Called when a drag splits the stack.
    fn on_split(&mut self, e: &SplitEvent) {
        _ = e;
    }

    /// Called when a release commits a removal.
    fn on_commit(&mut self, e: &CommitEvent) {
        _ = e;
    }

    /// Called when a release snaps the stack back.
    fn on_snap_back(&mut self, e: &SnapBackEvent) {
        _ = e;
    }

    /// Called when a dismissed card's flight settles.
    fn on_dismissal_settled(&mut self, e: &DismissalSettledEvent) {
        _ = e;
    }

    /// Called when the stage is laid out.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called with the poses one operation applied (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_poses(&mut self, at_ms: f64, poses: &[CardPoseEvent]) {
        _ = (at_ms, poses);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ReloadEvent`].
    #[inline]
    pub fn reload(&mut self, e: &ReloadEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reload(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SplitEvent`].
    #[inline]
    pub fn split(&mut self, e: &SplitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_split(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CommitEvent`].
    #[inline]
    pub fn commit(&mut self, e: &CommitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_commit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SnapBackEvent`].
    #[inline]
    pub fn snap_back(&mut self, e: &SnapBackEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_snap_back(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DismissalSettledEvent`].
    #[inline]
    pub fn dismissal_settled(&mut self, e: &DismissalSettledEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dismissal_settled(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayoutEvent`].
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits applied poses (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn poses(&mut self, at_ms: f64, poses: &[CardPoseEvent]) {
        if let Some(s) = &mut self.sink {
            s.on_poses(at_ms, poses);
        }
    }
}
