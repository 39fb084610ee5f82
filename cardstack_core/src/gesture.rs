// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture state machine for the front card.
//!
//! The controller feeds [`PointerEvent`]s in; the machine tracks one pointer
//! from touch to release and answers two questions per move: where is the
//! drag, and should followers animate or track immediately. Release resolves
//! to either a committed removal or a snap back.

use kurbo::{Point, Vec2};

/// Tilt bias swept across the card width at the grab point, in radians.
const GRAB_TILT_SPAN: f64 = 4.0;

/// Manhattan drag distance over which the full tilt bias develops.
const TILT_RAMP: f64 = 1000.0;

/// A pointer event forwarded by the host.
///
/// `local` positions are relative to the front card's top-left corner,
/// `container` positions to the stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer touched the front card.
    Down {
        /// Grab point in card coordinates.
        local: Point,
        /// Pointer position in stage coordinates.
        container: Point,
    },
    /// The pointer moved while held.
    Move {
        /// Pointer position in stage coordinates.
        container: Point,
    },
    /// The pointer lifted.
    Up {
        /// Pointer position in stage coordinates.
        container: Point,
    },
    /// The system cancelled the gesture.
    Cancel {
        /// The last position the host saw, if it has one.
        container: Option<Point>,
    },
}

/// Which side the front card leaves the stage on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemoveDirection {
    /// Off the left edge.
    Left,
    /// Off the right edge.
    Right,
}

impl RemoveDirection {
    /// Direction implied by a drag's horizontal offset.
    ///
    /// A purely vertical drag commits to the right.
    #[inline]
    #[must_use]
    pub fn from_offset(moved_x: f64) -> Self {
        if moved_x < 0.0 { Self::Left } else { Self::Right }
    }
}

/// What a released drag resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The drag travelled past the split distance; the front card commits.
    Commit(RemoveDirection),
    /// The drag fell short; the stack springs back to rest.
    SnapBack,
}

/// One processed move of an active drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveSample {
    /// Pointer offset from the grab point.
    pub offset: Vec2,
    /// Euclidean drag distance.
    pub distance: f64,
    /// Tilt of the front card, in radians.
    pub angle: f64,
    /// Whether this move pushed the drag past the split distance.
    pub entered_split: bool,
    /// Whether followers should animate toward their new poses.
    pub animate_followers: bool,
}

/// State machine for dragging the front card.
///
/// The tilt bias is fixed where the card was grabbed: grabbing near an edge
/// tilts more, and the tilt grows with drag distance. Crossing the split
/// distance latches the stack as split. The latch survives a short release,
/// keeping followers mirrored through the snap back, and clears when the
/// host reports the spring settled.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragGesture {
    origin: Point,
    tilt_bias: f64,
    armed: bool,
    dragging: bool,
    split: bool,
}

impl DragGesture {
    /// Starts tracking a pointer that grabbed the front card at `local`, in
    /// card coordinates, while at `container` in stage coordinates.
    pub fn begin(&mut self, local: Point, card_width: f64, container: Point) {
        self.origin = container;
        self.tilt_bias = (local.x - card_width / 2.0) / card_width * GRAB_TILT_SPAN;
        self.armed = true;
        self.dragging = false;
    }

    /// Processes a pointer move.
    ///
    /// Returns `None` when no drag is active.
    pub fn movement(&mut self, container: Point, split_distance: f64) -> Option<MoveSample> {
        if !self.armed {
            return None;
        }
        let offset = container - self.origin;
        let distance = offset.hypot();
        let angle = self.tilt_bias * (offset.x.abs() + offset.y.abs()) / TILT_RAMP;

        let entered_split = !self.split && distance > split_distance;
        if entered_split {
            self.split = true;
        }

        // The first move of a drag animates followers into place; after
        // that they track immediately. A split stack always animates.
        let animate_followers = self.split || !self.dragging;
        self.dragging = true;

        Some(MoveSample {
            offset,
            distance,
            angle,
            entered_split,
            animate_followers,
        })
    }

    /// Resolves a pointer release.
    ///
    /// Returns `None` when no drag is active.
    pub fn release(&mut self, container: Point, split_distance: f64) -> Option<ReleaseOutcome> {
        if !self.armed {
            return None;
        }
        self.armed = false;
        self.dragging = false;

        let offset = container - self.origin;
        let outcome = if offset.hypot() > split_distance {
            // The next front card starts from an unsplit stack.
            self.split = false;
            ReleaseOutcome::Commit(RemoveDirection::from_offset(offset.x))
        } else {
            ReleaseOutcome::SnapBack
        };
        Some(outcome)
    }

    /// Resolves a cancelled gesture.
    ///
    /// With a last known position this behaves like a release; without one
    /// the stack snaps back.
    pub fn cancel(
        &mut self,
        container: Option<Point>,
        split_distance: f64,
    ) -> Option<ReleaseOutcome> {
        match container {
            Some(point) => self.release(point, split_distance),
            None => {
                if !self.armed {
                    return None;
                }
                self.armed = false;
                self.dragging = false;
                Some(ReleaseOutcome::SnapBack)
            }
        }
    }

    /// Clears the split latch once the snap-back spring has settled.
    pub fn settle_snap_back(&mut self) {
        self.split = false;
    }

    /// Whether a pointer is currently held on the front card.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether the active drag has produced at least one move.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the stack is split.
    #[must_use]
    pub fn is_split(&self) -> bool {
        self.split
    }
}
