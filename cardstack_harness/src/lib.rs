// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable sources, stages, and gesture scripts for demo harnesses.
//!
//! [`ReplayRig`] wires a [`StackController`] to a deterministic
//! [`CountingSource`], a [`RecordingDelegate`], and a [`RecordingStage`],
//! then plays scripted pointer sequences through it. Removal flights and
//! snap-back springs are settled synchronously with a synthetic clock, the
//! way a host's animation completions would fire.

#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use cardstack_core::backend::{CardSource, CardStage, StackDelegate};
use cardstack_core::card::{CardId, ContentId};
use cardstack_core::config::{MarginPosition, StackConfig};
use cardstack_core::controller::{Dismissal, StackChanges, StackController};
use cardstack_core::geometry::{CardPose, StageMetrics};
use cardstack_core::gesture::PointerEvent;
use cardstack_core::stack::StackModel;
use cardstack_motion::{REMOVAL_SECONDS, RemovalMotion, SpringCurve};
use kurbo::{Point, Vec2};

/// Synthetic milliseconds the rig's clock advances per scripted move.
pub const FRAME_MS: f64 = 16.0;

/// A deterministic [`CardSource`] over sequentially numbered items.
///
/// Item `i` yields `ContentId(i)`, so tests can read window order straight
/// off the model.
#[derive(Clone, Copy, Debug)]
pub struct CountingSource {
    /// Number of items the source reports.
    pub count: u32,
    /// Margin edge the source requests.
    pub margin: MarginPosition,
    /// Number of `content_at` calls observed.
    pub content_pulls: u32,
}

impl CountingSource {
    /// Creates a source over `count` items with the default top margin.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self {
            count,
            margin: MarginPosition::Top,
            content_pulls: 0,
        }
    }
}

impl CardSource for CountingSource {
    fn item_count(&mut self) -> u32 {
        self.count
    }

    fn content_at(&mut self, index: u32) -> ContentId {
        self.content_pulls += 1;
        ContentId(index)
    }

    fn margin_position(&mut self) -> MarginPosition {
        self.margin
    }
}

/// A [`StackDelegate`] that records removal callbacks in call order.
#[derive(Clone, Debug, Default)]
pub struct RecordingDelegate {
    /// Cards passed to `will_remove`.
    pub will_removed: Vec<CardId>,
    /// Cards passed to `did_remove`.
    pub did_removed: Vec<CardId>,
}

impl StackDelegate for RecordingDelegate {
    fn will_remove(&mut self, card: CardId) {
        self.will_removed.push(card);
    }

    fn did_remove(&mut self, card: CardId) {
        self.did_removed.push(card);
    }
}

/// One pose application as a host view layer would receive it.
#[derive(Clone, Copy, Debug)]
pub struct AppliedPose {
    /// The card whose pose changed.
    pub card: CardId,
    /// The pose read back from the model.
    pub pose: CardPose,
    /// Whether the host should animate to the pose.
    pub animate: bool,
}

/// A [`CardStage`] that records applied changes and queues host work.
///
/// Dismissals and snap-backs are queued rather than animated;
/// [`ReplayRig::settle`] plays their completions back into the controller.
#[derive(Clone, Debug, Default)]
pub struct RecordingStage {
    /// Every pose application, in order.
    pub poses: Vec<AppliedPose>,
    /// Cards whose visuals were created, reload window first.
    pub created: Vec<CardId>,
    /// Cards whose visuals were dropped without completion callbacks.
    pub detached: Vec<CardId>,
    /// Dismissals waiting for their removal flight to finish.
    pub pending_dismissals: Vec<Dismissal>,
    /// Card waiting for its snap-back spring to settle.
    pub pending_snap_back: Option<CardId>,
    /// Cards that split the stack, in order.
    pub splits: Vec<CardId>,
}

impl CardStage for RecordingStage {
    fn apply(&mut self, model: &StackModel, changes: &StackChanges) {
        for change in &changes.poses {
            self.poses.push(AppliedPose {
                card: change.card,
                pose: model.pose(change.card),
                animate: change.animate,
            });
        }
        self.created.extend_from_slice(&changes.added);
        self.created.extend_from_slice(&changes.appended);
        self.detached.extend_from_slice(&changes.detached);
        self.pending_dismissals.extend_from_slice(&changes.dismissals);
        if let Some(card) = changes.split {
            self.splits.push(card);
        }
        if let Some(card) = changes.snap_back {
            self.pending_snap_back = Some(card);
        }
    }
}

/// A scripted pointer sequence.
#[derive(Clone, Debug, Default)]
pub struct SwipeScript {
    /// Events in playback order.
    pub events: Vec<PointerEvent>,
}

impl SwipeScript {
    /// A grab at `local`, `steps` interpolated moves along `delta`, and a
    /// release at the end point.
    #[must_use]
    pub fn swipe(local: Point, start: Point, delta: Vec2, steps: u32) -> Self {
        let mut events = Vec::new();
        events.push(PointerEvent::Down {
            local,
            container: start,
        });
        for step in 1..=steps {
            let t = f64::from(step) / f64::from(steps);
            events.push(PointerEvent::Move {
                container: start + delta * t,
            });
        }
        events.push(PointerEvent::Up {
            container: start + delta,
        });
        Self { events }
    }

    /// The same drag as [`swipe`](Self::swipe), but the pointer is cancelled
    /// without a position instead of released.
    #[must_use]
    pub fn cancelled_swipe(local: Point, start: Point, delta: Vec2, steps: u32) -> Self {
        let mut script = Self::swipe(local, start, delta, steps);
        script.events.pop();
        script.events.push(PointerEvent::Cancel { container: None });
        script
    }

    /// A grab and release with no movement in between.
    #[must_use]
    pub fn press(local: Point, at: Point) -> Self {
        Self {
            events: vec![
                PointerEvent::Down {
                    local,
                    container: at,
                },
                PointerEvent::Up { container: at },
            ],
        }
    }
}

/// A controller wired to recording endpoints, driven by scripts.
#[derive(Debug)]
pub struct ReplayRig {
    /// The controller under test.
    pub controller: StackController,
    /// Deterministic item source.
    pub source: CountingSource,
    /// Recorded delegate callbacks.
    pub delegate: RecordingDelegate,
    /// Recorded stage applications.
    pub stage: RecordingStage,
    /// Synthetic clock in milliseconds.
    pub now_ms: f64,
    /// Offscreen center-x of each settled flight, in order.
    pub flight_targets: Vec<f64>,
    scratch: StackChanges,
}

impl ReplayRig {
    /// Creates a rig over `item_count` sequential items.
    #[must_use]
    pub fn new(config: StackConfig, metrics: StageMetrics, item_count: u32) -> Self {
        Self {
            controller: StackController::new(config, metrics),
            source: CountingSource::new(item_count),
            delegate: RecordingDelegate::default(),
            stage: RecordingStage::default(),
            now_ms: 0.0,
            flight_targets: Vec::new(),
            scratch: StackChanges::default(),
        }
    }

    /// Reloads the controller from the source and applies the changes.
    pub fn reload(&mut self) {
        let changes = self.controller.reload(&mut self.source);
        self.stage.apply(self.controller.model(), &changes);
    }

    /// Plays a script without settling queued flights or springs.
    pub fn play(&mut self, script: &SwipeScript) {
        for event in &script.events {
            if matches!(event, PointerEvent::Move { .. }) {
                self.now_ms += FRAME_MS;
            }
            self.controller.pointer_into(*event, &mut self.delegate, &mut self.scratch);
            self.stage.apply(self.controller.model(), &self.scratch);
        }
    }

    /// Settles queued removal flights, then any pending snap-back.
    pub fn settle(&mut self) {
        let pending = core::mem::take(&mut self.stage.pending_dismissals);
        for dismissal in pending {
            self.finish_flight(dismissal);
        }
        if self.stage.pending_snap_back.take().is_some() {
            self.now_ms += SpringCurve::SNAP_BACK.settling_seconds(1e-3) * 1000.0;
            self.controller.snap_back_finished();
        }
    }

    /// Plays a script and settles everything it queued.
    pub fn run(&mut self, script: &SwipeScript) {
        self.play(script);
        self.settle();
    }

    fn finish_flight(&mut self, dismissal: Dismissal) {
        let metrics = self.controller.metrics();
        let pose = self.controller.model().pose(dismissal.card);
        let start = metrics.container.width / 2.0 + pose.translation.x;
        let motion = RemovalMotion::new(dismissal.direction, metrics.container.width, start);
        self.flight_targets.push(motion.center_x(REMOVAL_SECONDS));
        self.now_ms += REMOVAL_SECONDS * 1000.0;
        let changes =
            self.controller.removal_finished(dismissal.card, &mut self.source, &mut self.delegate);
        self.stage.apply(self.controller.model(), &changes);
    }
}
