// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stack controller: the single writer of stack state.
//!
//! Hosts construct a [`StackController`], feed it reloads, pointer events,
//! layout updates, and animation completions, and present each returned
//! [`StackChanges`]. The controller owns the model, the gesture machine,
//! and the removal lock; hosts own visuals and timing.

use alloc::vec::Vec;

use crate::backend::{CardSource, StackDelegate};
use crate::card::CardId;
use crate::config::StackConfig;
use crate::geometry::{DragSample, StageMetrics, card_pose};
use crate::gesture::{DragGesture, PointerEvent, ReleaseOutcome, RemoveDirection};
use crate::stack::StackModel;

/// A pose write for one card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseChange {
    /// The card that moved.
    pub card: CardId,
    /// Whether the host should animate to the stored pose or jump.
    pub animate: bool,
}

/// One committed removal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dismissal {
    /// The card leaving the stage.
    pub card: CardId,
    /// The side it leaves on.
    pub direction: RemoveDirection,
}

/// Everything one controller operation asks the host to present.
///
/// Poses are already written to the model when a change set is returned;
/// the entries say which cards moved and whether to animate. Lists are
/// ordered front to back.
#[derive(Clone, Debug, Default)]
pub struct StackChanges {
    /// Cards whose stored pose changed.
    pub poses: Vec<PoseChange>,
    /// Cards revealed by a reload. Present instantly.
    pub added: Vec<CardId>,
    /// Cards appended at the back after a dismissal settled. Present with a
    /// fade; their pose is already written.
    pub appended: Vec<CardId>,
    /// Cards starting their removal flight. The host animates each off the
    /// stage and reports back via
    /// [`removal_finished`](StackController::removal_finished).
    pub dismissals: Vec<Dismissal>,
    /// Cards whose visuals should be dropped now, abandoning any running
    /// animation. No completion is reported for a detached card.
    pub detached: Vec<CardId>,
    /// Set when this operation split the stack.
    pub split: Option<CardId>,
    /// Set when the front card should spring back to rest. The host reports
    /// the settle via
    /// [`snap_back_finished`](StackController::snap_back_finished).
    pub snap_back: Option<CardId>,
}

impl StackChanges {
    /// Clears every list, retaining capacity.
    pub fn clear(&mut self) {
        self.poses.clear();
        self.added.clear();
        self.appended.clear();
        self.dismissals.clear();
        self.detached.clear();
        self.split = None;
        self.snap_back = None;
    }

    /// Whether the operation asked for nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
            && self.added.is_empty()
            && self.appended.is_empty()
            && self.dismissals.is_empty()
            && self.detached.is_empty()
            && self.split.is_none()
            && self.snap_back.is_none()
    }
}

/// Drives a card stack.
///
/// One controller serves one stack. All mutation funnels through it: the
/// model it owns is read-only to hosts, and every operation returns the
/// [`StackChanges`] the host must present to stay in sync.
#[derive(Debug)]
pub struct StackController {
    config: StackConfig,
    metrics: StageMetrics,
    model: StackModel,
    gesture: DragGesture,
    removal_locked: bool,
    in_flight: Option<CardId>,
}

impl StackController {
    /// Creates a controller presenting into a stage of the given metrics.
    #[must_use]
    pub fn new(config: StackConfig, metrics: StageMetrics) -> Self {
        Self {
            config,
            metrics,
            model: StackModel::new(),
            gesture: DragGesture::default(),
            removal_locked: false,
            in_flight: None,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    ///
    /// Changes apply to subsequent operations; nothing is reposed
    /// retroactively. Setters validate as usual.
    pub fn config_mut(&mut self) -> &mut StackConfig {
        &mut self.config
    }

    /// The model hosts read while applying change sets.
    #[must_use]
    pub fn model(&self) -> &StackModel {
        &self.model
    }

    /// The stage metrics layout currently uses.
    #[must_use]
    pub fn metrics(&self) -> StageMetrics {
        self.metrics
    }

    /// Whether a committed removal is still in flight.
    #[must_use]
    pub fn is_removal_locked(&self) -> bool {
        self.removal_locked
    }

    /// Rebuilds the stack from the data source.
    ///
    /// Every existing card is detached, including one mid-flight; the host
    /// abandons their animations and forgets their completions. The margin
    /// edge is re-read from the source, up to
    /// [`visible_count`](StackConfig::visible_count) items are pulled onto
    /// fresh cards, and all of them are posed without animation. An empty
    /// source yields an empty stack and no pose writes.
    pub fn reload(&mut self, source: &mut dyn CardSource) -> StackChanges {
        let mut changes = StackChanges::default();

        for &card in self.model.cards() {
            changes.detached.push(card);
        }
        if let Some(card) = self.in_flight.take() {
            changes.detached.push(card);
            self.model.destroy_card(card);
        }
        self.removal_locked = false;
        self.gesture = DragGesture::default();

        self.config.set_margin_position(source.margin_position());
        self.model.reset(source.item_count());

        while self.model.len() < self.config.visible_count() {
            let Some(item) = self.model.pull_next() else {
                break;
            };
            let card = self.model.append_card(source.content_at(item));
            changes.added.push(card);
        }

        self.repose_all(None, false, false, &mut changes);
        changes
    }

    /// Processes one pointer event against the front card.
    ///
    /// Events on an empty stack are ignored, as are moves and releases
    /// without a preceding touch.
    pub fn pointer(
        &mut self,
        event: PointerEvent,
        delegate: &mut dyn StackDelegate,
    ) -> StackChanges {
        let mut changes = StackChanges::default();
        self.pointer_into(event, delegate, &mut changes);
        changes
    }

    /// Like [`pointer`](Self::pointer), but reuses a caller-provided buffer
    /// to avoid allocation on every move.
    pub fn pointer_into(
        &mut self,
        event: PointerEvent,
        delegate: &mut dyn StackDelegate,
        changes: &mut StackChanges,
    ) {
        changes.clear();
        let Some(front) = self.model.front() else {
            return;
        };

        match event {
            PointerEvent::Down { local, container } => {
                self.gesture.begin(local, self.metrics.card.width, container);
            }
            PointerEvent::Move { container } => {
                let Some(sample) = self.gesture.movement(container, self.config.split_distance())
                else {
                    return;
                };
                let drag = if self.gesture.is_split() {
                    DragSample::mirrored(sample.offset, sample.angle)
                } else {
                    DragSample::eased(sample.offset, sample.angle)
                };
                self.repose_all(Some(drag), false, sample.animate_followers, changes);
                if sample.entered_split {
                    changes.split = Some(front);
                }
            }
            PointerEvent::Up { container } => {
                let outcome = self.gesture.release(container, self.config.split_distance());
                self.resolve(outcome, front, delegate, changes);
            }
            PointerEvent::Cancel { container } => {
                let outcome = self.gesture.cancel(container, self.config.split_distance());
                self.resolve(outcome, front, delegate, changes);
            }
        }
    }

    /// Reports that a dismissed card's flight off the stage finished.
    ///
    /// Frees the card, notifies the delegate, and pulls one replacement
    /// onto the back of the stack if the source still has items and the
    /// window wants one. The replacement's pose is written without
    /// animation; the host fades it in.
    ///
    /// # Panics
    ///
    /// Panics if `card` is not the dismissal currently in flight.
    /// Completions must not be reported for detached cards.
    pub fn removal_finished(
        &mut self,
        card: CardId,
        source: &mut dyn CardSource,
        delegate: &mut dyn StackDelegate,
    ) -> StackChanges {
        assert!(
            self.in_flight == Some(card),
            "removal completion for {card:?} does not match the dismissal in flight"
        );
        self.in_flight = None;

        let mut changes = StackChanges::default();
        self.model.destroy_card(card);
        changes.detached.push(card);
        delegate.did_remove(card);

        let replacement_item = if self.model.len() < self.config.visible_count() {
            self.model.pull_next()
        } else {
            None
        };
        if let Some(item) = replacement_item {
            let replacement = self.model.append_card(source.content_at(item));
            let back = self.model.len() - 1;
            let pose = card_pose(back, &self.config, &self.metrics, None);
            self.model.set_pose(replacement, pose);
            changes.appended.push(replacement);
            changes.poses.push(PoseChange {
                card: replacement,
                animate: false,
            });
        }

        self.removal_locked = false;
        changes
    }

    /// Reports that the snap-back spring settled at rest.
    ///
    /// Until this arrives the stack stays split: a new drag keeps mirroring
    /// the pointer rather than easing.
    pub fn snap_back_finished(&mut self) {
        self.gesture.settle_snap_back();
    }

    /// Adopts new stage metrics and reposes every card without animation.
    pub fn layout_changed(&mut self, metrics: StageMetrics) -> StackChanges {
        let mut changes = StackChanges::default();
        self.metrics = metrics;
        self.repose_all(None, false, false, &mut changes);
        changes
    }

    fn resolve(
        &mut self,
        outcome: Option<ReleaseOutcome>,
        front: CardId,
        delegate: &mut dyn StackDelegate,
        changes: &mut StackChanges,
    ) {
        match outcome {
            Some(ReleaseOutcome::Commit(direction)) => {
                self.commit(front, direction, delegate, changes);
            }
            Some(ReleaseOutcome::SnapBack) => self.snap_back(front, changes),
            None => {}
        }
    }

    /// Commits the front card off the stack.
    ///
    /// Swallowed while a previous removal is in flight: the card stays at
    /// its dragged pose and the gesture has already returned to idle.
    fn commit(
        &mut self,
        card: CardId,
        direction: RemoveDirection,
        delegate: &mut dyn StackDelegate,
        changes: &mut StackChanges,
    ) {
        if self.removal_locked {
            return;
        }
        let Some(removed) = self.model.remove_front() else {
            return;
        };
        debug_assert_eq!(removed, card);

        self.removal_locked = true;
        self.in_flight = Some(card);
        delegate.will_remove(card);
        changes.dismissals.push(Dismissal { card, direction });

        // Close ranks behind the departing card.
        self.repose_all(None, true, true, changes);
    }

    fn snap_back(&mut self, front: CardId, changes: &mut StackChanges) {
        self.repose_all(None, true, true, changes);
        changes.snap_back = Some(front);
    }

    /// Recomputes the pose of every ordered card, front to back.
    fn repose_all(
        &mut self,
        drag: Option<DragSample>,
        animate_front: bool,
        animate_back: bool,
        changes: &mut StackChanges,
    ) {
        for index in 0..self.model.len() {
            let card = self.model.card_at(index);
            let pose = card_pose(index, &self.config, &self.metrics, drag);
            self.model.set_pose(card, pose);
            let animate = if index == 0 {
                animate_front
            } else {
                animate_back
            };
            changes.poses.push(PoseChange { card, animate });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Size};

    use super::*;
    use crate::backend::NoopDelegate;
    use crate::card::ContentId;
    use crate::config::MarginPosition;
    use crate::geometry::{CardPose, follow_fraction};

    struct Items {
        count: u32,
        margin: MarginPosition,
    }

    impl Items {
        fn new(count: u32) -> Self {
            Self {
                count,
                margin: MarginPosition::Top,
            }
        }
    }

    impl CardSource for Items {
        fn item_count(&mut self) -> u32 {
            self.count
        }

        fn content_at(&mut self, index: u32) -> ContentId {
            ContentId(index)
        }

        fn margin_position(&mut self) -> MarginPosition {
            self.margin
        }
    }

    #[derive(Default)]
    struct Probe {
        will: Vec<CardId>,
        did: Vec<CardId>,
    }

    impl StackDelegate for Probe {
        fn will_remove(&mut self, card: CardId) {
            self.will.push(card);
        }

        fn did_remove(&mut self, card: CardId) {
            self.did.push(card);
        }
    }

    fn metrics() -> StageMetrics {
        StageMetrics::new(Size::new(320.0, 480.0), Size::new(280.0, 360.0))
    }

    fn controller() -> StackController {
        StackController::new(StackConfig::default(), metrics())
    }

    fn contents(controller: &StackController) -> Vec<u32> {
        controller
            .model()
            .cards()
            .iter()
            .map(|&card| controller.model().content(card).0)
            .collect()
    }

    /// Down at the stage center, one move, then up at `(dx, dy)`.
    fn swipe(
        controller: &mut StackController,
        delegate: &mut dyn StackDelegate,
        dx: f64,
        dy: f64,
    ) -> StackChanges {
        let start = Point::new(160.0, 240.0);
        let _ = controller.pointer(
            PointerEvent::Down {
                local: Point::new(140.0, 180.0),
                container: start,
            },
            delegate,
        );
        let _ = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + dx, start.y + dy),
            },
            delegate,
        );
        controller.pointer(
            PointerEvent::Up {
                container: Point::new(start.x + dx, start.y + dy),
            },
            delegate,
        )
    }

    #[test]
    fn reload_fills_the_window() {
        let mut controller = controller();
        let changes = controller.reload(&mut Items::new(10));

        assert_eq!(controller.model().len(), 3);
        assert_eq!(controller.model().cursor(), 3);
        assert_eq!(controller.model().dismissed(), 0);
        assert_eq!(contents(&controller), vec![0, 1, 2]);

        assert_eq!(changes.added.len(), 3);
        assert_eq!(changes.poses.len(), 3);
        assert!(changes.poses.iter().all(|p| !p.animate));
    }

    #[test]
    fn reload_of_an_empty_source_is_silent() {
        let mut controller = controller();
        let changes = controller.reload(&mut Items::new(0));
        assert!(changes.is_empty());
        assert!(controller.model().is_empty());
        assert_eq!(controller.model().total(), 0);
    }

    #[test]
    fn reload_of_a_short_source_pulls_what_exists() {
        let mut controller = controller();
        let changes = controller.reload(&mut Items::new(2));
        assert_eq!(controller.model().len(), 2);
        assert_eq!(changes.added.len(), 2);
        assert_eq!(controller.model().cursor(), 2);
    }

    #[test]
    fn reload_adopts_the_source_margin_edge() {
        let mut controller = controller();
        let mut source = Items::new(5);
        source.margin = MarginPosition::Bottom;
        let _ = controller.reload(&mut source);

        assert_eq!(controller.config().margin_position(), MarginPosition::Bottom);
        let behind = controller.model().card_at(1);
        assert!(controller.model().pose(behind).translation.y > 0.0);
    }

    #[test]
    fn reload_replaces_previous_cards() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));
        let old: Vec<CardId> = controller.model().cards().to_vec();

        let changes = controller.reload(&mut Items::new(4));
        assert_eq!(changes.detached, old);
        for card in old {
            assert!(!controller.model().is_alive(card));
        }
        assert_eq!(contents(&controller), vec![0, 1, 2]);
    }

    #[test]
    fn layout_changed_is_idempotent() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));

        let first = controller.layout_changed(metrics());
        let snapshot: Vec<CardPose> = controller
            .model()
            .cards()
            .iter()
            .map(|&card| controller.model().pose(card))
            .collect();

        let second = controller.layout_changed(metrics());
        let again: Vec<CardPose> = controller
            .model()
            .cards()
            .iter()
            .map(|&card| controller.model().pose(card))
            .collect();

        assert_eq!(snapshot, again);
        assert_eq!(first.poses, second.poses);
        assert!(second.poses.iter().all(|p| !p.animate));
    }

    #[test]
    fn commit_removes_the_front_and_closes_ranks() {
        let mut controller = controller();
        let mut probe = Probe::default();
        let _ = controller.reload(&mut Items::new(10));
        let front = controller.model().front().unwrap();

        let changes = swipe(&mut controller, &mut probe, 90.0, 0.0);

        assert_eq!(changes.dismissals.len(), 1);
        assert_eq!(changes.dismissals[0].card, front);
        assert_eq!(changes.dismissals[0].direction, RemoveDirection::Right);
        assert!(changes.snap_back.is_none());

        // The two remaining cards spring forward.
        assert_eq!(changes.poses.len(), 2);
        assert!(changes.poses.iter().all(|p| p.animate));

        assert!(controller.is_removal_locked());
        assert_eq!(probe.will, vec![front]);
        assert!(probe.did.is_empty());
        assert_eq!(controller.model().len(), 2);
        assert_eq!(controller.model().dismissed(), 1);
    }

    #[test]
    fn leftward_swipes_commit_left() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));
        let changes = swipe(&mut controller, &mut NoopDelegate, -90.0, 0.0);
        assert_eq!(changes.dismissals[0].direction, RemoveDirection::Left);
    }

    #[test]
    fn settled_removal_appends_the_next_item() {
        let mut controller = controller();
        let mut probe = Probe::default();
        let mut source = Items::new(10);
        let _ = controller.reload(&mut source);
        let front = controller.model().front().unwrap();

        let _ = swipe(&mut controller, &mut probe, 90.0, 0.0);
        let changes = controller.removal_finished(front, &mut source, &mut probe);

        assert_eq!(changes.detached, vec![front]);
        assert!(!controller.model().is_alive(front));
        assert_eq!(probe.did, vec![front]);

        // The replacement arrives at the back, posed but not animated.
        assert_eq!(changes.appended.len(), 1);
        let replacement = changes.appended[0];
        assert_eq!(controller.model().card_at(2), replacement);
        assert_eq!(
            changes.poses,
            vec![PoseChange {
                card: replacement,
                animate: false
            }]
        );

        assert!(!controller.is_removal_locked());
        assert_eq!(controller.model().len(), 3);
        assert_eq!(controller.model().cursor(), 4);
        assert_eq!(contents(&controller), vec![1, 2, 3]);
    }

    #[test]
    fn exhausted_source_shrinks_the_stack() {
        let mut controller = controller();
        let mut source = Items::new(3);
        let _ = controller.reload(&mut source);

        for expected_len in [2, 1, 0] {
            let front = controller.model().front().unwrap();
            let _ = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);
            let changes = controller.removal_finished(front, &mut source, &mut NoopDelegate);
            assert!(changes.appended.is_empty());
            assert_eq!(controller.model().len(), expected_len);
        }

        // Nothing left to interact with.
        let changes = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);
        assert!(changes.is_empty());
    }

    #[test]
    fn second_commit_is_swallowed_while_locked() {
        let mut controller = controller();
        let mut source = Items::new(10);
        let _ = controller.reload(&mut source);
        let first = controller.model().front().unwrap();
        let _ = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);

        // A full gesture against the new front card while the first removal
        // is still flying.
        let changes = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);
        assert!(changes.dismissals.is_empty());
        assert!(changes.is_empty());
        assert!(controller.is_removal_locked());
        assert_eq!(controller.model().len(), 2);
        assert_eq!(controller.model().dismissed(), 1);

        // Settling the first removal unlocks and appends as usual.
        let changes = controller.removal_finished(first, &mut source, &mut NoopDelegate);
        assert_eq!(changes.appended.len(), 1);
        assert_eq!(controller.model().len(), 3);
    }

    #[test]
    fn five_item_walkthrough() {
        let mut controller = controller();
        let mut source = Items::new(5);
        let _ = controller.reload(&mut source);
        assert_eq!(contents(&controller), vec![0, 1, 2]);

        let front = controller.model().front().unwrap();
        let _ = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);
        let _ = controller.removal_finished(front, &mut source, &mut NoopDelegate);

        assert_eq!(contents(&controller), vec![1, 2, 3]);
        assert_eq!(controller.model().cursor(), 4);
        assert_eq!(controller.model().dismissed(), 1);
    }

    #[test]
    fn split_is_marked_once_and_poses_mirror() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));
        let front = controller.model().front().unwrap();
        let start = Point::new(160.0, 240.0);

        let _ = controller.pointer(
            PointerEvent::Down {
                local: Point::new(140.0, 180.0),
                container: start,
            },
            &mut NoopDelegate,
        );
        let crossing = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + 90.0, start.y - 20.0),
            },
            &mut NoopDelegate,
        );
        assert_eq!(crossing.split, Some(front));
        assert!(crossing.poses.iter().skip(1).all(|p| p.animate));

        // Followers mirror the full offset once split.
        let back = controller.model().card_at(2);
        let rest = card_pose(2, controller.config(), &controller.metrics(), None);
        let pose = controller.model().pose(back);
        assert!((pose.translation.x - (rest.translation.x + 90.0)).abs() < 1e-9);
        assert!((pose.translation.y - (rest.translation.y - 20.0)).abs() < 1e-9);

        // Still split on the next move, but not re-announced.
        let further = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + 100.0, start.y),
            },
            &mut NoopDelegate,
        );
        assert!(further.split.is_none());
        assert!(further.poses.iter().skip(1).all(|p| p.animate));
    }

    #[test]
    fn eased_following_before_the_split() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));
        let start = Point::new(160.0, 240.0);

        let _ = controller.pointer(
            PointerEvent::Down {
                local: Point::new(140.0, 180.0),
                container: start,
            },
            &mut NoopDelegate,
        );
        let first = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + 30.0, start.y),
            },
            &mut NoopDelegate,
        );
        assert!(first.split.is_none());
        // First move animates followers into place.
        assert!(first.poses.iter().skip(1).all(|p| p.animate));
        assert!(!first.poses[0].animate);

        let front = controller.model().front().unwrap();
        let eps = 1e-9;
        assert!((controller.model().pose(front).translation.x - 30.0).abs() < eps);

        let behind = controller.model().card_at(1);
        let rest = card_pose(1, controller.config(), &controller.metrics(), None);
        let expected = rest.translation.x + 30.0 * follow_fraction(1, 3);
        assert!((controller.model().pose(behind).translation.x - expected).abs() < eps);

        // Later moves under the split distance track without animating.
        let second = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + 40.0, start.y),
            },
            &mut NoopDelegate,
        );
        assert!(second.poses.iter().all(|p| !p.animate));
    }

    #[test]
    fn short_release_snaps_the_stack_back() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));
        let front = controller.model().front().unwrap();

        let changes = swipe(&mut controller, &mut NoopDelegate, 30.0, 0.0);
        assert_eq!(changes.snap_back, Some(front));
        assert!(changes.dismissals.is_empty());
        assert_eq!(changes.poses.len(), 3);
        assert!(changes.poses.iter().all(|p| p.animate));
        assert_eq!(controller.model().pose(front), CardPose::IDENTITY);
        assert_eq!(controller.model().len(), 3);
    }

    #[test]
    fn split_persists_through_a_snap_back_until_settled() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));
        let start = Point::new(160.0, 240.0);

        // Split, then release close to the origin.
        let _ = controller.pointer(
            PointerEvent::Down {
                local: Point::new(140.0, 180.0),
                container: start,
            },
            &mut NoopDelegate,
        );
        let _ = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + 90.0, start.y),
            },
            &mut NoopDelegate,
        );
        let released = controller.pointer(
            PointerEvent::Up {
                container: Point::new(start.x + 10.0, start.y),
            },
            &mut NoopDelegate,
        );
        assert!(released.snap_back.is_some());

        // A drag before the spring settles still mirrors in full.
        let _ = controller.pointer(
            PointerEvent::Down {
                local: Point::new(140.0, 180.0),
                container: start,
            },
            &mut NoopDelegate,
        );
        let _ = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + 20.0, start.y),
            },
            &mut NoopDelegate,
        );
        let back = controller.model().card_at(2);
        let rest = card_pose(2, controller.config(), &controller.metrics(), None);
        let mirrored = controller.model().pose(back);
        assert!((mirrored.translation.x - (rest.translation.x + 20.0)).abs() < 1e-9);

        // After the settle the same drag eases again.
        let _ = controller.pointer(PointerEvent::Up { container: start }, &mut NoopDelegate);
        controller.snap_back_finished();
        let _ = controller.pointer(
            PointerEvent::Down {
                local: Point::new(140.0, 180.0),
                container: start,
            },
            &mut NoopDelegate,
        );
        let _ = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + 20.0, start.y),
            },
            &mut NoopDelegate,
        );
        let eased = controller.model().pose(back);
        let expected = rest.translation.x + 20.0 * follow_fraction(2, 3);
        assert!((eased.translation.x - expected).abs() < 1e-9);
    }

    #[test]
    fn cancel_without_a_position_snaps_back() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));
        let front = controller.model().front().unwrap();
        let start = Point::new(160.0, 240.0);

        let _ = controller.pointer(
            PointerEvent::Down {
                local: Point::new(140.0, 180.0),
                container: start,
            },
            &mut NoopDelegate,
        );
        let _ = controller.pointer(
            PointerEvent::Move {
                container: Point::new(start.x + 90.0, start.y),
            },
            &mut NoopDelegate,
        );
        let changes = controller.pointer(
            PointerEvent::Cancel { container: None },
            &mut NoopDelegate,
        );
        assert_eq!(changes.snap_back, Some(front));
        assert!(changes.dismissals.is_empty());
    }

    #[test]
    fn cancel_with_a_position_can_commit() {
        let mut controller = controller();
        let _ = controller.reload(&mut Items::new(10));
        let start = Point::new(160.0, 240.0);

        let _ = controller.pointer(
            PointerEvent::Down {
                local: Point::new(140.0, 180.0),
                container: start,
            },
            &mut NoopDelegate,
        );
        let changes = controller.pointer(
            PointerEvent::Cancel {
                container: Some(Point::new(start.x - 90.0, start.y)),
            },
            &mut NoopDelegate,
        );
        assert_eq!(changes.dismissals.len(), 1);
        assert_eq!(changes.dismissals[0].direction, RemoveDirection::Left);
    }

    #[test]
    fn reload_mid_flight_detaches_the_flying_card() {
        let mut controller = controller();
        let mut source = Items::new(10);
        let _ = controller.reload(&mut source);
        let front = controller.model().front().unwrap();
        let _ = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);
        assert!(controller.is_removal_locked());

        let changes = controller.reload(&mut source);
        assert!(changes.detached.contains(&front));
        assert_eq!(changes.detached.len(), 3);
        assert!(!controller.is_removal_locked());
        assert_eq!(controller.model().len(), 3);
    }

    #[test]
    fn pointer_events_on_an_empty_stack_are_ignored() {
        let mut controller = controller();
        let changes = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);
        assert!(changes.is_empty());
    }

    #[test]
    fn shrinking_the_window_skips_the_append() {
        let mut controller = controller();
        let mut source = Items::new(10);
        let _ = controller.reload(&mut source);
        controller.config_mut().set_visible_count(2);

        let front = controller.model().front().unwrap();
        let _ = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);
        let changes = controller.removal_finished(front, &mut source, &mut NoopDelegate);

        // Two cards already satisfy the narrowed window.
        assert!(changes.appended.is_empty());
        assert_eq!(controller.model().len(), 2);
        assert_eq!(controller.model().cursor(), 3);
    }

    #[test]
    #[should_panic(expected = "does not match the dismissal in flight")]
    fn completion_for_the_wrong_card_panics() {
        let mut controller = controller();
        let mut source = Items::new(10);
        let _ = controller.reload(&mut source);
        let _ = swipe(&mut controller, &mut NoopDelegate, 90.0, 0.0);

        let wrong = controller.model().front().unwrap();
        let _ = controller.removal_finished(wrong, &mut source, &mut NoopDelegate);
    }

    #[test]
    #[should_panic(expected = "does not match the dismissal in flight")]
    fn completion_without_a_dismissal_panics() {
        let mut controller = controller();
        let mut source = Items::new(10);
        let _ = controller.reload(&mut source);
        let front = controller.model().front().unwrap();
        let _ = controller.removal_finished(front, &mut source, &mut NoopDelegate);
    }
}
