// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for presenting a stack.
//!
//! The stack is headless: it owns state and geometry, never visuals or
//! timing. A host provides the following pieces:
//!
//! - **Data source** — Implements [`CardSource`]. Answers how many virtual
//!   items exist, mints a [`ContentId`] per item, and picks the margin edge.
//!   Queried at reload and whenever a settled removal pulls a replacement.
//!
//! - **Delegate** — Implements [`StackDelegate`] to observe removals.
//!   `will_remove` fires when a removal commits, `did_remove` once its
//!   flight has settled.
//!
//! - **Stage** — Implements [`CardStage`] to mirror each
//!   [`StackChanges`] into real visuals: create and drop views, run pose
//!   animations, fly dismissed cards off, fade appends in.
//!
//! - **Completions** — Reports animation ends back to the controller:
//!   [`removal_finished`](crate::controller::StackController::removal_finished)
//!   when a dismissed card's flight ends,
//!   [`snap_back_finished`](crate::controller::StackController::snap_back_finished)
//!   when the snap-back spring settles. Detached cards are dropped without
//!   a completion.
//!
//! # Crate boundaries
//!
//! `cardstack_core` owns the model, geometry, gestures, and this contract
//! module. Host crates depend on it and provide platform glue: an event
//! loop feeding pointer events in, and a presentation layer applying change
//! sets out.
//!
//! [`ContentId`]: crate::card::ContentId
//! [`StackChanges`]: crate::controller::StackChanges

use crate::card::{CardId, ContentId};
use crate::config::MarginPosition;
use crate::controller::StackChanges;
use crate::stack::StackModel;

/// Supplies virtual items to the stack.
///
/// The stack pulls lazily: at most
/// [`visible_count`](crate::config::StackConfig::visible_count) items are
/// realized as cards at a time, and [`content_at`](Self::content_at) is
/// called once per item as the window advances.
pub trait CardSource {
    /// Number of virtual items in the session.
    fn item_count(&mut self) -> u32;

    /// The content token for the item at `index`.
    fn content_at(&mut self, index: u32) -> ContentId;

    /// The edge background cards lean toward.
    fn margin_position(&mut self) -> MarginPosition {
        MarginPosition::Top
    }
}

/// Observes card removals.
pub trait StackDelegate {
    /// A removal committed; the card has left the stack order and is about
    /// to fly off the stage.
    fn will_remove(&mut self, card: CardId) {
        _ = card;
    }

    /// The card's flight settled and it has been freed.
    fn did_remove(&mut self, card: CardId) {
        _ = card;
    }
}

/// A delegate that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDelegate;

impl StackDelegate for NoopDelegate {}

/// Applies change sets to a host-native presentation layer.
///
/// Both real view hierarchies and test doubles implement this trait,
/// enabling generic interaction loops.
///
/// # Wiring pseudocode
///
/// A typical host wires the pieces together like this:
///
/// ```rust,ignore
/// let changes = controller.reload(&mut source);
/// stage.apply(controller.model(), &changes);
///
/// fn on_pointer(event: PointerEvent) {
///     controller.pointer_into(event, &mut delegate, &mut changes);
///     stage.apply(controller.model(), &changes);
/// }
///
/// // When a dismissed card's flight animation completes:
/// let changes = controller.removal_finished(card, &mut source, &mut delegate);
/// stage.apply(controller.model(), &changes);
///
/// // When the snap-back spring settles:
/// controller.snap_back_finished();
/// ```
pub trait CardStage {
    /// Applies the given [`StackChanges`] to the backing visuals, reading
    /// current poses and content from `model` as needed.
    fn apply(&mut self, model: &StackModel, changes: &StackChanges);
}
