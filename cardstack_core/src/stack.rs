// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack bookkeeping: which cards exist, their front-to-back order, and the
//! position of the visible window in the virtual item list.

use alloc::vec::Vec;

use crate::card::{CardId, CardStore, ContentId};
use crate::geometry::CardPose;

/// The visible window of a card stack.
///
/// The model owns card allocation and ordering. It is mutated only by the
/// [`StackController`](crate::controller::StackController); hosts read it
/// when applying change sets.
///
/// Three counters locate the window in the virtual list:
///
/// - [`total`](Self::total): items reported by the data source at reload.
/// - [`cursor`](Self::cursor): items consumed so far, dismissed or on a card.
/// - [`dismissed`](Self::dismissed): cards committed off the stack.
///
/// Between interactions `cursor == dismissed + len` holds, and `len ==
/// min(visible_count, total - dismissed)` once every dismissal has settled.
#[derive(Debug)]
pub struct StackModel {
    store: CardStore,
    order: Vec<CardId>,
    total: u32,
    cursor: u32,
    dismissed: u32,
}

impl Default for StackModel {
    fn default() -> Self {
        Self::new()
    }
}

impl StackModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: CardStore::new(),
            order: Vec::new(),
            total: 0,
            cursor: 0,
            dismissed: 0,
        }
    }

    // -- Window mutation (controller only) --

    /// Destroys every ordered card and restarts the session over `total`
    /// virtual items.
    pub(crate) fn reset(&mut self, total: u32) {
        for card in self.order.drain(..) {
            self.store.destroy_card(card);
        }
        self.total = total;
        self.cursor = 0;
        self.dismissed = 0;
    }

    /// Consumes the next virtual item, returning its index.
    ///
    /// Returns `None` once every item has been pulled.
    pub(crate) fn pull_next(&mut self) -> Option<u32> {
        if self.cursor < self.total {
            let item = self.cursor;
            self.cursor += 1;
            Some(item)
        } else {
            None
        }
    }

    /// Creates a card for `content` at the back of the stack.
    pub(crate) fn append_card(&mut self, content: ContentId) -> CardId {
        let card = self.store.create_card(content);
        self.order.push(card);
        card
    }

    /// Removes the front card from the order and counts the dismissal.
    ///
    /// The card stays alive in the store until its removal settles.
    pub(crate) fn remove_front(&mut self) -> Option<CardId> {
        if self.order.is_empty() {
            return None;
        }
        let card = self.order.remove(0);
        self.dismissed += 1;
        Some(card)
    }

    /// Frees a card that is no longer ordered or animating.
    pub(crate) fn destroy_card(&mut self, card: CardId) {
        self.store.destroy_card(card);
    }

    /// Writes the pose of a card.
    pub(crate) fn set_pose(&mut self, card: CardId, pose: CardPose) {
        self.store.set_pose(card, pose);
    }

    // -- Reading --

    /// The front card, if the stack is non-empty.
    #[must_use]
    pub fn front(&self) -> Option<CardId> {
        self.order.first().copied()
    }

    /// Number of cards currently in the stack.
    #[must_use]
    pub fn len(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the order never outgrows `visible_count`, which is a `u32`"
        )]
        let n = self.order.len() as u32;
        n
    }

    /// Whether the stack holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The card at `index` positions behind the front card.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn card_at(&self, index: u32) -> CardId {
        assert!(
            index < self.len(),
            "card index {index} out of range (len {})",
            self.len()
        );
        self.order[index as usize]
    }

    /// The cards in front-to-back order.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.order
    }

    /// Returns whether the given handle refers to a live card.
    #[must_use]
    pub fn is_alive(&self, card: CardId) -> bool {
        self.store.is_alive(card)
    }

    /// The content shown on a card.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn content(&self, card: CardId) -> ContentId {
        self.store.content(card)
    }

    /// The pose a card should be presented with.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn pose(&self, card: CardId) -> CardPose {
        self.store.pose(card)
    }

    /// Virtual items reported by the data source at the last reload.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Virtual items consumed so far, dismissed or on a card.
    #[must_use]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Cards committed off the stack since the last reload.
    #[must_use]
    pub fn dismissed(&self) -> u32 {
        self.dismissed
    }

    /// Virtual items not yet pulled onto a card.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.total - self.cursor
    }
}
