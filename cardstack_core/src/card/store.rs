// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays card storage with allocation and pose management.

use alloc::vec::Vec;

use crate::geometry::CardPose;

use super::id::{CardId, ContentId, INVALID};

/// Struct-of-arrays storage for all cards.
///
/// Cards are addressed by [`CardId`] handles. Internally, each card occupies
/// a slot in parallel arrays. Destroyed cards are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct CardStore {
    // -- Properties --
    pub(crate) content: Vec<ContentId>,
    pub(crate) pose: Vec<CardPose>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CardStore {
    /// Creates an empty card store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            pose: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    // -- Allocation API --

    /// Creates a new card holding `content` and returns its handle.
    ///
    /// The card starts at the identity pose.
    pub fn create_card(&mut self, content: ContentId) -> CardId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.content[idx as usize] = content;
            self.pose[idx as usize] = CardPose::IDENTITY;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.content.push(content);
            self.pose.push(CardPose::IDENTITY);
            self.generation.push(0);
            idx
        };

        CardId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a card, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_card(&mut self, id: CardId) {
        self.validate(id);
        let idx = id.idx;

        self.content[idx as usize] = ContentId(INVALID);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live card.
    #[must_use]
    pub fn is_alive(&self, id: CardId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live cards.
    #[must_use]
    pub fn live_count(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the free list never grows past `len`, which is a `u32`"
        )]
        let vacant = self.free_list.len() as u32;
        self.len - vacant
    }

    // -- Property getters --

    /// Returns the content shown on a card.
    #[must_use]
    pub fn content(&self, id: CardId) -> ContentId {
        self.validate(id);
        self.content[id.idx as usize]
    }

    /// Returns the current pose of a card.
    #[must_use]
    pub fn pose(&self, id: CardId) -> CardPose {
        self.validate(id);
        self.pose[id.idx as usize]
    }

    // -- Property setters --

    /// Sets the pose of a card.
    pub fn set_pose(&mut self, id: CardId, pose: CardPose) {
        self.validate(id);
        self.pose[id.idx as usize] = pose;
    }

    /// Panics with a descriptive message if the handle is stale.
    fn validate(&self, id: CardId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale CardId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}
