// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card handles.

/// Sentinel index used for vacant slots in the store.
pub(crate) const INVALID: u32 = u32::MAX;

/// A generational handle to a card in a [`CardStore`](super::CardStore).
///
/// Handles are cheap to copy and remain stable while the card is alive. A
/// handle is invalidated when its card is destroyed; using a stale handle
/// panics.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl CardId {
    /// The raw slot index. Only meaningful for diagnostics.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// The generation of the slot when this handle was created.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl core::fmt::Debug for CardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CardId({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque identifier for the content shown on a card.
///
/// Minted by the host's data source, one per virtual item. The stack stores
/// and hands these back verbatim; it never interprets them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u32);

impl core::fmt::Debug for ContentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ContentId({})", self.0)
    }
}
