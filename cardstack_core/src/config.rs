// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack configuration.

/// Which edge of the stage the background cards lean toward.
///
/// The front card sits centered on the stage; each card behind it is offset
/// toward this edge so a sliver of every visible card peeks out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarginPosition {
    /// Background cards peek out above the front card.
    Top,
    /// Background cards peek out below the front card.
    Bottom,
    /// Background cards peek out to the left of the front card.
    Left,
    /// Background cards peek out to the right of the front card.
    Right,
}

/// Tunable parameters of a card stack.
///
/// Setters validate their input and silently ignore values that would break
/// the layout math, so a config in use is always well-formed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackConfig {
    visible_count: u32,
    margin_position: MarginPosition,
    margin_space: f64,
    split_distance: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl StackConfig {
    /// Three visible cards leaning toward the top edge, ten units between
    /// background cards, sixty units of drag to commit a removal.
    pub const DEFAULT: Self = Self {
        visible_count: 3,
        margin_position: MarginPosition::Top,
        margin_space: 10.0,
        split_distance: 60.0,
    };

    /// How many cards are presented at once (front card included).
    #[inline]
    #[must_use]
    pub const fn visible_count(&self) -> u32 {
        self.visible_count
    }

    /// The edge background cards lean toward.
    #[inline]
    #[must_use]
    pub const fn margin_position(&self) -> MarginPosition {
        self.margin_position
    }

    /// Spacing between successive background cards, in stage units.
    #[inline]
    #[must_use]
    pub const fn margin_space(&self) -> f64 {
        self.margin_space
    }

    /// Drag distance past which a gesture splits the stack and a release
    /// commits a removal, in stage units.
    #[inline]
    #[must_use]
    pub const fn split_distance(&self) -> f64 {
        self.split_distance
    }

    /// Sets how many cards are presented at once.
    ///
    /// Values below two are ignored; background spacing divides by
    /// `visible_count - 1`. A change takes effect the next time cards are
    /// laid out or pulled, not retroactively.
    pub fn set_visible_count(&mut self, count: u32) {
        if count >= 2 {
            self.visible_count = count;
        }
    }

    /// Sets the edge background cards lean toward.
    pub fn set_margin_position(&mut self, position: MarginPosition) {
        self.margin_position = position;
    }

    /// Sets the spacing between successive background cards.
    ///
    /// Negative or non-finite values are ignored.
    pub fn set_margin_space(&mut self, space: f64) {
        if space.is_finite() && space >= 0.0 {
            self.margin_space = space;
        }
    }

    /// Sets the drag distance that splits the stack and commits a removal.
    ///
    /// Non-positive or non-finite values are ignored.
    pub fn set_split_distance(&mut self, distance: f64) {
        if distance.is_finite() && distance > 0.0 {
            self.split_distance = distance;
        }
    }
}
