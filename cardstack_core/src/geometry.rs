// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack geometry: per-index rest poses and drag following.
//!
//! The front card (index 0) renders at full size, centered on the stage.
//! Each card behind it shrinks and leans toward the configured margin edge
//! so a sliver of every visible card peeks out. During a drag, background
//! cards follow the front card by an eased fraction of its offset; once the
//! stack has split they mirror the drag in full.

use kurbo::{Affine, Size, Vec2};

use crate::config::{MarginPosition, StackConfig};

/// Scale shed across the visible window, per step of depth.
///
/// The card at `index` is scaled by `1 - index * SCALE_FALLOFF / visible_count`,
/// so deeper windows shrink each step more gently.
pub const SCALE_FALLOFF: f64 = 0.4;

/// Quadratic coefficient of the follow easing curve.
pub const FOLLOW_GAIN: f64 = 1.0;

/// Constant term of the follow easing curve.
pub const FOLLOW_BASE: f64 = 0.0;

/// Dimensions the stack is laid out against, in shared stage units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageMetrics {
    /// Size of the container the stack is presented in.
    pub container: Size,
    /// Size of a single card.
    pub card: Size,
}

impl StageMetrics {
    /// Creates metrics from a container size and a card size.
    #[inline]
    #[must_use]
    pub const fn new(container: Size, card: Size) -> Self {
        Self { container, card }
    }

    /// Card extent along the margin axis: height for vertical margin edges,
    /// width for horizontal ones.
    #[must_use]
    pub fn card_extent(&self, position: MarginPosition) -> f64 {
        match position {
            MarginPosition::Top | MarginPosition::Bottom => self.card.height,
            MarginPosition::Left | MarginPosition::Right => self.card.width,
        }
    }
}

/// A sampled drag of the front card, in stage units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSample {
    /// Pointer offset from where the drag began.
    pub offset: Vec2,
    /// Tilt of the front card, in radians.
    pub angle: f64,
    /// Whether the stack has split. Followers of a split drag mirror the
    /// offset and angle instead of easing toward them.
    pub full_follow: bool,
}

impl DragSample {
    /// A sample of an unsplit drag.
    #[inline]
    #[must_use]
    pub const fn eased(offset: Vec2, angle: f64) -> Self {
        Self {
            offset,
            angle,
            full_follow: false,
        }
    }

    /// A sample of a split drag.
    #[inline]
    #[must_use]
    pub const fn mirrored(offset: Vec2, angle: f64) -> Self {
        Self {
            offset,
            angle,
            full_follow: true,
        }
    }
}

/// The transform a card should be presented with.
///
/// Components compose in a fixed order: scale about the card center, then
/// rotation, then translation. [`affine`](Self::affine) builds the combined
/// map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPose {
    /// Uniform scale about the card center.
    pub scale: f64,
    /// Offset from the card's centered rest position.
    pub translation: Vec2,
    /// Rotation about the card center, in radians.
    pub rotation: f64,
}

impl Default for CardPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CardPose {
    /// Full size, centered, unrotated.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translation: Vec2::ZERO,
        rotation: 0.0,
    };

    /// The pose as a single affine map: scale, then rotation, then
    /// translation.
    #[must_use]
    pub fn affine(&self) -> Affine {
        Affine::scale(self.scale)
            .then_rotate(self.rotation)
            .then_translate(self.translation)
    }
}

/// Scale of the card `index` positions behind the front card.
///
/// The front card is index 0 at scale 1; each step back sheds
/// [`SCALE_FALLOFF`]` / visible_count`.
#[inline]
#[must_use]
pub fn stack_scale(index: u32, visible_count: u32) -> f64 {
    1.0 - f64::from(index) * SCALE_FALLOFF / f64::from(visible_count)
}

/// Fraction of the front card's drag offset the card at `index` follows.
///
/// Eased quadratically over stack depth, `ease_out((visible_count - index) /
/// visible_count)`, so near cards track closely while deep cards barely
/// move. The front card's fraction is 1.
#[inline]
#[must_use]
pub fn follow_fraction(index: u32, visible_count: u32) -> f64 {
    let t = f64::from(visible_count.saturating_sub(index)) / f64::from(visible_count);
    ease_out(t)
}

#[inline]
fn ease_out(t: f64) -> f64 {
    FOLLOW_GAIN * t * t + FOLLOW_BASE
}

/// Computes the pose of the card at `index` positions behind the front.
///
/// The rest pose scales the card by [`stack_scale`] and leans it toward the
/// margin edge far enough that the shrunken card clears the one in front,
/// plus `index` steps of configured spacing. A live drag adds the sampled
/// offset, in full for the front card and for split followers, eased by
/// [`follow_fraction`] otherwise, and tilts the card by the sampled angle
/// attenuated by its scale.
///
/// Indices past the visible window extrapolate: scale keeps falling and the
/// follow fraction clamps to zero. The window can briefly outgrow
/// `visible_count` when it is lowered mid-session.
#[must_use]
pub fn card_pose(
    index: u32,
    config: &StackConfig,
    metrics: &StageMetrics,
    drag: Option<DragSample>,
) -> CardPose {
    let visible = config.visible_count();
    let scale = stack_scale(index, visible);

    let extent = metrics.card_extent(config.margin_position());
    let lean = extent / 2.0 * (1.0 - scale)
        + f64::from(index) * config.margin_space() / f64::from(visible - 1);

    let mut translation = margin_axis(config.margin_position()) * lean;
    let mut rotation = 0.0;

    if let Some(drag) = drag {
        let fraction = if drag.full_follow {
            1.0
        } else {
            follow_fraction(index, visible)
        };
        translation += drag.offset * fraction;
        rotation = drag.angle * if drag.full_follow { 1.0 } else { scale };
    }

    CardPose {
        scale,
        translation,
        rotation,
    }
}

/// Unit vector pointing from the stage center toward the margin edge.
fn margin_axis(position: MarginPosition) -> Vec2 {
    match position {
        MarginPosition::Top => Vec2::new(0.0, -1.0),
        MarginPosition::Bottom => Vec2::new(0.0, 1.0),
        MarginPosition::Left => Vec2::new(-1.0, 0.0),
        MarginPosition::Right => Vec2::new(1.0, 0.0),
    }
}
