// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dismissed card's flight off the stage and the replacement's reveal.

use cardstack_core::gesture::RemoveDirection;

/// Seconds a dismissed card takes to fly off the stage.
pub const REMOVAL_SECONDS: f64 = 0.2;

/// Seconds an appended replacement takes to fade in.
pub const FADE_IN_SECONDS: f64 = 0.2;

/// Quadratic easing curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Constant rate.
    Linear,
    /// Accelerates from rest.
    In,
    /// Decelerates into place.
    Out,
    /// Accelerates, then decelerates.
    InOut,
}

impl Ease {
    /// Maps linear progress `p`, clamped to `0..=1`, through the curve.
    #[must_use]
    pub fn apply(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::In => p * p,
            Self::Out => p * (2.0 - p),
            Self::InOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    1.0 - 2.0 * (1.0 - p) * (1.0 - p)
                }
            }
        }
    }
}

/// The flight of a dismissed card: its center accelerates off the stage
/// while the card fades out.
///
/// Each direction has a fixed offscreen target for the card's center: a
/// left removal ends at `-container_width / 2`, a right removal at
/// `1.5 * container_width`. Both leave the card fully clear of the stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemovalMotion {
    start_center_x: f64,
    target_center_x: f64,
}

impl RemovalMotion {
    /// Plans a flight from the card's current center.
    #[must_use]
    pub fn new(direction: RemoveDirection, container_width: f64, start_center_x: f64) -> Self {
        Self {
            start_center_x,
            target_center_x: Self::offscreen_center_x(direction, container_width),
        }
    }

    /// Where a removal in `direction` parks the card's center.
    #[must_use]
    pub fn offscreen_center_x(direction: RemoveDirection, container_width: f64) -> f64 {
        match direction {
            RemoveDirection::Left => -container_width / 2.0,
            RemoveDirection::Right => 1.5 * container_width,
        }
    }

    /// Card center `t` seconds into the flight.
    #[must_use]
    pub fn center_x(&self, t: f64) -> f64 {
        let p = Ease::In.apply(t / REMOVAL_SECONDS);
        self.start_center_x + (self.target_center_x - self.start_center_x) * p
    }

    /// Card opacity `t` seconds into the flight, fading from 1 to 0.
    #[must_use]
    pub fn alpha(&self, t: f64) -> f64 {
        1.0 - Ease::In.apply(t / REMOVAL_SECONDS)
    }

    /// Whether the flight has reached its offscreen target.
    #[must_use]
    pub fn is_finished(&self, t: f64) -> bool {
        t >= REMOVAL_SECONDS
    }
}

/// The appended replacement's reveal: opacity 0 to 1, decelerating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FadeIn;

impl FadeIn {
    /// Opacity `t` seconds into the reveal.
    #[must_use]
    pub fn alpha(self, t: f64) -> f64 {
        Ease::Out.apply(t / FADE_IN_SECONDS)
    }
}
