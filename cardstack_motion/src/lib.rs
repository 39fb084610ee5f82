// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion curves for presenting a card stack.
//!
//! [`cardstack_core`] decides *what* moves; hosts decide how it looks over
//! time. This crate provides the reference curves:
//!
//! - [`SpringCurve`] — the snap-back spring, with a light overshoot
//! - [`RemovalMotion`] — a dismissed card's flight off the stage
//! - [`FadeIn`] — an appended replacement's reveal
//! - [`Ease`] — the quadratic easing family the fixed-duration curves use

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod removal;
mod spring;

pub use removal::{Ease, FADE_IN_SECONDS, FadeIn, REMOVAL_SECONDS, RemovalMotion};
pub use spring::SpringCurve;
