// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless swipeable card stack: state, geometry, and gestures.
//!
//! `cardstack_core` drives a stack of cards the user swipes away one at a
//! time, the way photo-triage and decision UIs do. It owns everything that
//! is pure logic (which cards exist, where each one sits, how a drag
//! resolves) and nothing that is presentation (views, animation clocks,
//! event loops). It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! The crate is organized around a controller that turns host input into
//! change sets the host presents:
//!
//! ```text
//!   Host (pointer events, reloads, layout)
//!       │
//!       ▼
//!   StackController ──► StackChanges ──► CardStage::apply()
//!       │    │                               │
//!       │    └─► CardSource::content_at()    │ animations run
//!       ▼                                    ▼
//!   StackModel ◄───── reads ───────── removal_finished() /
//!   card_pose() per index             snap_back_finished()
//! ```
//!
//! **[`card`]** — Struct-of-arrays card storage with generational handles.
//! Content comes from the host's data source; poses are written by the
//! controller.
//!
//! **[`stack`]** — The visible window: front-to-back order plus the
//! total/cursor/dismissed counters that locate it in the virtual list.
//!
//! **[`config`]** — Tunables (visible count, margin edge and spacing, split
//! distance) with validating setters.
//!
//! **[`geometry`]** — Pure pose math: per-index scale and lean, eased drag
//! following, and the split's full mirroring.
//!
//! **[`gesture`]** — The drag state machine: grab-point tilt, the split
//! latch, and commit/snap-back resolution on release.
//!
//! **[`controller`]** — The single writer. Applies gestures to the model
//! and returns [`StackChanges`](controller::StackChanges) change sets.
//!
//! **[`backend`]** — The [`CardSource`](backend::CardSource),
//! [`StackDelegate`](backend::StackDelegate), and
//! [`CardStage`](backend::CardStage) traits hosts implement.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for interaction instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-card
//!   pose events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod card;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod gesture;
pub mod stack;
pub mod trace;
