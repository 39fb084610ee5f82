// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card data model.
//!
//! A *card* is one visual in the stack. Each card has:
//!
//! - An identity ([`CardId`]) — a generational handle that becomes stale when
//!   the card is destroyed, preventing use-after-free bugs at the API level.
//! - Content ([`ContentId`]) — an opaque token minted by the host's data
//!   source, carried through the stack untouched.
//! - A pose ([`CardPose`](crate::geometry::CardPose)) — the transform the
//!   host should present the card with, written by the controller.
//!
//! Cards are stored in struct-of-arrays layout with index-based handles.
//! Front-to-back ordering lives in the
//! [`StackModel`](crate::stack::StackModel), not here; the store only owns
//! allocation and per-card properties.

mod id;
mod store;

pub use id::{CardId, ContentId};
pub use store::CardStore;
