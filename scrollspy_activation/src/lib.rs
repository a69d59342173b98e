// Copyright 2026 the Scrollspy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollspy Activation: core primitives for viewport section activation.
//!
//! As a user scrolls a long document, navigation UIs want to highlight the
//! entry for the one section the user is currently focused on. This crate
//! provides the renderer-agnostic core of that decision:
//!
//! - [`VisibilitySnapshot`]: the latest-known visibility of one section —
//!   intersection ratio, an intersecting flag, and bounding geometry in
//!   viewport coordinates.
//! - [`SnapshotTable`]: a keyed latest-value store holding one snapshot per
//!   tracked section.
//! - [`resolve_active`]: a pure function that picks the single best focus
//!   target from a table, or `None` when nothing is visible.
//! - [`ScrollGuard`]: a small two-state machine that forces "no active
//!   section" while the page still sits at (or near) the top.
//!
//! This crate deliberately does **not** know about documents, DOM elements,
//! or any particular UI stack. Host frameworks are responsible for:
//!
//! - Observing real elements and delivering visibility reports (for example
//!   through an intersection-observer style API).
//! - Writing each report into a [`SnapshotTable`] keyed by section id.
//! - Calling [`resolve_active`] after each delivery, gated by a
//!   [`ScrollGuard`] fed from raw scroll events.
//!
//! The companion `scrollspy_observer` crate packages that wiring into a
//! single engine with subscription lifecycle and change notification.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use scrollspy_activation::{SnapshotTable, VisibilitySnapshot, resolve_active};
//!
//! let mut table = SnapshotTable::new();
//!
//! // "intro" is mostly visible; "pricing" is just peeking in from below.
//! table.apply("intro", VisibilitySnapshot::new(0.8, Rect::new(0.0, 40.0, 800.0, 640.0)));
//! table.apply("pricing", VisibilitySnapshot::new(0.1, Rect::new(0.0, 700.0, 800.0, 1300.0)));
//!
//! assert_eq!(resolve_active(&table), Some(&"intro"));
//! ```
//!
//! All coordinates live in the host's viewport space (typically CSS pixels):
//! a snapshot's [`top`](VisibilitySnapshot::top) is the signed distance from
//! the viewport's top edge to the section's top edge, negative once the
//! section's top has scrolled past. Ratios and offsets are expected to be
//! finite. This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod guard;
mod resolve;
mod snapshot;
mod table;

pub use guard::{DEFAULT_TOP_THRESHOLD, GuardState, ScrollGuard};
pub use resolve::resolve_active;
pub use snapshot::VisibilitySnapshot;
pub use table::SnapshotTable;
