// Copyright 2026 the Scrollspy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollspy Observer: the section activation engine.
//!
//! This crate wires the pure primitives from `scrollspy_activation` into a
//! single host-driven engine. [`ActivationEngine`] owns the snapshot table,
//! the scroll guard, and the live subscription set, and answers one question
//! at any point in time: which registered section id is the user's current
//! focus, or none.
//!
//! The host side of the contract is small:
//!
//! - Implement [`VisibilityFeed`] over whatever visibility mechanism the
//!   environment provides (an intersection-observer style API, a layout
//!   pass, a test stub). Observation handles release on drop, so the engine
//!   can never leak an observer.
//! - Call [`ActivationEngine::on_visibility_batch`] whenever the feed
//!   delivers reports, and [`ActivationEngine::on_scroll`] on every raw
//!   scroll event. Both return a change notification only when the active
//!   section actually moved.
//!
//! Everything runs on the thread that owns the engine; there are no
//! callbacks, no interior mutability, and no blocking.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use scrollspy_activation::VisibilitySnapshot;
//! use scrollspy_observer::{ActivationEngine, VisibilityFeed};
//!
//! // A toy host: sections are "mounted" if they appear in the list, and an
//! // observation needs no real resources.
//! struct Page {
//!     mounted: Vec<&'static str>,
//! }
//!
//! impl VisibilityFeed<&'static str> for Page {
//!     type Subscription = ();
//!
//!     fn observe(&mut self, key: &&'static str) -> Option<()> {
//!         self.mounted.contains(key).then_some(())
//!     }
//! }
//!
//! let mut page = Page { mounted: vec!["features", "pricing"] };
//! let mut engine = ActivationEngine::new();
//!
//! engine.register(&mut page, ["features", "pricing", "faq"]);
//! assert_eq!(engine.subscription_count(), 2); // "faq" is not mounted yet
//!
//! // The user scrolls into content and the feed reports visibility.
//! engine.on_scroll(420.0);
//! let change = engine.on_visibility_batch([
//!     ("features", VisibilitySnapshot::new(0.7, Rect::new(0.0, 60.0, 800.0, 900.0))),
//!     ("pricing", VisibilitySnapshot::new(0.2, Rect::new(0.0, 950.0, 800.0, 1700.0))),
//! ]);
//!
//! assert_eq!(change.unwrap().current, Some("features"));
//! assert_eq!(engine.active(), Some(&"features"));
//!
//! // Back at the top of the page nothing is active, however visible the
//! // first section is.
//! let cleared = engine.on_scroll(0.0);
//! assert_eq!(cleared.unwrap().current, None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod feed;

pub use engine::{ActivationEngine, ActiveChanged};
pub use feed::{ObserverConfig, VisibilityFeed};

// Re-export the core crate's vocabulary so hosts only need one import path.
pub use scrollspy_activation::{
    DEFAULT_TOP_THRESHOLD, GuardState, ScrollGuard, SnapshotTable, VisibilitySnapshot,
    resolve_active,
};
