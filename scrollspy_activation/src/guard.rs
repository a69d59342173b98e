// Copyright 2026 the Scrollspy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-of-page guard: suppress activation until the user has scrolled into
//! content.
//!
//! Intersection ratios alone cannot distinguish "the user scrolled to
//! section one" from "the page just loaded and section one happens to fill
//! the viewport" — a hero banner that is itself a tracked section reports a
//! high ratio at scroll offset zero. [`ScrollGuard`] disambiguates the two
//! by watching the raw scroll offset: while the offset sits below a
//! threshold, no section counts as active.

/// Default top threshold, in the host's scroll-offset units (typically CSS
/// pixels).
///
/// This is a heuristic, not a contract: the useful value depends on the
/// height of whatever sits above the first tracked section. Hosts with a
/// short or absent hero should tune it via [`ScrollGuard::new`].
pub const DEFAULT_TOP_THRESHOLD: f64 = 100.0;

/// Which of the guard's two states the latest scroll offset selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// The page is at (or near) the top; the active section is forced to
    /// "none".
    AtTop,
    /// The user has scrolled into content; activation is governed by the
    /// resolver.
    Scrolled,
}

/// Two-state machine over the latest raw scroll offset.
///
/// Feed every raw scroll event through [`ScrollGuard::on_scroll`]; it
/// records the offset and reports the state it selects. The machine is
/// live for the guard's entire lifetime and transitions freely in both
/// directions as the offset crosses the threshold.
///
/// A fresh guard assumes offset `0.0` — a freshly loaded page sits at the
/// top. Hosts that restore a scroll position should deliver one scroll
/// report immediately after setup.
///
/// Offsets strictly below the threshold are [`GuardState::AtTop`]; negative
/// offsets (overscroll rubber-banding) count as at the top as well.
///
/// ```rust
/// use scrollspy_activation::{GuardState, ScrollGuard};
///
/// let mut guard = ScrollGuard::new(100.0);
/// assert!(guard.is_at_top());
///
/// assert_eq!(guard.on_scroll(350.0), GuardState::Scrolled);
/// assert_eq!(guard.on_scroll(20.0), GuardState::AtTop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGuard {
    threshold: f64,
    offset: f64,
}

impl Default for ScrollGuard {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_THRESHOLD)
    }
}

impl ScrollGuard {
    /// Creates a guard with a custom top threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            offset: 0.0,
        }
    }

    /// The configured top threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The most recently reported scroll offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Records a raw scroll event and returns the resulting state.
    pub fn on_scroll(&mut self, offset: f64) -> GuardState {
        self.offset = offset;
        self.state()
    }

    /// The state selected by the most recent offset.
    #[must_use]
    pub fn state(&self) -> GuardState {
        if self.offset < self.threshold {
            GuardState::AtTop
        } else {
            GuardState::Scrolled
        }
    }

    /// Returns `true` while the guard forces the active section to "none".
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        self.state() == GuardState::AtTop
    }
}
