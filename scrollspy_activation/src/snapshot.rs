// Copyright 2026 the Scrollspy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Latest-known visibility of a single tracked section.

use kurbo::Rect;

/// The most recent visibility report for one section.
///
/// Snapshots are latest-value-only: each new report for a section replaces
/// the previous one wholesale, and no history is kept. A snapshot records:
///
/// - `ratio`: the fraction of the section currently inside the viewport,
///   clamped into `[0, 1]` on construction.
/// - `intersecting`: whether any part of the section is visible at all.
///   [`VisibilitySnapshot::new`] derives this as `ratio > 0`; hosts whose
///   feed reports the flag independently (some report an edge-touching
///   element as intersecting at ratio `0`) can pass it through with
///   [`VisibilitySnapshot::with_intersecting`].
/// - `bounds`: the section's bounding rectangle in viewport coordinates.
///   Only the top edge participates in activation tie-breaking, but the full
///   rectangle is kept so hosts can reuse it (e.g. for scroll-into-view).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilitySnapshot {
    ratio: f64,
    intersecting: bool,
    bounds: Rect,
}

impl VisibilitySnapshot {
    /// Creates a snapshot from a visibility ratio and bounding geometry.
    ///
    /// The ratio is clamped into `[0, 1]`; the intersecting flag is derived
    /// as `ratio > 0`.
    #[must_use]
    pub fn new(ratio: f64, bounds: Rect) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        Self {
            ratio,
            intersecting: ratio > 0.0,
            bounds,
        }
    }

    /// Creates a snapshot with an explicitly host-reported intersecting flag.
    ///
    /// The ratio is still clamped into `[0, 1]`.
    #[must_use]
    pub fn with_intersecting(ratio: f64, intersecting: bool, bounds: Rect) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            intersecting,
            bounds,
        }
    }

    /// Fraction of the section currently visible, in `[0, 1]`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Returns `true` if any part of the section is visible.
    #[must_use]
    pub fn is_intersecting(&self) -> bool {
        self.intersecting
    }

    /// Bounding rectangle in viewport coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Signed distance from the viewport's top edge to the section's top
    /// edge.
    ///
    /// Negative once the section's top has scrolled above the viewport.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.bounds.y0
    }
}
