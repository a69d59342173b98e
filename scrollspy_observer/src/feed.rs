// Copyright 2026 the Scrollspy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host visibility-feed seam and its observation configuration.

use alloc::vec::Vec;

use scrollspy_activation::DEFAULT_TOP_THRESHOLD;

/// A host capability that can begin observing one section's visibility.
///
/// The feed is the environment-provided half of the engine: something that,
/// given a section key, can locate the corresponding live element and start
/// streaming visibility reports for it (in a browser host, an
/// intersection-observer registration; in tests, a stub).
///
/// Two rules shape the contract:
///
/// - **Unmounted keys are skipped, not errors.** [`VisibilityFeed::observe`]
///   returns `None` when the key does not currently resolve to a live
///   element; the engine silently moves on, and that key can only become
///   active after it mounts and registration is retried.
/// - **Subscriptions release on drop.** The returned handle owns the
///   observation; dropping it must end the observation. The engine holds
///   every handle for exactly as long as it wants reports and drops them all
///   on teardown, so no observer can leak regardless of exit path.
///
/// Visibility reports do not flow through this trait. The host binding layer
/// pushes them into [`ActivationEngine::on_visibility_batch`] explicitly,
/// which keeps the snapshot table exclusively owned by the engine.
///
/// [`ActivationEngine::on_visibility_batch`]: crate::ActivationEngine::on_visibility_batch
pub trait VisibilityFeed<K> {
    /// Owned handle for one live observation; dropping it ends the
    /// observation.
    type Subscription;

    /// Begins observing the section identified by `key`.
    ///
    /// Returns `None` when the key does not currently resolve to a live
    /// element.
    fn observe(&mut self, key: &K) -> Option<Self::Subscription>;
}

/// Observation configuration for an [`ActivationEngine`].
///
/// [`ActivationEngine`]: crate::ActivationEngine
///
/// Carries the two tunables the engine and its host share:
///
/// - `threshold_count`: how many evenly spaced ratio thresholds the host
///   should request from its native observer. The default of 101 (every 1%)
///   yields near-continuous ratio updates and visually smooth switching;
///   hosts with coarser needs can lower it.
/// - `top_threshold`: the scroll offset below which the page counts as "at
///   the top" and no section is active. See
///   [`ScrollGuard`](scrollspy_activation::ScrollGuard).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverConfig {
    threshold_count: usize,
    top_threshold: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold_count: 101,
            top_threshold: DEFAULT_TOP_THRESHOLD,
        }
    }
}

impl ObserverConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of evenly spaced ratio thresholds.
    #[must_use]
    pub fn with_threshold_count(mut self, count: usize) -> Self {
        self.threshold_count = count;
        self
    }

    /// Sets the top-of-page scroll threshold.
    #[must_use]
    pub fn with_top_threshold(mut self, threshold: f64) -> Self {
        self.top_threshold = threshold;
        self
    }

    /// Number of evenly spaced ratio thresholds the host should observe at.
    #[must_use]
    pub fn threshold_count(&self) -> usize {
        self.threshold_count
    }

    /// Scroll offset below which no section counts as active.
    #[must_use]
    pub fn top_threshold(&self) -> f64 {
        self.top_threshold
    }

    /// The evenly spaced ratio thresholds in `[0, 1]`, for hosts whose
    /// native observer wants them spelled out.
    ///
    /// The default configuration yields `[0.0, 0.01, .., 1.0]`.
    #[must_use]
    pub fn ratio_thresholds(&self) -> Vec<f64> {
        match self.threshold_count {
            0 => Vec::new(),
            1 => alloc::vec![0.0],
            count => (0..count)
                .map(|i| i as f64 / (count - 1) as f64)
                .collect(),
        }
    }
}
