// Copyright 2026 the Scrollspy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The activation engine: binding, lifecycle, and change notification.

use alloc::vec::Vec;
use core::hash::Hash;

use scrollspy_activation::{ScrollGuard, SnapshotTable, VisibilitySnapshot, resolve_active};

use crate::feed::{ObserverConfig, VisibilityFeed};

/// Notification that the active section changed.
///
/// Emitted only on a real transition — recomputations that land on the same
/// winner produce no event, so hosts can apply styling work directly in
/// response. `previous` lets a navigation host un-highlight the old entry in
/// the same pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChanged<K> {
    /// The section that was active before this transition, if any.
    pub previous: Option<K>,
    /// The section that is active now, or `None` when no tracked section is
    /// the user's focus.
    pub current: Option<K>,
}

/// Tracks which registered section is the user's current focus.
///
/// The engine owns all mutable state — the snapshot table, the scroll
/// guard, the live subscription set, and the current active key — and is
/// driven entirely by explicit event-handler calls from the host binding
/// layer:
///
/// - [`ActivationEngine::on_visibility_batch`] for each delivery from the
///   host visibility feed (one or more per-section reports at a time).
/// - [`ActivationEngine::on_scroll`] for each raw scroll event.
///
/// Both handlers feed the same resolver and return
/// [`Some(ActiveChanged)`](ActiveChanged) only when the winner actually
/// changed; [`ActivationEngine::active`] can be polled at any time instead.
///
/// The two handlers may interleave in any order: each only reads the latest
/// snapshot table and scroll offset, so correctness does not depend on
/// delivery ordering. All work is `O(tracked sections)` and non-blocking.
///
/// # Lifecycle
///
/// [`ActivationEngine::register`] binds the engine to a section list through
/// a [`VisibilityFeed`], tearing down any previous observation set first so
/// stale subscriptions are released before new ones are made. Keys that do
/// not currently resolve to a live element are skipped; they can only become
/// active after a later re-registration. [`ActivationEngine::set_enabled`]
/// tears down on disable and re-registers the remembered section list on
/// enable. [`ActivationEngine::teardown`] releases everything; deliveries
/// arriving after teardown are ignored outright and mutate nothing.
#[derive(Debug)]
pub struct ActivationEngine<K: Eq + Hash, S> {
    config: ObserverConfig,
    keys: Vec<K>,
    subscriptions: Vec<S>,
    enabled: bool,
    observing: bool,
    table: SnapshotTable<K>,
    guard: ScrollGuard,
    active: Option<K>,
}

impl<K, S> Default for ActivationEngine<K, S>
where
    K: Clone + Eq + Hash + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> ActivationEngine<K, S>
where
    K: Clone + Eq + Hash + Ord,
{
    /// Creates an enabled engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ObserverConfig::default())
    }

    /// Creates an enabled engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: ObserverConfig) -> Self {
        Self {
            config,
            keys: Vec::new(),
            subscriptions: Vec::new(),
            enabled: true,
            observing: false,
            table: SnapshotTable::new(),
            guard: ScrollGuard::new(config.top_threshold()),
            active: None,
        }
    }

    /// The engine's observation configuration.
    #[must_use]
    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// The currently active section, or `None`.
    #[must_use]
    pub fn active(&self) -> Option<&K> {
        self.active.as_ref()
    }

    /// Returns `true` unless the engine has been disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` while a registration is live and deliveries are being
    /// applied.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Number of live subscriptions (registered keys that resolved to a
    /// mounted element).
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Binds the engine to a new section list.
    ///
    /// Any previous observation set is torn down first — subscriptions are
    /// released and the snapshot table is discarded before anything new is
    /// observed, so no stale callback can target the old table. Keys are
    /// observed in the given order; keys the feed cannot resolve to a live
    /// element are silently skipped.
    ///
    /// While disabled, the key list is remembered but nothing is observed
    /// until [`ActivationEngine::set_enabled`] turns the engine back on.
    pub fn register<F, I>(&mut self, feed: &mut F, keys: I) -> Option<ActiveChanged<K>>
    where
        F: VisibilityFeed<K, Subscription = S>,
        I: IntoIterator<Item = K>,
    {
        self.release();
        self.keys = keys.into_iter().collect();
        if self.enabled {
            self.subscribe(feed);
        }
        self.set_active(None)
    }

    /// Enables or disables the engine.
    ///
    /// Disabling tears down all observation state; enabling re-registers the
    /// remembered section list through `feed`.
    pub fn set_enabled<F>(&mut self, feed: &mut F, enabled: bool) -> Option<ActiveChanged<K>>
    where
        F: VisibilityFeed<K, Subscription = S>,
    {
        if self.enabled == enabled {
            return None;
        }
        self.enabled = enabled;
        if enabled {
            self.subscribe(feed);
            self.recompute()
        } else {
            self.release();
            self.set_active(None)
        }
    }

    /// Event handler for one delivery from the host visibility feed.
    ///
    /// Applies every report in the batch to the snapshot table (later
    /// entries win for a repeated key), then re-resolves. Deliveries that
    /// arrive while no registration is live — including after
    /// [`ActivationEngine::teardown`] — are ignored and mutate nothing.
    pub fn on_visibility_batch<I>(&mut self, updates: I) -> Option<ActiveChanged<K>>
    where
        I: IntoIterator<Item = (K, VisibilitySnapshot)>,
    {
        if !self.observing {
            return None;
        }
        self.table.apply_batch(updates);
        self.recompute()
    }

    /// Event handler for one raw scroll event.
    ///
    /// Records the offset in the scroll guard. While the page is at the top
    /// the active section is forced to `None` without consulting the
    /// resolver; otherwise the snapshot table is re-resolved as usual.
    /// Ignored while disabled.
    pub fn on_scroll(&mut self, offset: f64) -> Option<ActiveChanged<K>> {
        if !self.enabled {
            return None;
        }
        self.guard.on_scroll(offset);
        self.recompute()
    }

    /// Releases all observation state.
    ///
    /// Every subscription is dropped (ending its observation), the snapshot
    /// table is discarded, and the active section resets to `None`. The
    /// remembered section list is kept so a later
    /// [`ActivationEngine::register`] or re-enable can start fresh.
    pub fn teardown(&mut self) -> Option<ActiveChanged<K>> {
        self.release();
        self.set_active(None)
    }

    /// Drops subscriptions and discards the table without touching the
    /// active value.
    fn release(&mut self) {
        self.subscriptions.clear();
        self.table.clear();
        self.observing = false;
    }

    /// Observes every remembered key that resolves to a live element.
    fn subscribe<F>(&mut self, feed: &mut F)
    where
        F: VisibilityFeed<K, Subscription = S>,
    {
        for key in &self.keys {
            if let Some(subscription) = feed.observe(key) {
                self.subscriptions.push(subscription);
            }
        }
        self.observing = true;
    }

    /// Re-runs resolution over the current table, gated by the guard.
    fn recompute(&mut self) -> Option<ActiveChanged<K>> {
        let next = if self.guard.is_at_top() {
            None
        } else {
            resolve_active(&self.table).cloned()
        };
        self.set_active(next)
    }

    /// Installs a new active value, reporting a change only on a real
    /// transition.
    fn set_active(&mut self, next: Option<K>) -> Option<ActiveChanged<K>> {
        if self.active == next {
            return None;
        }
        let previous = core::mem::replace(&mut self.active, next.clone());
        Some(ActiveChanged {
            previous,
            current: next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use kurbo::Rect;

    /// Test feed: a fixed set of "mounted" sections plus a live-subscription
    /// counter decremented from each subscription's `Drop`.
    struct TestFeed {
        mounted: Vec<String>,
        live: Rc<Cell<usize>>,
    }

    struct TestSubscription {
        live: Rc<Cell<usize>>,
    }

    impl Drop for TestSubscription {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    impl TestFeed {
        fn mounting(mounted: &[&str]) -> Self {
            Self {
                mounted: mounted.iter().map(|id| id.to_string()).collect(),
                live: Rc::new(Cell::new(0)),
            }
        }

        fn live_count(&self) -> usize {
            self.live.get()
        }
    }

    impl VisibilityFeed<String> for TestFeed {
        type Subscription = TestSubscription;

        fn observe(&mut self, key: &String) -> Option<TestSubscription> {
            if !self.mounted.contains(key) {
                return None;
            }
            self.live.set(self.live.get() + 1);
            Some(TestSubscription {
                live: Rc::clone(&self.live),
            })
        }
    }

    type Engine = ActivationEngine<String, TestSubscription>;

    fn snap(ratio: f64, top: f64) -> VisibilitySnapshot {
        VisibilitySnapshot::new(ratio, Rect::new(0.0, top, 800.0, top + 600.0))
    }

    fn batch(entries: &[(&str, f64, f64)]) -> Vec<(String, VisibilitySnapshot)> {
        entries
            .iter()
            .map(|&(id, ratio, top)| (id.to_string(), snap(ratio, top)))
            .collect()
    }

    /// Registers `sections` and scrolls past the top threshold.
    fn scrolled_engine(feed: &mut TestFeed, sections: &[&str]) -> Engine {
        let mut engine = Engine::new();
        engine.register(feed, sections.iter().map(|id| id.to_string()));
        engine.on_scroll(500.0);
        engine
    }

    #[test]
    fn tie_on_ratio_breaks_to_smaller_top() {
        let mut feed = TestFeed::mounting(&["a", "b"]);
        let mut engine = scrolled_engine(&mut feed, &["a", "b"]);

        let change = engine.on_visibility_batch(batch(&[("a", 0.4, 50.0), ("b", 0.4, 10.0)]));

        assert_eq!(engine.active(), Some(&"b".to_string()));
        assert_eq!(
            change,
            Some(ActiveChanged {
                previous: None,
                current: Some("b".to_string()),
            })
        );
    }

    #[test]
    fn nothing_intersecting_means_no_active_section() {
        // Between sections: everything reported, nothing visible.
        let mut feed = TestFeed::mounting(&["a", "b"]);
        let mut engine = scrolled_engine(&mut feed, &["a", "b"]);

        let change = engine.on_visibility_batch(batch(&[("a", 0.0, -700.0), ("b", 0.0, 1400.0)]));

        assert_eq!(engine.active(), None);
        assert_eq!(change, None);
    }

    #[test]
    fn at_top_overrides_a_would_be_winner() {
        // Offset 20 is below the default threshold of 100.
        let mut feed = TestFeed::mounting(&["a"]);
        let mut engine = Engine::new();
        engine.register(&mut feed, vec!["a".to_string()]);

        engine.on_scroll(20.0);
        let change = engine.on_visibility_batch(batch(&[("a", 0.9, 0.0)]));

        assert_eq!(engine.active(), None);
        assert_eq!(change, None);
    }

    #[test]
    fn highest_ratio_wins_after_scrolling() {
        // Clear ratio winner once the page has scrolled into content.
        let mut feed = TestFeed::mounting(&["a", "b"]);
        let mut engine = scrolled_engine(&mut feed, &["a", "b"]);

        engine.on_visibility_batch(batch(&[("a", 0.9, -10.0), ("b", 0.3, 200.0)]));

        assert_eq!(engine.active(), Some(&"a".to_string()));
    }

    #[test]
    fn unmounted_keys_are_skipped_silently() {
        // "y" has no mounted element yet.
        let mut feed = TestFeed::mounting(&["x"]);
        let mut engine = scrolled_engine(&mut feed, &["x", "y"]);

        assert_eq!(engine.subscription_count(), 1);
        assert_eq!(feed.live_count(), 1);

        // Only "x" is observed, so only "x" can ever be reported or become
        // active until "y" mounts and registration is retried.
        engine.on_visibility_batch(batch(&[("x", 0.5, 40.0)]));
        assert_eq!(engine.active(), Some(&"x".to_string()));
    }

    #[test]
    fn reregistration_after_mount_picks_up_new_sections() {
        let mut feed = TestFeed::mounting(&["x"]);
        let mut engine = scrolled_engine(&mut feed, &["x", "y"]);
        assert_eq!(engine.subscription_count(), 1);

        // "y" mounts; the caller re-registers.
        feed.mounted.push("y".to_string());
        engine.register(&mut feed, vec!["x".to_string(), "y".to_string()]);

        assert_eq!(engine.subscription_count(), 2);
        assert_eq!(feed.live_count(), 2);
    }

    #[test]
    fn unchanged_winner_emits_no_duplicate_notification() {
        let mut feed = TestFeed::mounting(&["a", "b"]);
        let mut engine = scrolled_engine(&mut feed, &["a", "b"]);

        let first = engine.on_visibility_batch(batch(&[("a", 0.6, 30.0)]));
        assert!(first.is_some());

        // Same winner from a fresh delivery and from a scroll tick.
        let second = engine.on_visibility_batch(batch(&[("a", 0.6, 30.0)]));
        assert_eq!(second, None);
        let third = engine.on_scroll(520.0);
        assert_eq!(third, None);
        assert_eq!(engine.active(), Some(&"a".to_string()));
    }

    #[test]
    fn scrolling_back_to_top_clears_and_reports_the_transition() {
        let mut feed = TestFeed::mounting(&["a"]);
        let mut engine = scrolled_engine(&mut feed, &["a"]);
        engine.on_visibility_batch(batch(&[("a", 0.8, 10.0)]));
        assert_eq!(engine.active(), Some(&"a".to_string()));

        let change = engine.on_scroll(0.0);
        assert_eq!(
            change,
            Some(ActiveChanged {
                previous: Some("a".to_string()),
                current: None,
            })
        );

        // Crossing back down again restores the resolver's answer.
        let back = engine.on_scroll(400.0);
        assert_eq!(back.unwrap().current, Some("a".to_string()));
    }

    #[test]
    fn teardown_releases_subscriptions_and_ignores_late_deliveries() {
        let mut feed = TestFeed::mounting(&["a", "b"]);
        let mut engine = scrolled_engine(&mut feed, &["a", "b"]);
        engine.on_visibility_batch(batch(&[("a", 0.7, 25.0)]));
        assert_eq!(feed.live_count(), 2);

        let change = engine.teardown();
        assert_eq!(feed.live_count(), 0);
        assert_eq!(engine.active(), None);
        assert_eq!(change.unwrap().previous, Some("a".to_string()));

        // A stale callback after teardown must not touch the table.
        let late = engine.on_visibility_batch(batch(&[("b", 0.9, 5.0)]));
        assert_eq!(late, None);
        assert_eq!(engine.active(), None);
        assert_eq!(engine.subscription_count(), 0);
    }

    #[test]
    fn reregistration_tears_down_before_observing_again() {
        let mut feed = TestFeed::mounting(&["a", "b", "c"]);
        let mut engine = scrolled_engine(&mut feed, &["a", "b"]);
        engine.on_visibility_batch(batch(&[("a", 0.5, 10.0)]));
        assert_eq!(feed.live_count(), 2);

        let change = engine.register(&mut feed, vec!["c".to_string()]);

        // Old subscriptions are gone, the table restarted empty, and the
        // previously active section was cleared.
        assert_eq!(feed.live_count(), 1);
        assert_eq!(engine.subscription_count(), 1);
        assert_eq!(change.unwrap().previous, Some("a".to_string()));
        assert_eq!(engine.active(), None);
    }

    #[test]
    fn disable_tears_down_and_enable_resubscribes() {
        let mut feed = TestFeed::mounting(&["a"]);
        let mut engine = scrolled_engine(&mut feed, &["a"]);
        engine.on_visibility_batch(batch(&[("a", 0.8, 0.0)]));
        assert_eq!(feed.live_count(), 1);

        let change = engine.set_enabled(&mut feed, false);
        assert_eq!(feed.live_count(), 0);
        assert!(!engine.is_observing());
        assert_eq!(change.unwrap().current, None);

        // Scroll and visibility events are ignored while disabled.
        assert_eq!(engine.on_scroll(900.0), None);
        assert_eq!(engine.on_visibility_batch(batch(&[("a", 0.9, 0.0)])), None);
        assert_eq!(engine.active(), None);

        // Re-enable re-registers the remembered key list.
        engine.set_enabled(&mut feed, true);
        assert_eq!(feed.live_count(), 1);
        assert!(engine.is_observing());
    }

    #[test]
    fn set_enabled_is_idempotent() {
        let mut feed = TestFeed::mounting(&["a"]);
        let mut engine = scrolled_engine(&mut feed, &["a"]);

        assert_eq!(engine.set_enabled(&mut feed, true), None);
        assert_eq!(feed.live_count(), 1);
    }

    #[test]
    fn register_while_disabled_defers_observation() {
        let mut feed = TestFeed::mounting(&["a"]);
        let mut engine = Engine::new();
        engine.set_enabled(&mut feed, false);

        engine.register(&mut feed, vec!["a".to_string()]);
        assert_eq!(feed.live_count(), 0);
        assert!(!engine.is_observing());

        engine.set_enabled(&mut feed, true);
        assert_eq!(feed.live_count(), 1);
    }

    #[test]
    fn visibility_and_scroll_events_interleave_freely() {
        let mut feed = TestFeed::mounting(&["a", "b"]);
        let mut engine = Engine::new();
        engine.register(&mut feed, vec!["a".to_string(), "b".to_string()]);

        // Visibility arrives before any scroll: guard still at top.
        engine.on_visibility_batch(batch(&[("a", 0.6, 80.0)]));
        assert_eq!(engine.active(), None);

        // Scroll past the threshold: the accumulated table takes over.
        let change = engine.on_scroll(300.0);
        assert_eq!(change.unwrap().current, Some("a".to_string()));

        // A later batch flips the winner without any scroll in between.
        let flip = engine.on_visibility_batch(batch(&[("b", 0.9, 120.0)]));
        assert_eq!(flip.unwrap().current, Some("b".to_string()));
    }

    #[test]
    fn empty_registration_is_valid() {
        let mut feed = TestFeed::mounting(&[]);
        let mut engine = Engine::new();
        let change = engine.register(&mut feed, Vec::new());

        assert_eq!(change, None);
        assert_eq!(engine.subscription_count(), 0);
        assert_eq!(engine.on_scroll(400.0), None);
        assert_eq!(engine.active(), None);
    }

    #[test]
    fn custom_top_threshold_is_respected() {
        let mut feed = TestFeed::mounting(&["a"]);
        let mut engine = Engine::with_config(ObserverConfig::new().with_top_threshold(10.0));
        engine.register(&mut feed, vec!["a".to_string()]);

        engine.on_scroll(20.0);
        let change = engine.on_visibility_batch(batch(&[("a", 0.9, 0.0)]));

        // Offset 20 is past a threshold of 10, so activation proceeds.
        assert_eq!(change.unwrap().current, Some("a".to_string()));
    }
}
