// Copyright 2026 the Scrollspy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure resolution of the active section from a snapshot table.

use core::cmp::Ordering;
use core::hash::Hash;

use crate::snapshot::VisibilitySnapshot;
use crate::table::SnapshotTable;

/// Picks the single best focus target from the table, or `None` when no
/// tracked section is visible.
///
/// Only intersecting entries are considered. Among those, the entry with the
/// highest visibility ratio wins. Ratio ties break to the entry whose top
/// edge is closest to (or furthest above) the viewport top — the section
/// that comes first in vertical reading order on screen. An exact
/// ratio-and-top tie breaks to the smaller key, so the result is a total
/// function of the table's contents and never depends on map iteration
/// order.
///
/// Zero intersecting entries is the normal state between sections or above
/// and below all tracked regions, not an error.
///
/// This function is deterministic and side-effect-free; resolving twice over
/// an unchanged table yields the same answer.
///
/// ```rust
/// use kurbo::Rect;
/// use scrollspy_activation::{SnapshotTable, VisibilitySnapshot, resolve_active};
///
/// let mut table = SnapshotTable::new();
/// table.apply("a", VisibilitySnapshot::new(0.4, Rect::new(0.0, 50.0, 800.0, 650.0)));
/// table.apply("b", VisibilitySnapshot::new(0.4, Rect::new(0.0, 10.0, 800.0, 610.0)));
///
/// // Equal ratios: the section nearer the top wins.
/// assert_eq!(resolve_active(&table), Some(&"b"));
/// ```
#[must_use]
pub fn resolve_active<K>(table: &SnapshotTable<K>) -> Option<&K>
where
    K: Eq + Hash + Ord,
{
    let mut best: Option<(&K, &VisibilitySnapshot)> = None;
    for (key, snapshot) in table {
        if !snapshot.is_intersecting() {
            continue;
        }
        if best.is_none_or(|current| beats(key, snapshot, current)) {
            best = Some((key, snapshot));
        }
    }
    best.map(|(key, _)| key)
}

/// Returns `true` if `(key, snapshot)` should win over `current`.
fn beats<K: Ord>(key: &K, snapshot: &VisibilitySnapshot, current: (&K, &VisibilitySnapshot)) -> bool {
    let (current_key, current_snapshot) = current;
    match snapshot.ratio().total_cmp(&current_snapshot.ratio()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match snapshot.top().total_cmp(&current_snapshot.top()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => key < current_key,
        },
    }
}
