//! Per-port table of merged address intervals.

use crate::Interval;

/// Sorted, pairwise-disjoint address intervals permitted on one port.
///
/// Every insertion keeps two invariants:
/// 1. entries are sorted ascending by `min`;
/// 2. for any entries `a` before `b`, `a.max < b.min`.
///
/// Overlapping intervals are merged on insertion. Intervals that merely touch
/// (`[1,3]` and `[4,6]`) stay separate entries; lookups are unaffected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTable {
    ranges: Vec<Interval>,
}

impl RangeTable {
    /// Create an empty table, which rejects every address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored intervals.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if no address is permitted.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The stored intervals in ascending order.
    pub fn ranges(&self) -> &[Interval] {
        &self.ranges
    }

    /// Merge `new` into the table.
    pub fn insert(&mut self, new: Interval) {
        for j in 0..self.ranges.len() {
            let existing = &mut self.ranges[j];

            // Upper bound already covered: at most the lower bound grows.
            if existing.contains(new.max) {
                existing.min = existing.min.min(new.min);
                return;
            }

            // `new` swallows this entry's upper bound and may run into later ones.
            if new.contains(existing.max) {
                existing.min = existing.min.min(new.min);
                existing.max = new.max;
                self.absorb_following(j);
                return;
            }
        }

        let pos = self
            .ranges
            .iter()
            .position(|r| r.min > new.min)
            .unwrap_or(self.ranges.len());
        self.ranges.insert(pos, new);
    }

    /// Fold entries after `j` that overlap the freshly widened entry `j` into it.
    ///
    /// The absorbed entries are contiguous, so they go in a single drain.
    fn absorb_following(&mut self, j: usize) {
        let mut widened = self.ranges[j];
        let mut end = j + 1;

        while let Some(next) = self.ranges.get(end) {
            if widened.covers(next) {
                end += 1;
                continue;
            }
            if next.contains(widened.max) {
                widened.max = next.max;
                end += 1;
            }
            break;
        }

        self.ranges[j] = widened;
        self.ranges.drain(j + 1..end);
    }

    /// Binary search for an interval containing `addr`.
    pub fn contains(&self, addr: u32) -> bool {
        let mut low = 0usize;
        let mut high = self.ranges.len();

        // Half-open window [low, high) so `mid - 1` never underflows.
        while low < high {
            let mid = low + (high - low) / 2;
            let range = &self.ranges[mid];
            if range.contains(addr) {
                return true;
            }
            if range.precedes(addr) {
                low = mid + 1;
            } else {
                debug_assert!(range.follows(addr));
                high = mid;
            }
        }

        false
    }
}

impl FromIterator<Interval> for RangeTable {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        let mut table = RangeTable::new();
        for interval in iter {
            table.insert(interval);
        }
        table
    }
}
