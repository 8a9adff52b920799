//! Fractional order keys and the midpoint allocator
//!
//! Rows are sorted by [`OrderKey`], a totally-ordered `f64` wrapper. New
//! keys are allocated by arithmetic midpoint between neighbors (or a fixed
//! stride past a single neighbor), so any number of rows can be inserted
//! between two existing rows without renumbering the rest.
//!
//! # Precision bound
//! Midpoint insertion halves the gap each time. Repeatedly inserting
//! between the same two neighbors exhausts `f64` precision after roughly
//! fifty insertions and the allocated key collapses onto a neighbor. This
//! is an accepted bound for a human-authored planning grid (tens to low
//! hundreds of rows); it is not detected or repaired. A lexicographic
//! string key space would remove the bound.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Totally-ordered fractional row key
///
/// Only relative order matters; the sequence need not be contiguous.
/// Ordering uses [`f64::total_cmp`], so keys are usable as sort keys
/// without NaN caveats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderKey(f64);

/// Gap left between consecutive derived keys, so custom rows can be
/// interleaved by midpoint without immediately hitting neighbors.
pub const ORDER_STRIDE: f64 = 10.0;

impl OrderKey {
    /// Key at the origin of the sequence
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Wrap a raw key value
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Derived key for the structural row at traversal position `index`
    #[inline]
    #[must_use]
    pub fn from_position(index: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self(index as f64 * ORDER_STRIDE)
    }

    /// Raw key value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Key one stride before this one
    #[inline]
    #[must_use]
    pub fn before(self) -> Self {
        Self(self.0 - ORDER_STRIDE)
    }

    /// Key one stride after this one
    #[inline]
    #[must_use]
    pub fn after(self) -> Self {
        Self(self.0 + ORDER_STRIDE)
    }

    /// Arithmetic midpoint of two keys
    #[inline]
    #[must_use]
    pub fn midpoint(a: Self, b: Self) -> Self {
        Self(a.0 / 2.0 + b.0 / 2.0)
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::fmt::Display for OrderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocate a key strictly between two optional neighbors
///
/// - both neighbors: arithmetic midpoint
/// - only a predecessor: one stride after it
/// - only a successor: one stride before it
/// - neither: the origin key
///
/// Callers must pass neighbors read from the *current* merged row
/// sequence; keys computed from a stale snapshot may collide.
#[must_use]
pub fn allocate_between(before: Option<OrderKey>, after: Option<OrderKey>) -> OrderKey {
    match (before, after) {
        (Some(a), Some(b)) => OrderKey::midpoint(a, b),
        (Some(a), None) => a.after(),
        (None, Some(b)) => b.before(),
        (None, None) => OrderKey::zero(),
    }
}
