//! Two interchangeable key/value dictionaries behind one trait surface.
//!
//! [`HashDictionary`] is a separate-chaining hash table with load-factor
//! driven growing and shrinking; [`BstDictionary`] is an unbalanced binary
//! search tree ordered by a caller-supplied comparator, adding in-order and
//! range-bounded traversal on top of the shared contract. Code written against
//! [`Dictionary`] (and [`OrderedDictionary`] where key order matters) can swap
//! one implementation for the other.
//!
//! Both structures offer internal iteration through a visitor callback that
//! returns `false` to stop early, and external iteration through a [`Cursor`]
//! with explicit `has_next`/`current`/`advance` steps. Lookups and removals of
//! absent keys fail with [`KeyNotFound`]; cursors driven past their last
//! element fail with [`Exhausted`]. These are caller contract violations and
//! surface immediately as distinct error values.
//!
//! Neither structure is thread-safe or persistent. A cursor borrows the
//! dictionary it came from, so the borrow checker already enforces the
//! single-writer precondition: no mutation can happen while a cursor is live.

mod bst;
mod hash;

#[cfg(test)]
mod test_hash;

pub use bst::{BstDictionary, TreeCursor};
pub use hash::{HashCursor, HashDictionary};

use std::fmt;

/// Error returned by [`Dictionary::get`] and [`Dictionary::remove`] for a key
/// that is not present.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found in dictionary")
    }
}

impl std::error::Error for KeyNotFound {}

/// Error returned by [`Cursor::current`] and [`Cursor::advance`] once the
/// cursor has moved past the last element.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Exhausted;

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cursor is exhausted")
    }
}

impl std::error::Error for Exhausted {}

/// Shared contract of the key/value dictionaries in this crate.
///
/// Keys are unique: inserting a key that is already present overwrites its
/// value in place and leaves [`len`](Dictionary::len) unchanged.
pub trait Dictionary<K, V> {
    /// External cursor over the dictionary's entries.
    type Cursor<'a>: Cursor<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Stores `value` under `key`, overwriting any previous value.
    fn insert(&mut self, key: K, value: V);

    /// Returns `true` if `key` is present.
    fn contains(&self, key: &K) -> bool;

    /// Returns a reference to the value stored under `key`.
    fn get(&self, key: &K) -> Result<&V, KeyNotFound>;

    /// Removes `key` and returns the value that was stored under it.
    fn remove(&mut self, key: &K) -> Result<V, KeyNotFound>;

    /// Returns the number of stored keys.
    fn len(&self) -> usize;

    /// Returns `true` if no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `visit` on every entry, stopping early when the visitor returns
    /// `false`.
    ///
    /// Implementations choose the visitation order; only
    /// [`OrderedDictionary`] implementations guarantee ascending key order.
    fn for_each(&self, visit: impl FnMut(&K, &V) -> bool);

    /// Returns a cursor positioned at the first entry, or already exhausted
    /// when the dictionary is empty.
    fn cursor(&self) -> Self::Cursor<'_>;
}

/// External cursor with an explicit position.
///
/// A cursor is either positioned on an entry or exhausted. It starts out
/// positioned on the first entry (or exhausted for an empty structure) and
/// [`advance`](Cursor::advance) moves it forward one entry at a time;
/// exhaustion is terminal. The cursor borrows the structure it traverses, so
/// the structure cannot be mutated while the cursor is alive.
pub trait Cursor<'a, K, V> {
    /// Returns `true` if the cursor is positioned on an entry.
    fn has_next(&self) -> bool;

    /// Returns the entry the cursor is positioned on.
    fn current(&self) -> Result<(&'a K, &'a V), Exhausted>;

    /// Moves the cursor to the next entry.
    fn advance(&mut self) -> Result<(), Exhausted>;
}

/// Extension of [`Dictionary`] for implementations that keep keys in
/// comparator order.
///
/// Range bounds are inclusive on both sides; a `None` bound leaves that side
/// unconstrained.
pub trait OrderedDictionary<K, V>: Dictionary<K, V> {
    /// Calls `visit` on every entry with `from <= key <= to` in ascending key
    /// order, stopping early when the visitor returns `false`.
    fn for_each_range(&self, from: Option<&K>, to: Option<&K>, visit: impl FnMut(&K, &V) -> bool);

    /// Returns a cursor over the entries with `from <= key <= to` in
    /// ascending key order.
    fn range_cursor<'a>(&'a self, from: Option<&'a K>, to: Option<&'a K>) -> Self::Cursor<'a>;
}
