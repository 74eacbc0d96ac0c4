//! Ordered dictionary backed by an unbalanced binary search tree.
use std::cmp::Ordering;
use std::fmt;

use lifo::Stack;

use crate::{Cursor, Dictionary, Exhausted, KeyNotFound, OrderedDictionary};

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

/// An ordered key/value dictionary backed by an unbalanced binary search tree.
///
/// The tree is ordered by a comparator supplied at construction and fixed for
/// the dictionary's lifetime; [`BstDictionary::new`] defaults to [`Ord`]. The
/// comparator must be a total order over the keys actually stored, otherwise
/// all ordering guarantees are off.
///
/// No rebalancing is performed: lookups, insertions, and removals are
/// O(height), which is O(log n) for random-ish insertion orders but degrades
/// to O(n) when keys arrive pre-sorted. Insert, search, and removal recurse on
/// the height as well, so adversarially deep trees can exhaust the call stack;
/// the external cursors keep their pending nodes on an explicit stack and are
/// immune to this.
pub struct BstDictionary<K, V, C = fn(&K, &K) -> Ordering> {
    root: Link<K, V>,
    len: usize,
    cmp: C,
}

impl<K: Ord, V> BstDictionary<K, V> {
    /// Returns an empty dictionary ordered by [`Ord`].
    pub fn new() -> Self {
        Self::with_comparator(K::cmp as fn(&K, &K) -> Ordering)
    }
}

impl<K: Ord, V> Default for BstDictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Fn(&K, &K) -> Ordering> BstDictionary<K, V, C> {
    /// Returns an empty dictionary ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        BstDictionary {
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn insert(&mut self, key: K, value: V) {
        if insert_rec(&mut self.root, key, value, &self.cmp) {
            self.len += 1;
        }
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        find_rec(&self.root, key, &self.cmp).is_some()
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        find_rec(&self.root, key, &self.cmp)
            .map(|node| &node.value)
            .ok_or(KeyNotFound)
    }

    /// Removes `key` and returns the value that was stored under it.
    ///
    /// A node with two children is replaced by its in-order successor, the
    /// minimum of its right subtree, so the search-order invariant holds
    /// without rebalancing.
    pub fn remove(&mut self, key: &K) -> Result<V, KeyNotFound> {
        let value = remove_rec(&mut self.root, key, &self.cmp).ok_or(KeyNotFound)?;
        self.len -= 1;
        Ok(value)
    }

    /// Calls `visit` on every entry in ascending key order, stopping early
    /// when the visitor returns `false`.
    pub fn for_each(&self, mut visit: impl FnMut(&K, &V) -> bool) {
        visit_in_order(&self.root, &mut visit);
    }

    /// Calls `visit` on every entry with `from <= key <= to` in ascending key
    /// order, stopping early when the visitor returns `false`.
    ///
    /// A `None` bound leaves that side unconstrained. Subtrees that cannot
    /// contain in-range keys are never descended into.
    pub fn for_each_range(
        &self,
        from: Option<&K>,
        to: Option<&K>,
        mut visit: impl FnMut(&K, &V) -> bool,
    ) {
        visit_range(&self.root, from, to, &self.cmp, &mut visit);
    }

    /// Returns a cursor positioned at the minimum key, or already exhausted
    /// when the dictionary is empty.
    pub fn cursor(&self) -> TreeCursor<'_, K, V, C> {
        TreeCursor::new(self, None, None)
    }

    /// Returns a cursor over the entries with `from <= key <= to`, positioned
    /// at the minimum in-range key.
    pub fn range_cursor<'a>(
        &'a self,
        from: Option<&'a K>,
        to: Option<&'a K>,
    ) -> TreeCursor<'a, K, V, C> {
        TreeCursor::new(self, from, to)
    }
}

impl<K, V, C> Drop for BstDictionary<K, V, C> {
    fn drop(&mut self) {
        // Dropping the boxes through their child links would recurse once per
        // tree level; unlink iteratively so degenerate chains cannot overflow
        // the stack.
        let mut pending = Vec::new();
        pending.extend(self.root.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Inserts into the subtree hanging off `link`; returns `true` when a new
/// node was created rather than an existing value overwritten.
fn insert_rec<K, V>(
    link: &mut Link<K, V>,
    key: K,
    value: V,
    cmp: &impl Fn(&K, &K) -> Ordering,
) -> bool {
    match link {
        None => {
            *link = Some(Box::new(Node {
                key,
                value,
                left: None,
                right: None,
            }));
            true
        }
        Some(node) => match cmp(&key, &node.key) {
            Ordering::Less => insert_rec(&mut node.left, key, value, cmp),
            Ordering::Greater => insert_rec(&mut node.right, key, value, cmp),
            Ordering::Equal => {
                node.value = value;
                false
            }
        },
    }
}

fn find_rec<'a, K, V>(
    link: &'a Link<K, V>,
    key: &K,
    cmp: &impl Fn(&K, &K) -> Ordering,
) -> Option<&'a Node<K, V>> {
    let node = link.as_deref()?;
    match cmp(key, &node.key) {
        Ordering::Less => find_rec(&node.left, key, cmp),
        Ordering::Greater => find_rec(&node.right, key, cmp),
        Ordering::Equal => Some(node),
    }
}

/// Removes `key` from the subtree hanging off `link`, returning the value
/// stored under it.
fn remove_rec<K, V>(
    link: &mut Link<K, V>,
    key: &K,
    cmp: &impl Fn(&K, &K) -> Ordering,
) -> Option<V> {
    let ordering = cmp(key, &link.as_deref()?.key);
    match ordering {
        Ordering::Less => remove_rec(&mut link.as_deref_mut()?.left, key, cmp),
        Ordering::Greater => remove_rec(&mut link.as_deref_mut()?.right, key, cmp),
        Ordering::Equal => {
            let mut node = link.take()?;
            *link = match (node.left.take(), node.right.take()) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    // Two children: promote the in-order successor, the
                    // minimum of the right subtree.
                    let (rest, mut successor) = detach_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(successor)
                }
            };
            Some(node.value)
        }
    }
}

/// Unlinks the minimum node of the subtree rooted at `node`, returning the
/// remaining subtree and the detached node.
fn detach_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = detach_min(left);
            node.left = rest;
            (Some(node), min)
        }
    }
}

/// In-order traversal; returns `false` as soon as the visitor does, without
/// visiting further nodes.
fn visit_in_order<K, V>(link: &Link<K, V>, visit: &mut impl FnMut(&K, &V) -> bool) -> bool {
    match link {
        None => true,
        Some(node) => {
            visit_in_order(&node.left, visit)
                && visit(&node.key, &node.value)
                && visit_in_order(&node.right, visit)
        }
    }
}

/// In-order traversal restricted to `[from, to]`, pruning subtrees that lie
/// entirely outside the bounds.
fn visit_range<K, V>(
    link: &Link<K, V>,
    from: Option<&K>,
    to: Option<&K>,
    cmp: &impl Fn(&K, &K) -> Ordering,
    visit: &mut impl FnMut(&K, &V) -> bool,
) -> bool {
    let node = match link {
        None => return true,
        Some(node) => node,
    };
    let above_from = from.map_or(true, |from| cmp(&node.key, from) != Ordering::Less);
    let below_to = to.map_or(true, |to| cmp(&node.key, to) != Ordering::Greater);
    if above_from && !visit_range(&node.left, from, to, cmp, visit) {
        return false;
    }
    if above_from && below_to && !visit(&node.key, &node.value) {
        return false;
    }
    if below_to {
        return visit_range(&node.right, from, to, cmp, visit);
    }
    true
}

impl<K, V, C: Fn(&K, &K) -> Ordering> Dictionary<K, V> for BstDictionary<K, V, C> {
    type Cursor<'a>
        = TreeCursor<'a, K, V, C>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn insert(&mut self, key: K, value: V) {
        BstDictionary::insert(self, key, value)
    }

    fn contains(&self, key: &K) -> bool {
        BstDictionary::contains(self, key)
    }

    fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        BstDictionary::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Result<V, KeyNotFound> {
        BstDictionary::remove(self, key)
    }

    fn len(&self) -> usize {
        BstDictionary::len(self)
    }

    fn for_each(&self, visit: impl FnMut(&K, &V) -> bool) {
        BstDictionary::for_each(self, visit)
    }

    fn cursor(&self) -> TreeCursor<'_, K, V, C> {
        BstDictionary::cursor(self)
    }
}

impl<K, V, C: Fn(&K, &K) -> Ordering> OrderedDictionary<K, V> for BstDictionary<K, V, C> {
    fn for_each_range(&self, from: Option<&K>, to: Option<&K>, visit: impl FnMut(&K, &V) -> bool) {
        BstDictionary::for_each_range(self, from, to, visit)
    }

    fn range_cursor<'a>(&'a self, from: Option<&'a K>, to: Option<&'a K>) -> TreeCursor<'a, K, V, C> {
        BstDictionary::range_cursor(self, from, to)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Fn(&K, &K) -> Ordering> fmt::Debug
    for BstDictionary<K, V, C>
{
    /// Formats the entries in ascending key order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.for_each(|key, value| {
            map.entry(key, value);
            true
        });
        map.finish()
    }
}

impl<K, V, C: Fn(&K, &K) -> Ordering> Extend<(K, V)> for BstDictionary<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstDictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = BstDictionary::new();
        dictionary.extend(iter);
        dictionary
    }
}

/// External cursor over a [`BstDictionary`], optionally bounded to an
/// inclusive key range.
///
/// The cursor keeps the chain of nodes still to visit, the left spine of the
/// subtree ahead of it, on an explicit [`Stack`]; the entry on top of the
/// stack is the current one. Advancing pops it and pushes the left spine of
/// its right child. Spine walks redirect around nodes that fall outside the
/// bounds, so out-of-range subtrees are skipped without being traversed.
pub struct TreeCursor<'a, K, V, C = fn(&K, &K) -> Ordering> {
    pending: Stack<&'a Node<K, V>>,
    cmp: &'a C,
    from: Option<&'a K>,
    to: Option<&'a K>,
}

impl<'a, K, V, C: Fn(&K, &K) -> Ordering> TreeCursor<'a, K, V, C> {
    fn new(tree: &'a BstDictionary<K, V, C>, from: Option<&'a K>, to: Option<&'a K>) -> Self {
        let mut cursor = TreeCursor {
            pending: Stack::new(),
            cmp: &tree.cmp,
            from,
            to,
        };
        cursor.push_spine(tree.root.as_deref());
        cursor
    }

    /// Pushes the left spine starting at `node`, walking right past nodes
    /// below the lower bound and left past nodes above the upper bound.
    fn push_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            if self
                .from
                .map_or(false, |from| (self.cmp)(&n.key, from) == Ordering::Less)
            {
                node = n.right.as_deref();
            } else if self
                .to
                .map_or(false, |to| (self.cmp)(&n.key, to) == Ordering::Greater)
            {
                node = n.left.as_deref();
            } else {
                self.pending.push(n);
                node = n.left.as_deref();
            }
        }
    }
}

impl<'a, K, V, C: Fn(&K, &K) -> Ordering> Cursor<'a, K, V> for TreeCursor<'a, K, V, C> {
    fn has_next(&self) -> bool {
        !self.pending.is_empty()
    }

    fn current(&self) -> Result<(&'a K, &'a V), Exhausted> {
        let node = *self.pending.peek().map_err(|_| Exhausted)?;
        Ok((&node.key, &node.value))
    }

    fn advance(&mut self) -> Result<(), Exhausted> {
        let node = self.pending.pop().map_err(|_| Exhausted)?;
        self.push_spine(node.right.as_deref());
        Ok(())
    }
}
