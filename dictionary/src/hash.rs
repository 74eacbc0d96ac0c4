//! Separate-chaining hash dictionary with load-factor driven resizing.
use std::fmt::{self, Write};

use linked_list::LinkedList;

use crate::{Cursor, Dictionary, Exhausted, KeyNotFound};

const INITIAL_CAPACITY: usize = 13;
const MAX_LOAD_FACTOR: f64 = 0.75;
const MIN_LOAD_FACTOR: f64 = 0.25;
const RESIZE_FACTOR: usize = 2;

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Rolling-hash sink folding the bytes of whatever is formatted into it with
/// `hash = hash * 31 + byte`.
struct ByteFold(u32);

impl Write for ByteFold {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            self.0 = self.0.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        Ok(())
    }
}

fn bucket_index<K: fmt::Debug>(key: &K, capacity: usize) -> usize {
    let mut fold = ByteFold(0);
    // Formatting into the fold sink cannot fail.
    let _ = write!(fold, "{key:?}");
    fold.0 as usize % capacity
}

/// A key/value dictionary backed by a separate-chaining hash table.
///
/// Collisions land in per-slot chains ([`LinkedList`]s). The table starts at
/// 13 slots, doubles when the load factor reaches 0.75 and halves (never below
/// the initial 13) when a removal would drop it to 0.25, rehoming every entry
/// on each resize. Operations are amortized O(1) with an O(n) worst case under
/// heavy collision.
///
/// Keys are hashed through their [`fmt::Debug`] text: the formatted bytes are
/// folded with a multiply-by-31 rolling hash. This works for any debuggable
/// key type but is a known-fragile fallback: distinct keys that format
/// identically always share a chain. Lookups stay correct regardless because
/// entries are compared with `==`, never by hash alone.
pub struct HashDictionary<K, V> {
    table: Vec<LinkedList<Entry<K, V>>>,
    len: usize,
}

impl<K, V> Default for HashDictionary<K, V> {
    fn default() -> Self {
        HashDictionary {
            table: fresh_table(INITIAL_CAPACITY),
            len: 0,
        }
    }
}

fn fresh_table<K, V>(capacity: usize) -> Vec<LinkedList<Entry<K, V>>> {
    let mut table = Vec::new();
    table.resize_with(capacity, LinkedList::new);
    table
}

impl<K, V> HashDictionary<K, V> {
    /// Returns an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of table slots.
    ///
    /// Grows and shrinks with the load factor; mostly useful for tests and
    /// diagnostics.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Calls `visit` on every entry, stopping early when the visitor returns
    /// `false`.
    ///
    /// Entries are visited slot by slot and within a slot in chain order;
    /// there is no guarantee about key order.
    pub fn for_each(&self, mut visit: impl FnMut(&K, &V) -> bool) {
        let mut keep_going = true;
        for bucket in &self.table {
            bucket.for_each(|entry| {
                keep_going = visit(&entry.key, &entry.value);
                keep_going
            });
            if !keep_going {
                break;
            }
        }
    }

    /// Returns a cursor positioned at the first entry, or already exhausted
    /// when the dictionary is empty.
    pub fn cursor(&self) -> HashCursor<'_, K, V> {
        HashCursor::new(&self.table)
    }
}

impl<K: Eq + fmt::Debug, V> HashDictionary<K, V> {
    /// Stores `value` under `key`, overwriting any previous value.
    pub fn insert(&mut self, key: K, value: V) {
        if self.len as f64 / self.capacity() as f64 >= MAX_LOAD_FACTOR {
            self.rehash(self.capacity() * RESIZE_FACTOR);
        }
        let slot = bucket_index(&key, self.capacity());
        let mut cursor = self.table[slot].cursor_front_mut();
        while let Ok(entry) = cursor.current_mut() {
            if entry.key == key {
                entry.value = value;
                return;
            }
            // Cannot fail: the cursor is positioned on an element.
            let _ = cursor.advance();
        }
        cursor.insert(Entry { key, value });
        self.len += 1;
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        self.find(key).map(|entry| &entry.value).ok_or(KeyNotFound)
    }

    /// Removes `key` and returns the value that was stored under it.
    ///
    /// When the removal would drop the load factor to the shrink threshold,
    /// the table is halved first and the entry removed from its relocated
    /// chain.
    pub fn remove(&mut self, key: &K) -> Result<V, KeyNotFound> {
        if self.find(key).is_none() {
            return Err(KeyNotFound);
        }
        if self.capacity() > INITIAL_CAPACITY
            && (self.len - 1) as f64 / self.capacity() as f64 <= MIN_LOAD_FACTOR
        {
            self.rehash((self.capacity() / RESIZE_FACTOR).max(INITIAL_CAPACITY));
        }
        let slot = bucket_index(key, self.capacity());
        let mut cursor = self.table[slot].cursor_front_mut();
        while let Ok(entry) = cursor.current() {
            if entry.key == *key {
                break;
            }
            let _ = cursor.advance();
        }
        let entry = cursor.remove().map_err(|_| KeyNotFound)?;
        self.len -= 1;
        Ok(entry.value)
    }

    fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        let slot = bucket_index(key, self.capacity());
        self.table[slot].iter().find(|entry| entry.key == *key)
    }

    /// Replaces the table with one of `new_capacity` slots, rehoming every
    /// entry under the new modulus.
    fn rehash(&mut self, new_capacity: usize) {
        let old_table = std::mem::replace(&mut self.table, fresh_table(new_capacity));
        for mut bucket in old_table {
            while let Ok(entry) = bucket.pop_front() {
                let slot = bucket_index(&entry.key, new_capacity);
                self.table[slot].push_back(entry);
            }
        }
    }
}

impl<K: Eq + fmt::Debug, V> Dictionary<K, V> for HashDictionary<K, V> {
    type Cursor<'a>
        = HashCursor<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn insert(&mut self, key: K, value: V) {
        HashDictionary::insert(self, key, value)
    }

    fn contains(&self, key: &K) -> bool {
        HashDictionary::contains(self, key)
    }

    fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        HashDictionary::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Result<V, KeyNotFound> {
        HashDictionary::remove(self, key)
    }

    fn len(&self) -> usize {
        HashDictionary::len(self)
    }

    fn for_each(&self, visit: impl FnMut(&K, &V) -> bool) {
        HashDictionary::for_each(self, visit)
    }

    fn cursor(&self) -> HashCursor<'_, K, V> {
        HashDictionary::cursor(self)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for bucket in &self.table {
            for entry in bucket {
                map.entry(&entry.key, &entry.value);
            }
        }
        map.finish()
    }
}

impl<K: Eq + fmt::Debug, V> Extend<(K, V)> for HashDictionary<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Eq + fmt::Debug, V> FromIterator<(K, V)> for HashDictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = HashDictionary::new();
        dictionary.extend(iter);
        dictionary
    }
}

/// External cursor over a [`HashDictionary`].
///
/// Tracks a slot index and an iterator over the slot's chain, skipping empty
/// slots as it goes. Entries come out in slot-then-chain order, which implies
/// nothing about key order.
pub struct HashCursor<'a, K, V> {
    table: &'a [LinkedList<Entry<K, V>>],
    slot: usize,
    bucket: linked_list::Iter<'a, Entry<K, V>>,
    current: Option<&'a Entry<K, V>>,
}

impl<'a, K, V> HashCursor<'a, K, V> {
    fn new(table: &'a [LinkedList<Entry<K, V>>]) -> Self {
        let mut cursor = HashCursor {
            table,
            slot: 0,
            bucket: table[0].iter(),
            current: None,
        };
        cursor.current = cursor.bucket.next();
        cursor.skip_empty_slots();
        cursor
    }

    fn skip_empty_slots(&mut self) {
        while self.current.is_none() && self.slot + 1 < self.table.len() {
            self.slot += 1;
            self.bucket = self.table[self.slot].iter();
            self.current = self.bucket.next();
        }
    }
}

impl<'a, K, V> Cursor<'a, K, V> for HashCursor<'a, K, V> {
    fn has_next(&self) -> bool {
        self.current.is_some()
    }

    fn current(&self) -> Result<(&'a K, &'a V), Exhausted> {
        self.current
            .map(|entry| (&entry.key, &entry.value))
            .ok_or(Exhausted)
    }

    fn advance(&mut self) -> Result<(), Exhausted> {
        if self.current.is_none() {
            return Err(Exhausted);
        }
        self.current = self.bucket.next();
        self.skip_empty_slots();
        Ok(())
    }
}
