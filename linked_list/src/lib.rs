//! A singly linked list with owned nodes, constant-time append, and a
//! position-aware mutable cursor.
//!
//! [`LinkedList`] keeps a `Box`-owned chain of nodes plus a raw pointer to the
//! last node, so both [`push_front`](LinkedList::push_front) and
//! [`push_back`](LinkedList::push_back) are O(1). Traversal comes in three
//! flavors: a visitor callback ([`for_each`](LinkedList::for_each)), a shared
//! [`Iterator`] ([`iter`](LinkedList::iter)), and [`CursorMut`], a mutable
//! cursor that can overwrite, insert, and unlink elements at its current
//! position. The cursor is what makes the list usable as hash-bucket storage:
//! a chain can be scanned for a key and spliced in place without restarting
//! from the head.
//!
//! Accessor methods on an empty list fail with [`Empty`]; cursor accesses past
//! the last element fail with [`Exhausted`]. Both are contract violations by
//! the caller and are reported immediately rather than papered over.
use std::{fmt, ptr};

/// Error returned when the first or last element of an empty list is accessed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Empty;

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("list is empty")
    }
}

impl std::error::Error for Empty {}

/// Error returned by cursor operations once the cursor has moved past the last
/// element.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Exhausted;

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cursor is exhausted")
    }
}

impl std::error::Error for Exhausted {}

struct Node<T> {
    elem: T,
    next: Option<Box<Node<T>>>,
}

/// A singly linked list with O(1) prepend and append.
pub struct LinkedList<T> {
    head: Option<Box<Node<T>>>,
    /// Last node of the chain; null iff `head` is `None`.
    tail: *mut Node<T>,
    len: usize,
}

// SAFETY: `tail` only ever points into the chain of nodes owned by `head`, so
// the list owns all data it refers to and moving it between threads moves the
// nodes along with it.
unsafe impl<T: Send> Send for LinkedList<T> {}
// SAFETY: shared access never writes through `tail`.
unsafe impl<T: Sync> Sync for LinkedList<T> {}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        LinkedList {
            head: None,
            tail: ptr::null_mut(),
            len: 0,
        }
    }
}

impl<T> LinkedList<T> {
    /// Returns an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `elem` at the front of the list.
    pub fn push_front(&mut self, elem: T) {
        let mut node = Box::new(Node {
            elem,
            next: self.head.take(),
        });
        if self.tail.is_null() {
            self.tail = &mut *node;
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Appends `elem` at the back of the list.
    pub fn push_back(&mut self, elem: T) {
        let mut node = Box::new(Node { elem, next: None });
        let raw: *mut Node<T> = &mut *node;
        if self.tail.is_null() {
            self.head = Some(node);
        } else {
            // SAFETY: a non-null `tail` points at the last node owned by this
            // list, and no other reference to it is live.
            unsafe { (*self.tail).next = Some(node) };
        }
        self.tail = raw;
        self.len += 1;
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Result<T, Empty> {
        let mut node = self.head.take().ok_or(Empty)?;
        self.head = node.next.take();
        if self.head.is_none() {
            self.tail = ptr::null_mut();
        }
        self.len -= 1;
        Ok(node.elem)
    }

    /// Returns a reference to the first element.
    pub fn front(&self) -> Result<&T, Empty> {
        self.head.as_deref().map(|node| &node.elem).ok_or(Empty)
    }

    /// Returns a reference to the last element.
    pub fn back(&self) -> Result<&T, Empty> {
        if self.tail.is_null() {
            return Err(Empty);
        }
        // SAFETY: a non-null `tail` points at the last node owned by this
        // list, kept alive by the shared borrow of `self`.
        Ok(unsafe { &(*self.tail).elem })
    }

    /// Calls `visit` on each element front to back, stopping early when the
    /// visitor returns `false`.
    pub fn for_each(&self, mut visit: impl FnMut(&T) -> bool) {
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            if !visit(&n.elem) {
                break;
            }
            node = n.next.as_deref();
        }
    }

    /// Returns an iterator over the elements front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            node: self.head.as_deref(),
            rest: self.len,
        }
    }

    /// Returns a mutable cursor positioned at the first element, or already
    /// exhausted when the list is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut {
            list: self,
            prev: ptr::null_mut(),
        }
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        // Unlink iteratively; dropping the boxes through their `next` chain
        // would recurse once per node and can overflow the stack on long
        // lists.
        let mut node = self.head.take();
        while let Some(mut n) = node {
            node = n.next.take();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator yielding references to a list's elements front to back.
pub struct Iter<'a, T> {
    node: Option<&'a Node<T>>,
    rest: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.node?;
        self.node = node.next.as_deref();
        self.rest -= 1;
        Some(&node.elem)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest, Some(self.rest))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.rest
    }
}

/// A mutable cursor into a [`LinkedList`].
///
/// The cursor starts at the first element and only moves forward. At every
/// position it can read or overwrite the current element, splice a new element
/// in before it, or unlink it; insertion and removal are O(1) because the
/// cursor tracks the link it came through. Once advanced past the last element
/// the cursor is exhausted: element accesses fail with [`Exhausted`], while
/// [`insert`](CursorMut::insert) still works and appends at the back.
pub struct CursorMut<'a, T> {
    list: &'a mut LinkedList<T>,
    /// Node whose `next` link holds the current element; null while the cursor
    /// is on the first element (the current link is then the list head).
    prev: *mut Node<T>,
}

impl<'a, T> CursorMut<'a, T> {
    fn link(&mut self) -> &mut Option<Box<Node<T>>> {
        if self.prev.is_null() {
            &mut self.list.head
        } else {
            // SAFETY: `prev` points at a node owned by the mutably borrowed
            // list; the cursor is the only active access path into it.
            unsafe { &mut (*self.prev).next }
        }
    }

    fn link_ref(&self) -> &Option<Box<Node<T>>> {
        if self.prev.is_null() {
            &self.list.head
        } else {
            // SAFETY: `prev` points at a node owned by the borrowed list.
            unsafe { &(*self.prev).next }
        }
    }

    /// Returns `true` if the cursor is positioned on an element.
    pub fn has_next(&self) -> bool {
        self.link_ref().is_some()
    }

    /// Returns a reference to the current element.
    pub fn current(&self) -> Result<&T, Exhausted> {
        self.link_ref()
            .as_deref()
            .map(|node| &node.elem)
            .ok_or(Exhausted)
    }

    /// Returns a mutable reference to the current element.
    pub fn current_mut(&mut self) -> Result<&mut T, Exhausted> {
        self.link()
            .as_deref_mut()
            .map(|node| &mut node.elem)
            .ok_or(Exhausted)
    }

    /// Moves the cursor to the next element.
    ///
    /// Advancing off the last element leaves the cursor exhausted; advancing
    /// again from there fails.
    pub fn advance(&mut self) -> Result<(), Exhausted> {
        let node = self.link().as_deref_mut().ok_or(Exhausted)?;
        let raw: *mut Node<T> = node;
        self.prev = raw;
        Ok(())
    }

    /// Inserts `elem` at the cursor position and leaves the cursor positioned
    /// on it.
    ///
    /// The previous current element (if any) ends up directly after the
    /// inserted one. On an exhausted cursor this appends at the back of the
    /// list.
    pub fn insert(&mut self, elem: T) {
        let link = self.link();
        let mut node = Box::new(Node {
            elem,
            next: link.take(),
        });
        let raw: *mut Node<T> = &mut *node;
        let at_back = node.next.is_none();
        *link = Some(node);
        if at_back {
            self.list.tail = raw;
        }
        self.list.len += 1;
    }

    /// Unlinks and returns the current element, advancing the cursor to its
    /// successor.
    pub fn remove(&mut self) -> Result<T, Exhausted> {
        let prev = self.prev;
        let link = if prev.is_null() {
            &mut self.list.head
        } else {
            // SAFETY: `prev` points at a node owned by the mutably borrowed
            // list.
            unsafe { &mut (*prev).next }
        };
        let mut node = link.take().ok_or(Exhausted)?;
        *link = node.next.take();
        if link.is_none() {
            // The removed node was the last one.
            self.list.tail = prev;
        }
        self.list.len -= 1;
        Ok(node.elem)
    }
}
