//! A LIFO stack with fail-fast access to the top element.
//!
//! [`Stack`] is a thin layer over [`Vec`] that exposes the classic stack
//! contract: `push`, and `pop`/`peek` that return an [`Empty`] error instead of
//! an `Option` when the stack has no elements. Callers that want to avoid the
//! failing variants can guard with [`Stack::is_empty`].
use std::fmt;

/// Error returned by [`Stack::pop`] and [`Stack::peek`] on an empty stack.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Empty;

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stack is empty")
    }
}

impl std::error::Error for Empty {}

/// A LIFO stack backed by a growable array.
#[derive(Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack { items: Vec::new() }
    }
}

impl<T> Stack<T> {
    /// Returns an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an empty stack that can hold `capacity` elements without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes `item` onto the top of the stack.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Result<T, Empty> {
        self.items.pop().ok_or(Empty)
    }

    /// Returns a reference to the top element without removing it.
    pub fn peek(&self) -> Result<&T, Empty> {
        self.items.last().ok_or(Empty)
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    /// Formats the stack bottom to top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stack {
            items: Vec::from_iter(iter),
        }
    }
}
