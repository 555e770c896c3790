//! LIFO stack over a [`SentinelList`]; the top is the node right after the
//! sentinel.

use crate::error::ListError;
use crate::list::{Iter, SentinelList};
use crate::reserved::Reserved;
use core::fmt;

pub struct Stack<T> {
    list: SentinelList<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            list: SentinelList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.list.front()
    }

    pub fn pop(&mut self) -> Option<T> {
        let value = self.list.pop_front();
        if value.is_none() {
            tracing::debug!("no values to pop");
        }
        value
    }

    /// Top first.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

impl<T: Reserved> Stack<T> {
    pub fn push(&mut self, value: T) -> Result<(), ListError> {
        self.list.insert(value).map(|_| ())
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Empty stack.")
        } else {
            fmt::Display::fmt(&self.list, f)
        }
    }
}
