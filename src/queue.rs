//! FIFO queue over a [`SentinelList`]: enqueue at the tail, dequeue at the
//! front, both O(1).

use crate::error::ListError;
use crate::list::{Iter, SentinelList};
use crate::reserved::Reserved;
use core::fmt;

pub struct Queue<T> {
    list: SentinelList<T>,
}

impl<T> Queue<T> {
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

    /// The value that has been queued the longest.
    pub fn peek(&self) -> Option<&T> {
        self.list.front()
    }

    pub fn dequeue(&mut self) -> Option<T> {
        let value = self.list.pop_front();
        if value.is_none() {
            tracing::debug!("no values to dequeue");
        }
        value
    }

    /// Oldest first.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

impl<T: Reserved> Queue<T> {
    pub fn enqueue(&mut self, value: T) -> Result<(), ListError> {
        self.list.insert_back(value).map(|_| ())
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Empty queue.")
        } else {
            fmt::Display::fmt(&self.list, f)
        }
    }
}
