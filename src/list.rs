//! SentinelList: doubly-linked list with a permanent guard node.
//!
//! Nodes live in a per-list `SlotMap` arena and link to each other through
//! generational keys, so neither direction owns the other. The guard node
//! is created with the list and dropped with it; its `next` link is the
//! first node and its `prev` link is the last node (or `None` when empty).

use crate::error::ListError;
use crate::reserved::Reserved;
use core::borrow::Borrow;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use slotmap::{DefaultKey, SlotMap};

// Arena keys repeat across lists, so every list also gets a process-wide id.
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct ListId(u64);

impl ListId {
    fn next() -> Self {
        ListId(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable reference to one node of a [`SentinelList`].
///
/// A handle carries the identity of the list that produced it; any other
/// list rejects it. After the node is removed the handle never resolves
/// again, even if its slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle {
    owner: ListId,
    key: DefaultKey,
}

impl Handle {
    fn new(owner: ListId, key: DefaultKey) -> Self {
        Handle { owner, key }
    }
    fn raw_handle(&self) -> DefaultKey {
        self.key
    }

    pub fn value<'a, T>(&self, list: &'a SentinelList<T>) -> Option<&'a T> {
        list.get(*self)
    }
}

#[derive(Debug)]
enum Slot<T> {
    Sentinel,
    Value(T),
}

#[derive(Debug)]
struct Node<T> {
    slot: Slot<T>,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

impl<T> Node<T> {
    fn value(&self) -> Option<&T> {
        match &self.slot {
            Slot::Value(v) => Some(v),
            Slot::Sentinel => None,
        }
    }
}

pub struct SentinelList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    sentinel: DefaultKey,
    id: ListId,
}

impl<T> SentinelList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a list with room for `capacity` values before the arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = SlotMap::with_capacity_and_key(capacity.saturating_add(1));
        let sentinel = nodes.insert(Node {
            slot: Slot::Sentinel,
            prev: None,
            next: None,
        });
        Self {
            nodes,
            sentinel,
            id: ListId::next(),
        }
    }

    /// Handle of the guard node. It resolves to no value and cannot be removed.
    pub fn head(&self) -> Handle {
        Handle::new(self.id, self.sentinel)
    }

    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }
    pub fn is_empty(&self) -> bool {
        self.nodes[self.sentinel].next.is_none()
    }

    #[inline]
    fn check_owner(&self, handle: Handle) -> Result<DefaultKey, ListError> {
        if handle.owner == self.id {
            Ok(handle.raw_handle())
        } else {
            Err(ListError::WrongList)
        }
    }

    /// Value behind `handle`; `None` for the sentinel, a removed node or a
    /// handle from another list.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let k = self.check_owner(handle).ok()?;
        self.nodes.get(k).and_then(Node::value)
    }

    pub fn front(&self) -> Option<&T> {
        let first = self.nodes[self.sentinel].next?;
        self.nodes[first].value()
    }

    pub fn back(&self) -> Option<&T> {
        let last = self.nodes[self.sentinel].prev?;
        self.nodes[last].value()
    }

    // Splice a new node directly after `prev`. Callers have already
    // validated `value`.
    fn link_after(&mut self, prev: DefaultKey, value: T) -> Handle {
        let next = self.nodes[prev].next;
        let k = self.nodes.insert(Node {
            slot: Slot::Value(value),
            prev: Some(prev),
            next,
        });
        match next {
            Some(n) => self.nodes[n].prev = Some(k),
            None => self.nodes[self.sentinel].prev = Some(k),
        }
        self.nodes[prev].next = Some(k);
        Handle::new(self.id, k)
    }

    /// Unlink `handle` in O(1) and hand its value back to the caller.
    pub fn remove(&mut self, handle: Handle) -> Result<T, ListError> {
        let k = self.check_owner(handle).inspect_err(|_| {
            tracing::warn!("refusing to remove a node through another list's handle");
        })?;
        if k == self.sentinel {
            tracing::warn!("refusing to remove the sentinel node");
            return Err(ListError::InvalidOperation);
        }
        let node = self.nodes.remove(k).ok_or(ListError::StaleHandle)?;
        let Slot::Value(value) = node.slot else {
            unreachable!("only the guard node holds no value")
        };

        // Non-sentinel nodes always have a predecessor.
        let prev = node.prev.unwrap_or(self.sentinel);
        self.nodes[prev].next = node.next;
        match node.next {
            Some(n) => self.nodes[n].prev = Some(prev),
            None => {
                self.nodes[self.sentinel].prev = (prev != self.sentinel).then_some(prev);
            }
        }
        tracing::trace!(len = self.len(), "removed node");
        Ok(value)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.nodes[self.sentinel].next?;
        self.remove(Handle::new(self.id, first)).ok()
    }

    /// Release every value while keeping the sentinel, leaving an empty list.
    pub fn clear(&mut self) {
        let released = self.len();
        let sentinel = self.sentinel;
        self.nodes.retain(|k, _| k == sentinel);
        let head = &mut self.nodes[sentinel];
        head.prev = None;
        head.next = None;
        tracing::debug!(released, "cleared list");
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.nodes[self.sentinel].next,
            remaining: self.len(),
        }
    }

    pub fn handles(&self) -> Handles<'_, T> {
        Handles {
            owner: self.id,
            nodes: &self.nodes,
            next: self.nodes[self.sentinel].next,
        }
    }
}

impl<T: Reserved> SentinelList<T> {
    /// Link `value` as the first node after the sentinel. O(1).
    pub fn insert(&mut self, value: T) -> Result<Handle, ListError> {
        if value.is_reserved() {
            tracing::warn!("cannot insert the sentinel value into a list");
            return Err(ListError::InvalidValue);
        }
        let h = self.link_after(self.sentinel, value);
        tracing::trace!(len = self.len(), "inserted node at front");
        Ok(h)
    }

    /// Link `value` as the last node. O(1) through the sentinel's tail link.
    pub fn insert_back(&mut self, value: T) -> Result<Handle, ListError> {
        if value.is_reserved() {
            tracing::warn!("cannot insert the sentinel value into a list");
            return Err(ListError::InvalidValue);
        }
        let tail = self.nodes[self.sentinel].prev.unwrap_or(self.sentinel);
        let h = self.link_after(tail, value);
        tracing::trace!(len = self.len(), "inserted node at back");
        Ok(h)
    }

    /// Linear scan from the front; the first equal value wins.
    pub fn find<Q>(&self, value: &Q) -> Result<Option<Handle>, ListError>
    where
        T: Borrow<Q>,
        Q: ?Sized + PartialEq + Reserved,
    {
        if value.is_reserved() {
            tracing::warn!("cannot search a list for the sentinel value");
            return Err(ListError::InvalidValue);
        }
        Ok(self
            .handles()
            .find(|&(_, v)| <T as Borrow<Q>>::borrow(v) == value)
            .map(|(h, _)| h))
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + PartialEq + Reserved,
    {
        matches!(self.find(value), Ok(Some(_)))
    }
}

impl SentinelList<String> {
    /// Copy `value` into freshly reserved storage and insert it at the front.
    pub fn insert_str(&mut self, value: &str) -> Result<Handle, ListError> {
        if value.is_reserved() {
            tracing::warn!("cannot insert the sentinel value into a list");
            return Err(ListError::InvalidValue);
        }
        let mut owned = String::new();
        owned.try_reserve_exact(value.len()).map_err(|e| {
            tracing::error!(error = %e, bytes = value.len(), "failed to allocate a new node");
            ListError::Allocation
        })?;
        owned.push_str(value);
        self.insert(owned)
    }
}

impl<T> Default for SentinelList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SentinelList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Values separated by single spaces, or `Empty list.` when only the
/// sentinel is present.
impl<T: fmt::Display> fmt::Display for SentinelList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Empty list.");
        }
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Iterator over the values of a [`SentinelList`], front to back.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    next: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.value()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a SentinelList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(Handle, &T)` pairs, front to back.
pub struct Handles<'a, T> {
    owner: ListId,
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    next: Option<DefaultKey>,
}

impl<'a, T> Iterator for Handles<'a, T> {
    type Item = (Handle, &'a T);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.next?;
        let node = self.nodes.get(k)?;
        self.next = node.next;
        node.value().map(|v| (Handle::new(self.owner, k), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn values<T: Clone>(l: &SentinelList<T>) -> Vec<T> {
        l.iter().cloned().collect()
    }

    /// Invariant: A new list holds only its sentinel and prints as empty.
    #[test]
    fn new_list_is_empty() {
        let l: SentinelList<i32> = SentinelList::new();
        assert!(l.is_empty());
        assert_eq!(l.len(), 0);
        assert_eq!(l.front(), None);
        assert_eq!(l.back(), None);
        assert_eq!(l.to_string(), "Empty list.");
        assert_eq!(l.head().value(&l), None);
    }

    /// Invariant: `insert` places each value directly after the sentinel, so
    /// iteration sees values in reverse insertion order.
    #[test]
    fn insert_links_at_front() {
        let mut l = SentinelList::new();
        for v in [1, 2, 3] {
            l.insert(v).unwrap();
        }
        assert_eq!(values(&l), vec![3, 2, 1]);
        assert_eq!(l.front(), Some(&3));
        assert_eq!(l.back(), Some(&1));
        assert_eq!(l.to_string(), "3 2 1");
    }

    /// Invariant: `insert_back` appends after the current tail in O(1) and
    /// mixes correctly with front insertion.
    #[test]
    fn insert_back_tracks_tail() {
        let mut l = SentinelList::new();
        l.insert_back(2).unwrap();
        l.insert(1).unwrap();
        l.insert_back(3).unwrap();
        assert_eq!(values(&l), vec![1, 2, 3]);
        assert_eq!(l.back(), Some(&3));
    }

    /// Invariant: The reserved marker is rejected by insert and find, and
    /// the list is left unchanged.
    #[test]
    fn reserved_value_rejected() {
        let mut l: SentinelList<String> = SentinelList::new();
        l.insert_str("a").unwrap();
        assert_eq!(l.insert_str("SENTINEL"), Err(ListError::InvalidValue));
        assert_eq!(
            l.insert("SENTINEL".to_string()),
            Err(ListError::InvalidValue)
        );
        assert_eq!(
            l.insert_back("SENTINEL".to_string()),
            Err(ListError::InvalidValue)
        );
        assert_eq!(l.find("SENTINEL"), Err(ListError::InvalidValue));
        assert!(!l.contains("SENTINEL"));
        assert_eq!(values(&l), vec!["a".to_string()]);

        let mut n: SentinelList<i32> = SentinelList::new();
        assert_eq!(n.insert(i32::MAX), Err(ListError::InvalidValue));
        assert!(n.is_empty());
    }

    /// Invariant: `find` returns the first match from the front and `None`
    /// when absent.
    #[test]
    fn find_returns_first_match() {
        let mut l: SentinelList<String> = SentinelList::new();
        let older = l.insert_str("x").unwrap();
        l.insert_str("y").unwrap();
        let newer = l.insert_str("x").unwrap();

        let found = l.find("x").unwrap().expect("present");
        assert_eq!(found, newer);
        assert_ne!(found, older);
        assert_eq!(l.find("z").unwrap(), None);
    }

    /// Invariant: Removing the sentinel is refused and nothing changes.
    #[test]
    fn sentinel_cannot_be_removed() {
        let mut l = SentinelList::new();
        l.insert(7).unwrap();
        assert_eq!(l.remove(l.head()), Err(ListError::InvalidOperation));
        assert_eq!(values(&l), vec![7]);
    }

    /// Invariant: Removal splices predecessor and successor together for
    /// first, middle and last positions, and the tail link follows.
    #[test]
    fn remove_splices_every_position() {
        let mut l = SentinelList::new();
        let c = l.insert(3).unwrap();
        let b = l.insert(2).unwrap();
        let a = l.insert(1).unwrap();
        l.insert_back(4).unwrap();

        assert_eq!(l.remove(b), Ok(2));
        assert_eq!(values(&l), vec![1, 3, 4]);
        assert_eq!(l.remove(a), Ok(1));
        assert_eq!(values(&l), vec![3, 4]);
        let d = l.find(&4).unwrap().unwrap();
        assert_eq!(l.remove(d), Ok(4));
        assert_eq!(l.back(), Some(&3));
        l.insert_back(5).unwrap();
        assert_eq!(values(&l), vec![3, 5]);
        assert_eq!(l.remove(c), Ok(3));
        assert_eq!(values(&l), vec![5]);
        assert_eq!(l.front(), l.back());
    }

    /// Invariant: A removed handle is stale: it no longer resolves and a
    /// second removal fails instead of releasing anything twice.
    #[test]
    fn stale_handle_is_rejected() {
        let mut l = SentinelList::new();
        let h = l.insert(1).unwrap();
        assert_eq!(l.remove(h), Ok(1));
        assert_eq!(h.value(&l), None);
        assert_eq!(l.remove(h), Err(ListError::StaleHandle));

        // Slot reuse must not make the old handle alias the new node.
        let h2 = l.insert(2).unwrap();
        assert_ne!(h, h2);
        assert_eq!(l.remove(h), Err(ListError::StaleHandle));
        assert_eq!(values(&l), vec![2]);
    }

    /// Invariant: A handle only works on the list that produced it, even
    /// when another list has a node in the same arena slot.
    #[test]
    fn foreign_handle_is_rejected() {
        let mut a: SentinelList<String> = SentinelList::new();
        let mut b: SentinelList<String> = SentinelList::new();
        let ha = a.insert_str("x").unwrap();
        let hb = b.insert_str("y").unwrap();
        assert_eq!(ha.raw_handle(), hb.raw_handle());

        assert_eq!(b.get(ha), None);
        assert_eq!(ha.value(&b), None);
        assert_eq!(b.remove(ha), Err(ListError::WrongList));
        assert_eq!(b.remove(a.head()), Err(ListError::WrongList));
        assert_eq!(values(&b), vec!["y".to_string()]);

        assert_eq!(a.remove(ha).as_deref(), Ok("x"));
        assert_eq!(b.remove(hb).as_deref(), Ok("y"));
    }

    /// Invariant: Duplicates are kept as separate nodes.
    #[test]
    fn duplicates_are_kept() {
        let mut l = SentinelList::new();
        let h1 = l.insert(9).unwrap();
        let h2 = l.insert(9).unwrap();
        assert_ne!(h1, h2);
        assert_eq!(l.len(), 2);
        let first = l.find(&9).unwrap().unwrap();
        l.remove(first).unwrap();
        assert!(l.contains(&9));
        let second = l.find(&9).unwrap().unwrap();
        l.remove(second).unwrap();
        assert!(!l.contains(&9));
    }

    /// Invariant: `pop_front` drains in list order and returns `None` once
    /// only the sentinel is left.
    #[test]
    fn pop_front_drains() {
        let mut l = SentinelList::new();
        for v in [1, 2, 3] {
            l.insert_back(v).unwrap();
        }
        assert_eq!(l.pop_front(), Some(1));
        assert_eq!(l.pop_front(), Some(2));
        assert_eq!(l.pop_front(), Some(3));
        assert_eq!(l.pop_front(), None);
        assert!(l.is_empty());
        assert_eq!(l.back(), None);
    }

    /// Invariant: Every value is dropped exactly once across remove, clear
    /// and dropping the list itself.
    #[test]
    fn values_dropped_exactly_once() {
        #[derive(Debug)]
        struct Tracked(u32, Rc<Cell<usize>>);
        impl Drop for Tracked {
            fn drop(&mut self) {
                self.1.set(self.1.get() + 1);
            }
        }
        impl Reserved for Tracked {
            fn is_reserved(&self) -> bool {
                self.0 == u32::MAX
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut l = SentinelList::new();
        let mut handles = Vec::new();
        for i in 0..10 {
            handles.push(l.insert(Tracked(i, drops.clone())).unwrap());
        }
        drop(l.remove(handles[3]).unwrap());
        drop(l.remove(handles[7]).unwrap());
        assert_eq!(drops.get(), 2);

        l.clear();
        assert_eq!(drops.get(), 10);
        assert!(l.is_empty());

        for i in 0..5 {
            l.insert_back(Tracked(i, drops.clone())).unwrap();
        }
        // A rejected value is dropped without ever being linked.
        assert_eq!(
            l.insert(Tracked(u32::MAX, drops.clone())).unwrap_err(),
            ListError::InvalidValue
        );
        assert_eq!(drops.get(), 11);

        drop(l);
        assert_eq!(drops.get(), 16);
    }

    /// Invariant: Dropping a long list does not recurse per node.
    #[test]
    fn long_list_drops_without_recursion() {
        let mut l = SentinelList::with_capacity(200_000);
        for i in 0..200_000u32 {
            l.insert(i).unwrap();
        }
        assert_eq!(l.len(), 200_000);
        drop(l);
    }

    /// Invariant: `handles` pairs every live node with its value in list order.
    #[test]
    fn handles_match_values() {
        let mut l = SentinelList::new();
        let b = l.insert(2).unwrap();
        let a = l.insert(1).unwrap();
        let pairs: Vec<_> = l.handles().collect();
        assert_eq!(pairs, vec![(a, &1), (b, &2)]);
        assert_eq!(l.iter().size_hint(), (2, Some(2)));
    }
}
