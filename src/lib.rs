//! sentinel-collections: a sentinel-guarded doubly-linked list and the
//! containers built from it: a fixed-size chained hash table, a queue, a
//! stack, plus a 26-way trie.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: textbook containers whose invariants are small enough to check
//!   by hand, expressed without raw pointers.
//! - Layers:
//!   - SentinelList<T>: nodes in a per-list `SlotMap` arena, linked by
//!     generational keys. One guard node per list, created with it and
//!     never removed. O(1) front/back insert, O(1) removal by `Handle`,
//!     O(n) search.
//!   - hash: djb2 (`hash * 33 + byte`, seed 5381, wrapping `u64`) as a
//!     `Hasher`/`BuildHasher` pair.
//!   - HashTable<S>: a fixed number of `SentinelList<String>` buckets. The
//!     key's bucket is `hash(key) % bucket_count`; every operation is
//!     delegated to that bucket's list.
//!   - Queue<T>/Stack<T>: thin FIFO/LIFO facades over SentinelList.
//!   - Trie: arena of 26-way nodes over ASCII letters.
//!
//! Constraints
//! - Single-threaded, synchronous; no interior mutability.
//! - The reserved sentinel marker (`"SENTINEL"` for strings, `MAX` for
//!   integers, see [`Reserved`]) is never stored or searched for.
//! - Lists and the table allow duplicates; insert never deduplicates.
//! - Bucket count is fixed at construction; there is no rehashing.
//!
//! Ownership
//! - Links are arena keys, not owning pointers, so there are no ownership
//!   cycles. A removed node's handle is stale forever (slot versions), which
//!   turns double removal into `ListError::StaleHandle` instead of a double
//!   free.
//! - Every list has a process-wide id and its handles carry it. A handle
//!   presented to any other list is `ListError::WrongList`.
//! - Dropping a container drops its arena in one pass; release is never
//!   recursive, however long a list gets.
//!
//! Errors
//! - `ListError` for list-level rejections, `TableError` wraps it for the
//!   table and adds construction failures, `TrieError` for bad trie input.
//!   Nothing panics on bad input.
//!
//! Logging
//! - `tracing` events only; installing a subscriber is left to the caller.

pub mod error;
pub mod hash;
pub mod list;
mod list_proptest;
pub mod queue;
pub mod reserved;
pub mod stack;
pub mod table;
pub mod trie;

// Public surface
pub use error::{ListError, TableError, TrieError};
pub use hash::{bucket_index, djb2, BuildDjb2, Djb2Hasher};
pub use list::{Handle, SentinelList};
pub use queue::Queue;
pub use reserved::{Reserved, SENTINEL};
pub use stack::Stack;
pub use table::{HashTable, TableHandle, DEFAULT_BUCKETS};
pub use trie::Trie;
