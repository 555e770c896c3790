//! Error types shared by the containers.

use thiserror::Error;

/// Failures reported by [`SentinelList`](crate::list::SentinelList) and the
/// containers built on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// Storage for a new value could not be reserved.
    #[error("failed to allocate memory for a new node")]
    Allocation,
    /// The reserved sentinel marker was passed as a value.
    #[error("the reserved sentinel value cannot be stored or searched for")]
    InvalidValue,
    /// An attempt was made to unlink the sentinel node.
    #[error("the sentinel node cannot be removed")]
    InvalidOperation,
    /// The handle no longer refers to a live node.
    #[error("handle does not refer to a live node")]
    StaleHandle,
    /// The handle was produced by a different list.
    #[error("handle belongs to a different list")]
    WrongList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("a hash table needs at least one bucket")]
    NoBuckets,
    #[error("failed to allocate {buckets} buckets")]
    Allocation { buckets: usize },
    #[error(transparent)]
    List(#[from] ListError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrieError {
    #[error("`{ch}` is not an ascii letter")]
    NonAlphabetic { ch: char },
}
