//! HashTable: fixed number of sentinel lists with chained collisions.
//!
//! A key is hashed once to pick its bucket and every operation is then
//! delegated to that bucket's list. The bucket count is chosen at
//! construction and never changes, so a key's bucket is stable for the
//! lifetime of the table.

use crate::error::{ListError, TableError};
use crate::hash::BuildDjb2;
use crate::list::{Handle, SentinelList};
use core::fmt;
use core::hash::{BuildHasher, Hasher};

pub const DEFAULT_BUCKETS: usize = 5;

/// Location of one stored key: its bucket plus the node inside that bucket.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TableHandle {
    bucket: usize,
    node: Handle,
}

impl TableHandle {
    pub fn bucket(&self) -> usize {
        self.bucket
    }
    pub fn node(&self) -> Handle {
        self.node
    }

    pub fn value<'a, S>(&self, table: &'a HashTable<S>) -> Option<&'a str> {
        table.get(*self)
    }
}

pub struct HashTable<S = BuildDjb2> {
    buckets: Vec<SentinelList<String>>,
    hasher: S,
}

impl HashTable {
    /// Table with [`DEFAULT_BUCKETS`] buckets and the djb2 hasher.
    pub fn new() -> Result<Self, TableError> {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    pub fn with_buckets(buckets: usize) -> Result<Self, TableError> {
        Self::with_buckets_and_hasher(buckets, BuildDjb2)
    }
}

impl<S> HashTable<S> {
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of stored keys, duplicates included. O(buckets).
    pub fn len(&self) -> usize {
        self.buckets.iter().map(SentinelList::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(SentinelList::is_empty)
    }

    pub fn bucket(&self, index: usize) -> Option<&SentinelList<String>> {
        self.buckets.get(index)
    }

    pub fn get(&self, handle: TableHandle) -> Option<&str> {
        self.buckets
            .get(handle.bucket)?
            .get(handle.node)
            .map(String::as_str)
    }

    /// Empty every bucket. Sentinels and the bucket count are kept.
    pub fn clear(&mut self) {
        for b in &mut self.buckets {
            b.clear();
        }
    }

    /// Keys with their bucket index, bucket by bucket, each in list order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(i, b)| b.iter().map(move |k| (i, k.as_str())))
    }

    pub fn remove_handle(&mut self, handle: TableHandle) -> Result<String, TableError> {
        let bucket = self
            .buckets
            .get_mut(handle.bucket)
            .ok_or(ListError::StaleHandle)?;
        Ok(bucket.remove(handle.node)?)
    }
}

impl<S: BuildHasher> HashTable<S> {
    /// Allocate `buckets` empty lists up front. Either every bucket exists
    /// or no table is returned.
    pub fn with_buckets_and_hasher(buckets: usize, hasher: S) -> Result<Self, TableError> {
        if buckets == 0 {
            tracing::warn!("refusing to create a hash table without buckets");
            return Err(TableError::NoBuckets);
        }
        let mut lists = Vec::new();
        lists.try_reserve_exact(buckets).map_err(|e| {
            tracing::error!(error = %e, buckets, "failed to allocate hash table buckets");
            TableError::Allocation { buckets }
        })?;
        lists.extend((0..buckets).map(|_| SentinelList::new()));
        tracing::debug!(buckets, "created hash table");
        Ok(Self {
            buckets: lists,
            hasher,
        })
    }

    /// Bucket that holds (or would hold) `key`.
    pub fn bucket_of(&self, key: &str) -> usize {
        // Raw bytes only: `str::hash` appends a terminator byte.
        let mut h = self.hasher.build_hasher();
        h.write(key.as_bytes());
        (h.finish() % self.buckets.len() as u64) as usize
    }

    /// Add `key` at the front of its bucket. Keys are not deduplicated.
    pub fn insert(&mut self, key: &str) -> Result<TableHandle, TableError> {
        let bucket = self.bucket_of(key);
        let node = self.buckets[bucket].insert_str(key)?;
        tracing::trace!(bucket, "inserted key");
        Ok(TableHandle { bucket, node })
    }

    pub fn find(&self, key: &str) -> Result<Option<TableHandle>, TableError> {
        let bucket = self.bucket_of(key);
        let node = self.buckets[bucket].find(key)?;
        Ok(node.map(|node| TableHandle { bucket, node }))
    }

    pub fn contains(&self, key: &str) -> bool {
        matches!(self.find(key), Ok(Some(_)))
    }

    /// Remove the first node holding `key` in its bucket. `Ok(None)` means
    /// the key was not present and nothing changed.
    pub fn remove(&mut self, key: &str) -> Result<Option<String>, TableError> {
        let Some(handle) = self.find(key)? else {
            tracing::debug!("no entry to remove");
            return Ok(None);
        };
        let value = self.buckets[handle.bucket].remove(handle.node)?;
        tracing::trace!(bucket = handle.bucket, "removed key");
        Ok(Some(value))
    }
}

impl<S> fmt::Debug for HashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().enumerate())
            .finish()
    }
}

/// One line per bucket: `"{index} = {contents}"`.
impl<S> fmt::Display for HashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.buckets.iter().enumerate() {
            writeln!(f, "{i} = {b}")?;
        }
        Ok(())
    }
}
