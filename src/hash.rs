//! djb2 string hashing and bucket selection.
//!
//! `hash = hash * 33 + byte`, seeded with 5381, on a wrapping `u64`. The
//! wraparound is part of the contract: the same key maps to the same
//! bucket on every platform.

use core::hash::{BuildHasher, Hasher};

pub const DJB2_SEED: u64 = 5381;

#[inline]
pub fn djb2(bytes: &[u8]) -> u64 {
    let mut h = Djb2Hasher::default();
    h.write(bytes);
    h.finish()
}

/// Bucket of `key` in a table of `buckets` lists. `buckets` must be nonzero.
#[inline]
pub fn bucket_index(key: &str, buckets: usize) -> usize {
    debug_assert!(buckets > 0);
    (djb2(key.as_bytes()) % buckets as u64) as usize
}

/// Streaming djb2. Successive `write` calls continue the same accumulator,
/// so feeding a key in pieces gives the same result as feeding it whole.
#[derive(Clone, Copy, Debug)]
pub struct Djb2Hasher {
    state: u64,
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self { state: DJB2_SEED }
    }
}

impl Hasher for Djb2Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &c in bytes {
            self.state = self.state.wrapping_mul(33).wrapping_add(u64::from(c));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

/// `BuildHasher` for [`Djb2Hasher`]; the default hasher of
/// [`HashTable`](crate::table::HashTable).
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildDjb2;

impl BuildHasher for BuildDjb2 {
    type Hasher = Djb2Hasher;
    fn build_hasher(&self) -> Self::Hasher {
        Djb2Hasher::default()
    }
}
