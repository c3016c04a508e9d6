/*!
 * Shard Partitioner
 *
 * Routes a key to one of N shards. The index depends only on the key value,
 * so every thread and every phase touching that value meets the same lock.
 */

use crate::core::types::Key;

/// Initial fold state
const SEED: u64 = 19;
/// Odd multipliers mixed by exclusive-or
const PRIME1: u64 = 38_971;
const PRIME2: u64 = 90_053;

/// Pure key-to-shard mapping for a fixed shard count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    shards: usize,
}

impl Partitioner {
    pub fn new(shards: usize) -> Self {
        assert!(shards > 0, "Shard count must be positive");
        Self { shards }
    }

    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards
    }

    /// Shard index in `[0, shard_count)` for this key's value
    #[inline]
    pub fn shard(&self, key: &Key) -> usize {
        self.shard_of_bytes(&key.bytes())
    }

    /// Fold `bytes` through both multipliers and reduce
    #[inline]
    pub fn shard_of_bytes(&self, bytes: &[u8]) -> usize {
        if self.shards == 1 {
            return 0;
        }
        let hash = bytes
            .iter()
            .fold(SEED, |hash, &byte| (hash ^ PRIME1) ^ (u64::from(byte) * PRIME2));
        (hash % self.shards as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shard_degenerates() {
        let partitioner = Partitioner::new(1);
        for byte in 0..=u8::MAX {
            assert_eq!(partitioner.shard_of_bytes(&[byte]), 0);
        }
    }

    #[test]
    fn test_in_range() {
        for shards in [2, 3, 4, 7, 16, 1000] {
            let partitioner = Partitioner::new(shards);
            for byte in 0..=u8::MAX {
                assert!(partitioner.shard_of_bytes(&[byte]) < shards);
            }
        }
    }

    #[test]
    fn test_deterministic_across_instances() {
        let a = Partitioner::new(8);
        let b = Partitioner::new(8);
        for byte in 32..127u8 {
            assert_eq!(a.shard_of_bytes(&[byte]), b.shard_of_bytes(&[byte]));
        }
    }

    #[test]
    fn test_printable_keys_spread_over_four_shards() {
        let partitioner = Partitioner::new(4);
        let mut counts = [0usize; 4];
        for byte in 32..127u8 {
            counts[partitioner.shard_of_bytes(&[byte])] += 1;
        }
        for count in counts {
            assert!(count > 10, "Bad distribution: {:?}", counts);
        }
    }

    #[test]
    #[should_panic(expected = "Shard count must be positive")]
    fn test_zero_shards_rejected() {
        Partitioner::new(0);
    }
}
