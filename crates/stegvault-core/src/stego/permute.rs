//! Keyed pseudo-random permutation of embedding slots.
//!
//! The permutation is a forward Fisher-Yates shuffle of `0..n` driven by a
//! ChaCha20 stream whose key is the 32-bit seed in big-endian order followed
//! by 28 zero bytes. Each draw takes two `u32` words from the stream (low word
//! first) and reduces them to `0..bound` by rejection sampling, so the mapping
//! from seed to permutation is fixed across platforms and releases.
//!
//! [`generate`] materializes the whole permutation. [`PixelPermutation`]
//! yields the same sequence lazily, tracking only the positions the shuffle
//! has touched, which keeps memory proportional to the payload rather than
//! to the image.

use std::collections::HashMap;

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Deterministic index source for the shuffle.
pub struct SlotRng {
    inner: ChaCha20Rng,
}

impl SlotRng {
    pub fn new(seed: u32) -> Self {
        let mut key = [0u8; 32];
        key[..4].copy_from_slice(&seed.to_be_bytes());
        Self {
            inner: ChaCha20Rng::from_seed(key),
        }
    }

    fn next_word(&mut self) -> u64 {
        let lo = u64::from(self.inner.next_u32());
        let hi = u64::from(self.inner.next_u32());
        (hi << 32) | lo
    }

    /// Uniform value in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        let zone = (u64::MAX / bound) * bound;
        loop {
            let word = self.next_word();
            if word < zone {
                return word % bound;
            }
        }
    }
}

/// Full permutation of `0..n` for `seed`.
pub fn generate(seed: u32, n: usize) -> Vec<usize> {
    let mut rng = SlotRng::new(seed);
    let mut order: Vec<usize> = (0..n).collect();
    for i in 0..n.saturating_sub(1) {
        let j = i + rng.below((n - i) as u64) as usize;
        order.swap(i, j);
    }
    order
}

/// Lazy prefix of the permutation of `0..n`.
///
/// Taking `k` items yields exactly `generate(seed, n)[..k]`.
pub struct PixelPermutation {
    rng: SlotRng,
    len: usize,
    position: usize,
    displaced: HashMap<usize, usize>,
}

impl PixelPermutation {
    pub fn new(seed: u32, len: usize) -> Self {
        Self {
            rng: SlotRng::new(seed),
            len,
            position: 0,
            displaced: HashMap::new(),
        }
    }

    fn value_at(&self, index: usize) -> usize {
        self.displaced.get(&index).copied().unwrap_or(index)
    }
}

impl Iterator for PixelPermutation {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let i = self.position;
        if i >= self.len {
            return None;
        }
        let current = self.value_at(i);
        let chosen = if i + 1 < self.len {
            let j = i + self.rng.below((self.len - i) as u64) as usize;
            let swapped = self.value_at(j);
            self.displaced.insert(j, current);
            swapped
        } else {
            current
        };
        // Position i is never read again.
        self.displaced.remove(&i);
        self.position += 1;
        Some(chosen)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PixelPermutation {}
