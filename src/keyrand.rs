//! KeySchedule: the key-driven selector used during keyed initialization.
//!
//! Produces swap indices in `0..=limit` using the key as entropy. This is
//! the only point in the system where the key influences state; it runs
//! once per card position (256 times per initialization).
//!
//! Replicates the original `keyrand` routine exactly, including the
//! retry bound of 11 before falling back to modulo reduction. That bound
//! is load-bearing for cross-implementation state equivalence and must
//! never be tuned.

/// Maximum number of rejected candidates before falling back to
/// `rsum mod (limit + 1)` to guarantee termination.
const MAX_RETRIES: u32 = 11;

/// Key-driven pseudo-random index selector.
///
/// Borrows the key for the duration of initialization; holds the running
/// accumulator `rsum` and the key cursor `keypos`.
pub(crate) struct KeySchedule<'k> {
    key: &'k [u8],
    keypos: usize,
    rsum: u8,
}

impl<'k> KeySchedule<'k> {
    /// Creates a schedule over `key`. The caller guarantees
    /// `1 <= key.len() <= 256`.
    pub(crate) fn new(key: &'k [u8]) -> Self {
        KeySchedule {
            key,
            keypos: 0,
            rsum: 0,
        }
    }

    /// Returns the current accumulator value.
    ///
    /// After the shuffle, the engine seeds `last_cipher` from
    /// `cards[rsum]`.
    pub(crate) fn rsum(&self) -> u8 {
        self.rsum
    }

    /// Selects the next swap index in `0..=limit`, driven by the key.
    ///
    /// A `limit` of 0 returns 0 immediately without consuming key
    /// material. Otherwise the accumulator is stirred with card and key
    /// bytes until a masked candidate lands in range; after more than
    /// 11 rejections the candidate is reduced modulo `limit + 1` instead,
    /// at vanishing loss of uniformity.
    ///
    /// When the key cursor wraps, the key length is folded into the
    /// accumulator. This is deliberate: it makes `"aaaa"` and
    /// `"aaaaaaaa"` produce different trajectories.
    ///
    /// # Parameters
    /// - `cards`: The current card permutation (read-only here).
    /// - `limit`: Upper bound (inclusive) for the returned index.
    pub(crate) fn next_index(&mut self, cards: &[u8; 256], limit: u8) -> u8 {
        if limit == 0 {
            return 0;
        }

        // Smallest all-ones mask covering the limit.
        let mut mask: u8 = 1;
        while mask < limit {
            mask = (mask << 1) | 1;
        }

        let mut retries = 0u32;
        loop {
            self.rsum = cards[self.rsum as usize].wrapping_add(self.key[self.keypos]);
            self.keypos += 1;
            if self.keypos >= self.key.len() {
                self.keypos = 0;
                // A 256-byte key folds in as 0, matching mod-256 arithmetic.
                self.rsum = self.rsum.wrapping_add(self.key.len() as u8);
            }

            let candidate = self.rsum & mask;
            if candidate <= limit {
                return candidate;
            }

            retries += 1;
            if retries > MAX_RETRIES {
                return (self.rsum as u16 % (limit as u16 + 1)) as u8;
            }
        }
    }
}
