//! CipherState: the Sapphire II internal state.
//!
//! Holds the 256-byte permutation ("cards") and the five index bytes that
//! together constitute the cipher state. Pure data — all manipulation
//! beyond zeroization happens in the engine and the key schedule.
//!
//! The `cards` array is a permutation of 0..=255 at every point in the
//! state's life; every update is a swap or a rotation, never an
//! overwrite. Zeroization goes through the `zeroize` crate so the wipe
//! cannot be elided by the optimizer.

use zeroize::Zeroize;

/// Internal state of a Sapphire II instance.
///
/// Owned by exactly one [`Sapphire`](crate::Sapphire); never shared.
#[derive(Debug)]
pub(crate) struct CipherState {
    /// Permutation of the 256 byte values.
    pub(crate) cards: [u8; 256],
    pub(crate) rotor: u8,
    pub(crate) ratchet: u8,
    pub(crate) avalanche: u8,
    /// Plaintext of the most recent byte (or seed value).
    pub(crate) last_plain: u8,
    /// Ciphertext of the most recent byte (or seed value).
    pub(crate) last_cipher: u8,
}

impl CipherState {
    /// Creates the canonical starting state for keyed initialization:
    /// `cards[i] = i`, all indices zero.
    pub(crate) fn identity() -> Self {
        let mut cards = [0u8; 256];
        for (i, card) in cards.iter_mut().enumerate() {
            *card = i as u8;
        }
        CipherState {
            cards,
            rotor: 0,
            ratchet: 0,
            avalanche: 0,
            last_plain: 0,
            last_cipher: 0,
        }
    }

    /// Creates the fixed unkeyed state for hash mode.
    ///
    /// `cards[i] = 255 - i` with indices `1, 3, 5, 7, 11`. These exact
    /// constants are part of the contract: changing any of them breaks
    /// cross-implementation hash compatibility.
    pub(crate) fn reversed() -> Self {
        let mut cards = [0u8; 256];
        for (i, card) in cards.iter_mut().enumerate() {
            *card = 255 - i as u8;
        }
        CipherState {
            cards,
            rotor: 1,
            ratchet: 3,
            avalanche: 5,
            last_plain: 7,
            last_cipher: 11,
        }
    }

    /// Seeds the five indices from the shuffled deck so that no field
    /// starts at zero.
    ///
    /// `rsum` is the final accumulator value of the key schedule. Seeding
    /// from card positions hides the state at the moment the first output
    /// byte is emitted. Used both after the keyed shuffle and when
    /// restoring a saved post-init snapshot.
    pub(crate) fn seed_indices(&mut self, rsum: u8) {
        self.rotor = self.cards[1];
        self.ratchet = self.cards[3];
        self.avalanche = self.cards[5];
        self.last_plain = self.cards[7];
        self.last_cipher = self.cards[rsum as usize];
    }

    /// Overwrites every field with zero.
    ///
    /// Goes through [`Zeroize`] rather than plain assignment so the
    /// writes survive optimization. Idempotent. Note that a zeroed
    /// `cards` array is no longer a permutation; a burned state is dead
    /// by contract.
    pub(crate) fn burn(&mut self) {
        self.cards.zeroize();
        self.rotor.zeroize();
        self.ratchet.zeroize();
        self.avalanche.zeroize();
        self.last_plain.zeroize();
        self.last_cipher.zeroize();
    }

    /// Returns `true` if `cards` contains every value 0..=255 exactly once.
    #[cfg(test)]
    pub(crate) fn is_permutation(&self) -> bool {
        let mut seen = [false; 256];
        for &card in self.cards.iter() {
            seen[card as usize] = true;
        }
        seen.iter().all(|&s| s)
    }
}
