//! Sapphire: the Sapphire II stream cipher engine.
//!
//! Drives the per-byte state machine: keyed and unkeyed initialization,
//! encrypt/decrypt updates, hash finalization, reset, and burn.
//!
//! Compatible byte-for-byte with the original reference implementation.
//! Encryption and decryption run the identical common update; they differ
//! only in which of the two "last byte" fields receives the input versus
//! the output, so the state evolution is symmetric on both sides.

use zeroize::Zeroize;

use crate::error::SapphireError;
use crate::keyrand::KeySchedule;
use crate::state::CipherState;

/// Post-initialization snapshot kept by resettable instances.
///
/// Holding this is a documented trade-off: key-derived material stays in
/// memory for the life of the instance in exchange for cheap re-keying.
#[derive(Debug)]
struct Snapshot {
    cards: [u8; 256],
    rsum: u8,
}

/// Sapphire II stream cipher instance.
///
/// A `Sapphire` owns its [`CipherState`] exclusively; the `&mut self`
/// receivers encode the strictly-sequential contract. Every operation is
/// synchronous and O(1) per byte.
///
/// The state is zeroized by [`burn`](Self::burn), which also runs on
/// drop, so key-derived material never outlives the instance.
///
/// # Examples
///
/// ```
/// use sapphire2::Sapphire;
///
/// let mut encoder = Sapphire::new_keyed(b"secret").unwrap();
/// let mut decoder = Sapphire::new_keyed(b"secret").unwrap();
///
/// let ct = encoder.encrypt_byte(b'x').unwrap();
/// assert_eq!(decoder.decrypt_byte(ct).unwrap(), b'x');
/// ```
#[derive(Debug)]
pub struct Sapphire {
    state: CipherState,
    snapshot: Option<Snapshot>,
    burned: bool,
}

impl Sapphire {
    /// Creates a keyed cipher instance.
    ///
    /// Shuffles the canonical deck with the key-driven selector, then
    /// seeds the five indices from card positions so that no field
    /// starts at zero (hiding the state at the moment the first output
    /// byte is emitted).
    ///
    /// No post-init snapshot is kept: [`reset`](Self::reset) on an
    /// instance built this way falls back to the unkeyed hash layout.
    /// Use [`new_keyed_resettable`](Self::new_keyed_resettable) when the
    /// key must be reusable without re-running initialization.
    ///
    /// # Parameters
    /// - `key`: Key bytes, length 1..=256.
    ///
    /// # Errors
    /// Returns [`SapphireError::InvalidKeyLength`] if the key is empty
    /// or longer than 256 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sapphire2::Sapphire;
    ///
    /// assert!(Sapphire::new_keyed(b"k").is_ok());
    /// assert!(Sapphire::new_keyed(b"").is_err());
    /// ```
    pub fn new_keyed(key: &[u8]) -> Result<Self, SapphireError> {
        let (state, _rsum) = Self::keyed_state(key)?;
        Ok(Sapphire {
            state,
            snapshot: None,
            burned: false,
        })
    }

    /// Creates a keyed cipher instance that supports [`reset`](Self::reset).
    ///
    /// Identical to [`new_keyed`](Self::new_keyed), but saves a copy of
    /// the post-initialization deck and accumulator. The saved copy is
    /// key-derived material that stays in memory until the instance is
    /// burned or dropped — the separate constructor exists to make that
    /// trade-off visible at the call site.
    ///
    /// # Parameters
    /// - `key`: Key bytes, length 1..=256.
    ///
    /// # Errors
    /// Returns [`SapphireError::InvalidKeyLength`] if the key is empty
    /// or longer than 256 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sapphire2::Sapphire;
    ///
    /// let mut cipher = Sapphire::new_keyed_resettable(b"secret").unwrap();
    /// let first = cipher.encrypt_byte(42).unwrap();
    /// cipher.reset().unwrap();
    /// assert_eq!(cipher.encrypt_byte(42).unwrap(), first);
    /// ```
    pub fn new_keyed_resettable(key: &[u8]) -> Result<Self, SapphireError> {
        let (state, rsum) = Self::keyed_state(key)?;
        let snapshot = Snapshot {
            cards: state.cards,
            rsum,
        };
        Ok(Sapphire {
            state,
            snapshot: Some(snapshot),
            burned: false,
        })
    }

    /// Creates an unkeyed instance for hash mode.
    ///
    /// The starting deck is the fixed inverse-order permutation with
    /// indices `1, 3, 5, 7, 11`. Feed data through
    /// [`encrypt_byte`](Self::encrypt_byte) or [`encrypt`](Self::encrypt)
    /// (discarding the outputs is unnecessary — they are the absorb
    /// step), then call [`hash_final`](Self::hash_final).
    ///
    /// # Examples
    ///
    /// ```
    /// use sapphire2::Sapphire;
    ///
    /// let mut hasher = Sapphire::new_hash();
    /// let mut data = *b"abc";
    /// hasher.encrypt(&mut data).unwrap();
    /// let digest = hasher.hash_final(20).unwrap();
    /// assert_eq!(digest.len(), 20);
    /// ```
    pub fn new_hash() -> Self {
        Sapphire {
            state: CipherState::reversed(),
            snapshot: None,
            burned: false,
        }
    }

    /// Runs the keyed initialization: identity deck, key-driven shuffle
    /// from position 255 down to 0, index seeding. Returns the state and
    /// the schedule's final accumulator.
    fn keyed_state(key: &[u8]) -> Result<(CipherState, u8), SapphireError> {
        if key.is_empty() || key.len() > 256 {
            return Err(SapphireError::InvalidKeyLength);
        }

        let mut state = CipherState::identity();
        let mut schedule = KeySchedule::new(key);
        for i in (0..256usize).rev() {
            let j = schedule.next_index(&state.cards, i as u8) as usize;
            state.cards.swap(i, j);
        }

        let rsum = schedule.rsum();
        state.seed_indices(rsum);
        Ok((state, rsum))
    }

    /// Encrypts one byte, advancing the state.
    ///
    /// # Parameters
    /// - `b`: The plaintext byte.
    ///
    /// # Returns
    /// The ciphertext byte.
    ///
    /// # Errors
    /// Returns [`SapphireError::StateBurned`] on a burned instance.
    pub fn encrypt_byte(&mut self, b: u8) -> Result<u8, SapphireError> {
        self.check_live()?;
        Ok(self.encrypt_byte_raw(b))
    }

    /// Decrypts one byte, advancing the state.
    ///
    /// # Parameters
    /// - `b`: The ciphertext byte.
    ///
    /// # Returns
    /// The plaintext byte.
    ///
    /// # Errors
    /// Returns [`SapphireError::StateBurned`] on a burned instance.
    pub fn decrypt_byte(&mut self, b: u8) -> Result<u8, SapphireError> {
        self.check_live()?;
        Ok(self.decrypt_byte_raw(b))
    }

    /// Encrypts a buffer in place.
    ///
    /// Equivalent to calling [`encrypt_byte`](Self::encrypt_byte) on
    /// every byte in order; no buffering of its own.
    ///
    /// # Parameters
    /// - `data`: Plaintext in, ciphertext out.
    ///
    /// # Errors
    /// Returns [`SapphireError::StateBurned`] on a burned instance.
    pub fn encrypt(&mut self, data: &mut [u8]) -> Result<(), SapphireError> {
        self.check_live()?;
        for byte in data.iter_mut() {
            *byte = self.encrypt_byte_raw(*byte);
        }
        Ok(())
    }

    /// Decrypts a buffer in place.
    ///
    /// On a resettable instance this first restores the post-init state,
    /// matching the common "fresh cipher for each message" pattern; a
    /// freshly initialized non-resettable instance is already at the
    /// post-init state and decrypts as-is.
    ///
    /// For decrypting a stream byte-at-a-time without the implicit
    /// reset, use [`decrypt_byte`](Self::decrypt_byte).
    ///
    /// # Parameters
    /// - `data`: Ciphertext in, plaintext out.
    ///
    /// # Errors
    /// Returns [`SapphireError::StateBurned`] on a burned instance.
    pub fn decrypt(&mut self, data: &mut [u8]) -> Result<(), SapphireError> {
        self.check_live()?;
        if let Some(snapshot) = &self.snapshot {
            self.state.cards = snapshot.cards;
            self.state.seed_indices(snapshot.rsum);
        }
        for byte in data.iter_mut() {
            *byte = self.decrypt_byte_raw(*byte);
        }
        Ok(())
    }

    /// Finalizes hash mode and returns the digest.
    ///
    /// Flushes the state by feeding the values 255 down to 0 through the
    /// encrypt update (discarding outputs), then collects `digest_len`
    /// keystream bytes produced from zero inputs.
    ///
    /// The digest is deterministic and byte-identical across runs and
    /// implementations. It is suitable as a non-cryptographic integrity
    /// check, not as a modern cryptographic hash.
    ///
    /// # Parameters
    /// - `digest_len`: Digest length in bytes, 1..=256.
    ///
    /// # Errors
    /// Returns [`SapphireError::InvalidDigestLength`] if `digest_len`
    /// is 0 or greater than 256, [`SapphireError::StateBurned`] on a
    /// burned instance.
    pub fn hash_final(&mut self, digest_len: usize) -> Result<Vec<u8>, SapphireError> {
        self.check_live()?;
        if digest_len == 0 || digest_len > 256 {
            return Err(SapphireError::InvalidDigestLength);
        }

        for b in (0..=255u8).rev() {
            self.encrypt_byte_raw(b);
        }

        let mut digest = Vec::with_capacity(digest_len);
        for _ in 0..digest_len {
            digest.push(self.encrypt_byte_raw(0));
        }
        Ok(digest)
    }

    /// Restores the post-initialization state.
    ///
    /// On a resettable instance, restores the saved deck and re-derives
    /// the five indices exactly as keyed initialization did; the state
    /// is then byte-equal to the moment after construction. Without a
    /// snapshot there is nothing to restore and the state degrades to
    /// the unkeyed hash layout.
    ///
    /// # Errors
    /// Returns [`SapphireError::StateBurned`] on a burned instance.
    pub fn reset(&mut self) -> Result<(), SapphireError> {
        self.check_live()?;
        match &self.snapshot {
            Some(snapshot) => {
                self.state.cards = snapshot.cards;
                self.state.seed_indices(snapshot.rsum);
            }
            None => self.state = CipherState::reversed(),
        }
        Ok(())
    }

    /// Zeroizes the entire state, including any saved snapshot.
    ///
    /// After burning, every operation except `burn` itself fails with
    /// [`SapphireError::StateBurned`]. Idempotent. Also runs on drop,
    /// so an explicit call is only needed to wipe key material early.
    pub fn burn(&mut self) {
        self.state.burn();
        if let Some(snapshot) = &mut self.snapshot {
            snapshot.cards.zeroize();
            snapshot.rsum.zeroize();
        }
        self.snapshot = None;
        self.burned = true;
    }

    /// Rejects operations on a burned state.
    fn check_live(&self) -> Result<(), SapphireError> {
        if self.burned {
            Err(SapphireError::StateBurned)
        } else {
            Ok(())
        }
    }

    /// Common state update shared by encryption and decryption.
    ///
    /// Advances ratchet and rotor, performs the four-way rotation-swap
    /// through `last_cipher`, `ratchet`, `last_plain` and `rotor`, folds
    /// the displaced card into the avalanche, and derives the keystream
    /// byte. The double indirection `cards[cards[...]]` in the second
    /// operand is essential and must not be simplified.
    fn next_keystream(&mut self) -> u8 {
        let st = &mut self.state;

        st.ratchet = st.ratchet.wrapping_add(st.cards[st.rotor as usize]);
        st.rotor = st.rotor.wrapping_add(1);

        // Four-way rotation-swap, in this exact order.
        let t = st.cards[st.last_cipher as usize];
        st.cards[st.last_cipher as usize] = st.cards[st.ratchet as usize];
        st.cards[st.ratchet as usize] = st.cards[st.last_plain as usize];
        st.cards[st.last_plain as usize] = st.cards[st.rotor as usize];
        st.cards[st.rotor as usize] = t;

        st.avalanche = st.avalanche.wrapping_add(st.cards[t as usize]);

        let direct = st.cards[st.ratchet as usize].wrapping_add(st.cards[st.rotor as usize]);
        let indirect = st.cards[st.last_plain as usize]
            .wrapping_add(st.cards[st.last_cipher as usize])
            .wrapping_add(st.cards[st.avalanche as usize]);
        st.cards[direct as usize] ^ st.cards[st.cards[indirect as usize] as usize]
    }

    /// Encrypt update without the burn check (callers have checked).
    fn encrypt_byte_raw(&mut self, b: u8) -> u8 {
        let out = b ^ self.next_keystream();
        self.state.last_plain = b;
        self.state.last_cipher = out;
        out
    }

    /// Decrypt update without the burn check (callers have checked).
    fn decrypt_byte_raw(&mut self, b: u8) -> u8 {
        let out = b ^ self.next_keystream();
        self.state.last_cipher = b;
        self.state.last_plain = out;
        out
    }
}

impl Drop for Sapphire {
    /// Securely clears all key-derived state on drop.
    fn drop(&mut self) {
        self.burn();
    }
}
