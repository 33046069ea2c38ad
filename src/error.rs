//! Error types for the Sapphire II library.

use std::fmt;

/// Errors produced by the Sapphire II library.
///
/// All of these are programmer errors surfaced at the API boundary; the
/// cipher itself has no I/O and no recoverable runtime failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SapphireError {
    /// Key length is not in the range 1..=256 bytes.
    InvalidKeyLength,
    /// Digest length is not in the range 1..=256 bytes.
    InvalidDigestLength,
    /// The cipher state has been burned; only `burn` itself is still legal.
    StateBurned,
}

impl fmt::Display for SapphireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SapphireError::InvalidKeyLength => {
                write!(f, "Key length must be between 1 and 256 bytes")
            }
            SapphireError::InvalidDigestLength => {
                write!(f, "Digest length must be between 1 and 256 bytes")
            }
            SapphireError::StateBurned => {
                write!(f, "Cipher state has been burned")
            }
        }
    }
}

impl std::error::Error for SapphireError {}
