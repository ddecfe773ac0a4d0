//! Core traits for PASETO keys.

use crate::PasetoError;
use crate::version::Version;

/// Defines a raw byte encoding for a PASETO key.
pub trait KeyEncoding: Sized {
    /// The version of PASETO this key is bound to.
    type Version: Version;

    /// Encode the key into bytes.
    fn encode(&self) -> Box<[u8]>;
    /// Decode the key from bytes.
    fn decode(bytes: &[u8]) -> Result<Self, PasetoError>;
}
