//! Core traits and framing for PASETO v2.
//!
//! This crate knows the wire format and the pre-authentication encoding, but not
//! the cryptography. Implementations of [`version::LocalVersion`] and
//! [`version::PublicVersion`] (such as `paseto-v2`) plug the primitives in.
#![forbid(unsafe_code)]

pub mod base64;
pub mod encodings;
pub mod key;
pub mod pae;
pub mod tokens;
pub mod validation;
pub mod version;

mod sealed {
    pub trait Sealed {}
}

/// Error returned for all PASETO operations that can fail.
///
/// Signature verification failures are not represented here: a token that
/// fails to verify produces no value at all. See [`tokens::SignedToken::verify`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PasetoError {
    /// The data was not Base64 URL encoded correctly.
    #[error("the data could not be base64 decoded")]
    Base64DecodeError,
    /// Could not decode the provided key.
    #[error("could not parse the key")]
    InvalidKey,
    /// The PASETO was not of a valid form.
    #[error("the format of the token was invalid: {0}")]
    InvalidToken(&'static str),
    /// The local token could not be authenticated or decrypted.
    #[error("the token could not be decrypted")]
    DecryptionFailed,
    /// A cryptographic primitive or the system random source failed.
    #[error("a cryptographic operation failed")]
    CryptoError,
    /// The token was authentic, but its payload or footer was not valid claims JSON.
    #[error("the token claims were malformed: {0}")]
    InvalidClaims(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// PASETO claims failed validation.
    #[error("token claims could not be validated")]
    ClaimsError,
    /// A freshly signed token did not verify against the supplied public key.
    #[error("the signed token could not be verified with the given public key")]
    ConstructionInvariantViolated,
}
