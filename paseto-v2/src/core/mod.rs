use paseto_core::version;

#[cfg(feature = "local")]
mod local;
#[cfg(feature = "public")]
mod public;

/// PASETO v2: XChaCha20-Poly1305 with a BLAKE2b derived nonce for `local`,
/// Ed25519 for `public`.
pub struct V2;

impl version::Version for V2 {
    const HEADER: &'static str = "v2";
}

/// Symmetric key for `v2.local` tokens. Zeroized on drop.
#[cfg(feature = "local")]
#[derive(Clone, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct LocalKey([u8; 32]);

/// Ed25519 signing key for `v2.public` tokens.
#[cfg(feature = "public")]
#[derive(Clone)]
pub struct SecretKey(ed25519_dalek::SigningKey);

/// Ed25519 verifying key for `v2.public` tokens.
#[cfg(feature = "public")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(ed25519_dalek::VerifyingKey);

fn random_bytes<const N: usize>() -> Result<[u8; N], paseto_core::PasetoError> {
    let mut bytes = [0; N];
    getrandom::fill(&mut bytes).map_err(|_| paseto_core::PasetoError::CryptoError)?;
    Ok(bytes)
}
