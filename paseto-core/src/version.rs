use crate::PasetoError;
use crate::key::KeyEncoding;
use crate::sealed::Sealed;

/// Length of the nonce at the front of every `local` token body.
pub const NONCE_LEN: usize = 24;
/// Length of the detached signature at the end of every `public` token body.
pub const SIGNATURE_LEN: usize = 64;

/// An implementation of the PASETO cryptographic schemes.
pub trait Version: 'static {
    /// Header for PASETO
    const HEADER: &'static str;
}

/// The primitives needed to build and open [`local`](Local) tokens.
pub trait LocalVersion: Version {
    /// A symmetric key used to encrypt and decrypt tokens.
    type LocalKey: KeyEncoding<Version = Self>;

    /// Fresh random nonce for a new token.
    fn random_nonce() -> Result<[u8; NONCE_LEN], PasetoError>;

    /// Keyed hash of `message`, used to derive the encryption nonce from the
    /// random nonce and the plaintext.
    fn keyed_hash(key: &[u8; NONCE_LEN], message: &[u8]) -> [u8; NONCE_LEN];

    /// Authenticated encryption. The returned ciphertext includes the tag.
    fn encrypt(
        key: &Self::LocalKey,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, PasetoError>;

    /// Authenticated decryption.
    ///
    /// Must fail with [`PasetoError::DecryptionFailed`], whatever the reason.
    fn decrypt(
        key: &Self::LocalKey,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, PasetoError>;
}

/// The primitives needed to sign and verify [`public`](Public) tokens.
pub trait PublicVersion: Version {
    /// An asymmetric key used to validate token signatures.
    type PublicKey: KeyEncoding<Version = Self>;
    /// An asymmetric key used to create token signatures.
    type SecretKey: KeyEncoding<Version = Self>;

    /// Create a detached signature over `message`.
    fn sign(key: &Self::SecretKey, message: &[u8]) -> [u8; SIGNATURE_LEN];

    /// Check a detached signature over `message`.
    fn verify(key: &Self::PublicKey, message: &[u8], signature: &[u8; SIGNATURE_LEN]) -> bool;
}

/// Marks tokens as signed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Public;
/// Marks tokens as encrypted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Local;

impl Sealed for Public {}
impl Sealed for Local {}

/// A marker for [`Public`] and [`Local`], used for token encodings.
pub trait Purpose: Sealed + Sized + 'static {
    /// ".local." or ".public."
    const HEADER: &'static str;
    /// The shortest decoded body a token of this purpose can have.
    const MIN_BODY_LEN: usize;

    #[doc(hidden)]
    const WRONG_HEADER: &'static str;
    #[doc(hidden)]
    const SHORT_BODY: &'static str;
}

impl Purpose for Public {
    const HEADER: &'static str = ".public.";
    const MIN_BODY_LEN: usize = SIGNATURE_LEN;

    const WRONG_HEADER: &'static str = "token did not start with v2.public.";
    const SHORT_BODY: &'static str = "token was less than 64 bytes long";
}

impl Purpose for Local {
    const HEADER: &'static str = ".local.";
    const MIN_BODY_LEN: usize = NONCE_LEN;

    const WRONG_HEADER: &'static str = "token did not start with v2.local.";
    const SHORT_BODY: &'static str = "token was less than 24 bytes long";
}
