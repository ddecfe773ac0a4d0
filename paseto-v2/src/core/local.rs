use chacha20poly1305::XChaCha20Poly1305;
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use digest::Mac;
use generic_array::typenum::U24;
use paseto_core::PasetoError;
use paseto_core::key::KeyEncoding;
use paseto_core::version::{LocalVersion, NONCE_LEN};

use super::{LocalKey, V2};

impl LocalKey {
    pub fn as_raw_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_raw_bytes(b: [u8; 32]) -> Self {
        Self(b)
    }

    /// Generate a random local key
    pub fn random() -> Result<Self, PasetoError> {
        super::random_bytes().map(Self)
    }
}

impl KeyEncoding for LocalKey {
    type Version = V2;

    fn decode(bytes: &[u8]) -> Result<LocalKey, PasetoError> {
        bytes
            .try_into()
            .map(LocalKey)
            .map_err(|_| PasetoError::InvalidKey)
    }
    fn encode(&self) -> Box<[u8]> {
        self.0.to_vec().into_boxed_slice()
    }
}

impl LocalVersion for V2 {
    type LocalKey = LocalKey;

    fn random_nonce() -> Result<[u8; NONCE_LEN], PasetoError> {
        super::random_bytes()
    }

    fn keyed_hash(key: &[u8; NONCE_LEN], message: &[u8]) -> [u8; NONCE_LEN] {
        let mut n: blake2::Blake2bMac<U24> =
            Mac::new_from_slice(key).expect("24 bytes is less than the 64 bytes max");
        n.update(message);
        n.finalize().into_bytes().into()
    }

    fn encrypt(
        key: &LocalKey,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, PasetoError> {
        XChaCha20Poly1305::new((&key.0).into())
            .encrypt(
                nonce.into(),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| PasetoError::CryptoError)
    }

    fn decrypt(
        key: &LocalKey,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, PasetoError> {
        XChaCha20Poly1305::new((&key.0).into())
            .decrypt(
                nonce.into(),
                Payload {
                    msg: ciphertext,
                    aad,
                },
            )
            .map_err(|_| PasetoError::DecryptionFailed)
    }
}
