use ed25519_dalek::{Signature, Signer};
use paseto_core::PasetoError;
use paseto_core::key::KeyEncoding;
use paseto_core::version::{PublicVersion, SIGNATURE_LEN};

use super::{PublicKey, SecretKey, V2};

impl PublicKey {
    pub fn as_raw_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Parse a compressed Edwards point. Bytes that are not a valid point are rejected.
    pub fn from_raw_bytes(b: &[u8; 32]) -> Result<Self, PasetoError> {
        ed25519_dalek::VerifyingKey::from_bytes(b)
            .map(PublicKey)
            .map_err(|_| PasetoError::InvalidKey)
    }
}

impl SecretKey {
    /// Build a secret key from its 32 byte seed.
    pub fn from_raw_bytes(seed: &[u8; 32]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(seed))
    }

    /// The 32 byte seed this key was derived from.
    pub fn as_raw_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Build a secret key from the 64 byte `seed || public key` form.
    ///
    /// The public half must match the one derived from the seed.
    pub fn from_keypair_bytes(b: &[u8; 64]) -> Result<Self, PasetoError> {
        ed25519_dalek::SigningKey::from_keypair_bytes(b)
            .map(Self)
            .map_err(|_| PasetoError::InvalidKey)
    }

    /// Generate a random secret key
    pub fn random() -> Result<Self, PasetoError> {
        super::random_bytes().map(|seed| Self::from_raw_bytes(&seed))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }
}

impl KeyEncoding for PublicKey {
    type Version = V2;

    fn decode(bytes: &[u8]) -> Result<PublicKey, PasetoError> {
        let key = bytes.try_into().map_err(|_| PasetoError::InvalidKey)?;
        PublicKey::from_raw_bytes(key)
    }
    fn encode(&self) -> Box<[u8]> {
        self.0.as_bytes().to_vec().into_boxed_slice()
    }
}

impl KeyEncoding for SecretKey {
    type Version = V2;

    /// Accepts the 32 byte seed or the 64 byte keypair.
    fn decode(bytes: &[u8]) -> Result<SecretKey, PasetoError> {
        if let Ok(keypair) = bytes.try_into() {
            return SecretKey::from_keypair_bytes(keypair);
        }
        let seed = bytes.try_into().map_err(|_| PasetoError::InvalidKey)?;
        Ok(SecretKey::from_raw_bytes(seed))
    }
    fn encode(&self) -> Box<[u8]> {
        self.0.to_keypair_bytes().to_vec().into_boxed_slice()
    }
}

impl PublicVersion for V2 {
    type PublicKey = PublicKey;
    type SecretKey = SecretKey;

    fn sign(key: &SecretKey, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        key.0.sign(message).to_bytes()
    }

    fn verify(key: &PublicKey, message: &[u8], signature: &[u8; SIGNATURE_LEN]) -> bool {
        let signature = Signature::from_bytes(signature);
        key.0.verify_strict(message, &signature).is_ok()
    }
}
