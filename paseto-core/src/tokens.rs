//! Token framing.
//!
//! A [`SealedToken`] is the wire value: a header, a body and an optional footer.
//! Parse one with [`str::parse`], render it with [`ToString`].

use core::marker::PhantomData;

use crate::PasetoError;
use crate::pae::pae;
use crate::version::{self, LocalVersion, NONCE_LEN, PublicVersion, SIGNATURE_LEN};

pub type SignedToken<V> = SealedToken<V, version::Public>;
pub type EncryptedToken<V> = SealedToken<V, version::Local>;

/// The contents of a token whose signature or encryption has been checked.
///
/// A token without a footer has an empty `footer`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedToken {
    /// The message that was contained in the token
    pub payload: Vec<u8>,
    /// The footer that was sent with the token
    pub footer: Vec<u8>,
}

/// A secured token.
///
/// This represents a PASETO that is signed or encrypted.
/// Using one of the following aliases is suggested
/// * [`SignedToken`] - A [`public`](version::Public) PASETO that is signed.
/// * [`EncryptedToken`] - A [`local`](version::Local) PASETO that is encrypted.
///
/// To read the contents you will need to use either
/// * [`SignedToken::verify`]
/// * [`EncryptedToken::decrypt`]
pub struct SealedToken<V, P> {
    pub(crate) payload: Vec<u8>,
    pub(crate) footer: Vec<u8>,
    pub(crate) _version: PhantomData<V>,
    pub(crate) _purpose: PhantomData<P>,
}

impl<V, P> Clone for SealedToken<V, P> {
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            footer: self.footer.clone(),
            _version: PhantomData,
            _purpose: PhantomData,
        }
    }
}

impl<V, P> SealedToken<V, P> {
    /// View the **unverified** footer for this token
    pub fn unverified_footer(&self) -> &[u8] {
        &self.footer
    }

    fn new(payload: Vec<u8>, footer: &[u8]) -> Self {
        Self {
            payload,
            footer: footer.to_vec(),
            _version: PhantomData,
            _purpose: PhantomData,
        }
    }
}

fn header<V: version::Version, P: version::Purpose>() -> String {
    let mut header = String::with_capacity(V::HEADER.len() + P::HEADER.len());
    header.push_str(V::HEADER);
    header.push_str(P::HEADER);
    header
}

impl<V: LocalVersion> EncryptedToken<V> {
    /// Encrypt `payload` with a random nonce.
    ///
    /// The footer is authenticated but not encrypted.
    pub fn encrypt(key: &V::LocalKey, payload: &[u8], footer: &[u8]) -> Result<Self, PasetoError> {
        let nonce = V::random_nonce()?;
        Self::dangerous_encrypt_with_nonce(key, &nonce, payload, footer)
    }

    /// Encrypt `payload` with a caller chosen nonce.
    ///
    /// Reusing a nonce with the same key and payload produces the same token,
    /// which leaks equality of payloads. Only use this for test vectors.
    pub fn dangerous_encrypt_with_nonce(
        key: &V::LocalKey,
        nonce: &[u8; NONCE_LEN],
        payload: &[u8],
        footer: &[u8],
    ) -> Result<Self, PasetoError> {
        let nonce = V::keyed_hash(nonce, payload);
        let aad = pae(&[header::<V, version::Local>().as_bytes(), &nonce, footer]);
        let ciphertext = V::encrypt(key, &nonce, &aad, payload)?;

        let mut body = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        body.extend_from_slice(&nonce);
        body.extend_from_slice(&ciphertext);
        Ok(Self::new(body, footer))
    }

    /// Authenticate and decrypt the token.
    ///
    /// Every failure to open the token is reported as the same
    /// [`PasetoError::DecryptionFailed`].
    pub fn decrypt(&self, key: &V::LocalKey) -> Result<ParsedToken, PasetoError> {
        let (nonce, ciphertext) = self
            .payload
            .split_first_chunk::<NONCE_LEN>()
            .ok_or(PasetoError::InvalidToken(
                <version::Local as version::Purpose>::SHORT_BODY,
            ))?;

        let aad = pae(&[header::<V, version::Local>().as_bytes(), nonce, &self.footer]);
        let payload = V::decrypt(key, nonce, &aad, ciphertext).map_err(|_| {
            tracing::trace!("local token failed to decrypt");
            PasetoError::DecryptionFailed
        })?;

        Ok(ParsedToken {
            payload,
            footer: self.footer.clone(),
        })
    }
}

impl<V: PublicVersion> SignedToken<V> {
    /// Sign `payload` and `footer`.
    ///
    /// The new token is verified with `public_key` before it is returned. A
    /// `public_key` that does not belong to `secret_key` is reported as
    /// [`PasetoError::ConstructionInvariantViolated`].
    pub fn sign(
        public_key: &V::PublicKey,
        secret_key: &V::SecretKey,
        payload: &[u8],
        footer: &[u8],
    ) -> Result<Self, PasetoError> {
        let m2 = pae(&[header::<V, version::Public>().as_bytes(), payload, footer]);
        let signature = V::sign(secret_key, &m2);

        let mut body = Vec::with_capacity(payload.len() + SIGNATURE_LEN);
        body.extend_from_slice(payload);
        body.extend_from_slice(&signature);
        let token = Self::new(body, footer);

        if token.verify(public_key).is_none() {
            return Err(PasetoError::ConstructionInvariantViolated);
        }
        Ok(token)
    }

    /// Verify the token signature.
    ///
    /// A bad signature is not an error: it returns `None`, the same as any
    /// other reason to distrust the token.
    pub fn verify(&self, public_key: &V::PublicKey) -> Option<ParsedToken> {
        let (payload, signature) = self.payload.split_last_chunk::<SIGNATURE_LEN>()?;

        let m2 = pae(&[header::<V, version::Public>().as_bytes(), payload, &self.footer]);
        if !V::verify(public_key, &m2, signature) {
            tracing::trace!("public token signature did not verify");
            return None;
        }

        Some(ParsedToken {
            payload: payload.to_vec(),
            footer: self.footer.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Framing tests against a toy version whose "crypto" is a keyed SipHash, so
    //! the byte layout can be checked independently of any real primitive.

    use std::hash::{DefaultHasher, Hash, Hasher};

    use super::{EncryptedToken, ParsedToken, SignedToken};
    use crate::PasetoError;
    use crate::key::KeyEncoding;
    use crate::pae::pae;
    use crate::version::{LocalVersion, NONCE_LEN, PublicVersion, SIGNATURE_LEN, Version};

    struct Toy;

    #[derive(Clone, Copy, PartialEq)]
    struct ToyKey(u8);

    impl KeyEncoding for ToyKey {
        type Version = Toy;
        fn encode(&self) -> Box<[u8]> {
            Box::new([self.0])
        }
        fn decode(bytes: &[u8]) -> Result<Self, PasetoError> {
            match bytes {
                [b] => Ok(ToyKey(*b)),
                _ => Err(PasetoError::InvalidKey),
            }
        }
    }

    fn digest(key: u8, parts: &[&[u8]]) -> [u8; 8] {
        let mut h = DefaultHasher::new();
        key.hash(&mut h);
        parts.hash(&mut h);
        h.finish().to_le_bytes()
    }

    impl Version for Toy {
        const HEADER: &'static str = "v2";
    }

    impl LocalVersion for Toy {
        type LocalKey = ToyKey;

        fn random_nonce() -> Result<[u8; NONCE_LEN], PasetoError> {
            Ok([7; NONCE_LEN])
        }

        fn keyed_hash(key: &[u8; NONCE_LEN], message: &[u8]) -> [u8; NONCE_LEN] {
            let d = digest(0, &[key, message]);
            let mut out = [0; NONCE_LEN];
            for chunk in out.chunks_mut(8) {
                chunk.copy_from_slice(&d);
            }
            out
        }

        fn encrypt(
            key: &ToyKey,
            nonce: &[u8; NONCE_LEN],
            aad: &[u8],
            plaintext: &[u8],
        ) -> Result<Vec<u8>, PasetoError> {
            let mut out: Vec<u8> = plaintext.iter().map(|b| b ^ key.0).collect();
            out.extend_from_slice(&digest(key.0, &[nonce, aad, plaintext]));
            Ok(out)
        }

        fn decrypt(
            key: &ToyKey,
            nonce: &[u8; NONCE_LEN],
            aad: &[u8],
            ciphertext: &[u8],
        ) -> Result<Vec<u8>, PasetoError> {
            let (ciphertext, tag) = ciphertext
                .split_last_chunk::<8>()
                .ok_or(PasetoError::DecryptionFailed)?;
            let plaintext: Vec<u8> = ciphertext.iter().map(|b| b ^ key.0).collect();
            if *tag != digest(key.0, &[nonce, aad, &plaintext]) {
                return Err(PasetoError::DecryptionFailed);
            }
            Ok(plaintext)
        }
    }

    impl PublicVersion for Toy {
        type PublicKey = ToyKey;
        type SecretKey = ToyKey;

        fn sign(key: &ToyKey, message: &[u8]) -> [u8; SIGNATURE_LEN] {
            let d = digest(key.0, &[message]);
            let mut out = [0; SIGNATURE_LEN];
            for chunk in out.chunks_mut(8) {
                chunk.copy_from_slice(&d);
            }
            out
        }

        fn verify(key: &ToyKey, message: &[u8], signature: &[u8; SIGNATURE_LEN]) -> bool {
            *signature == Self::sign(key, message)
        }
    }

    #[test]
    fn public_body_is_payload_then_signature() {
        let key = ToyKey(9);
        let token = SignedToken::<Toy>::sign(&key, &key, b"hello", b"kid").unwrap();

        let m2 = pae(&[b"v2.public.", b"hello", b"kid"]);
        let mut body = b"hello".to_vec();
        body.extend_from_slice(&Toy::sign(&key, &m2));

        assert_eq!(token.payload, body);
        assert_eq!(token.unverified_footer(), b"kid");
        assert_eq!(
            token.verify(&key),
            Some(ParsedToken {
                payload: b"hello".to_vec(),
                footer: b"kid".to_vec()
            })
        );
    }

    #[test]
    fn public_sign_checks_the_key_pair() {
        let err = SignedToken::<Toy>::sign(&ToyKey(1), &ToyKey(2), b"hello", b"").unwrap_err();
        assert!(matches!(err, PasetoError::ConstructionInvariantViolated));
    }

    #[test]
    fn public_verify_is_absent_on_mismatch() {
        let key = ToyKey(9);
        let token = SignedToken::<Toy>::sign(&key, &key, b"hello", b"").unwrap();
        assert_eq!(token.verify(&ToyKey(10)), None);

        let mut other = token.clone();
        other.footer = b"x".to_vec();
        assert_eq!(other.verify(&key), None);

        let mut other = token.clone();
        other.payload[0] ^= 1;
        assert_eq!(other.verify(&key), None);
    }

    #[test]
    fn local_body_is_nonce_then_ciphertext() {
        let key = ToyKey(3);
        let nonce = [5; NONCE_LEN];
        let token =
            EncryptedToken::<Toy>::dangerous_encrypt_with_nonce(&key, &nonce, b"abc", b"f")
                .unwrap();

        let mac = Toy::keyed_hash(&nonce, b"abc");
        assert_eq!(&token.payload[..NONCE_LEN], &mac);

        let aad = pae(&[b"v2.local.", &mac, b"f"]);
        let ciphertext = Toy::encrypt(&key, &mac, &aad, b"abc").unwrap();
        assert_eq!(&token.payload[NONCE_LEN..], &ciphertext[..]);

        let opened = token.decrypt(&key).unwrap();
        assert_eq!(opened.payload, b"abc");
        assert_eq!(opened.footer, b"f");
    }

    #[test]
    fn local_decrypt_failures_are_opaque() {
        let key = ToyKey(3);
        let token = EncryptedToken::<Toy>::encrypt(&key, b"abc", b"").unwrap();

        let mut other = token.clone();
        other.footer = b"f".to_vec();
        assert!(matches!(
            other.decrypt(&key),
            Err(PasetoError::DecryptionFailed)
        ));

        let mut other = token.clone();
        other.payload[0] ^= 1;
        assert!(matches!(
            other.decrypt(&key),
            Err(PasetoError::DecryptionFailed)
        ));
    }

    #[test]
    fn renders_the_header_and_footer() {
        let key = ToyKey(3);
        let token = EncryptedToken::<Toy>::encrypt(&key, b"", b"").unwrap();
        let s = token.to_string();
        assert!(s.starts_with("v2.local."));
        assert!(!s["v2.local.".len()..].contains('.'));

        let token = SignedToken::<Toy>::sign(&key, &key, b"", b"Cuon Alpinus").unwrap();
        assert!(token.to_string().ends_with(".Q3VvbiBBbHBpbnVz"));
    }
}
