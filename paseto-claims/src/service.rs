use core::marker::PhantomData;

use paseto_core::PasetoError;
use paseto_core::tokens::{EncryptedToken, SignedToken};
use paseto_core::validation::{NoValidation, Validate};
use paseto_core::version::{LocalVersion, NONCE_LEN, PublicVersion};

use crate::{Claims, Time};

/// Build and open tokens at the claims level.
///
/// Opening a token has three kinds of outcome:
/// * a malformed token, or an authentic token with malformed claims, is an error.
/// * a token that fails its signature or decryption, or fails validation, is `Ok(None)`.
/// * otherwise the claims are returned.
///
/// The second case never says why, so a forged token and an expired one look
/// the same to the caller.
pub struct TokenService<V>(PhantomData<V>);

impl<V: PublicVersion> TokenService<V> {
    /// Sign the claims and render the token. The claims footer becomes the token footer.
    ///
    /// An empty footer map leaves the footer segment off entirely, rather than
    /// writing `{}` as some other encoders do.
    pub fn sign(
        public_key: &V::PublicKey,
        secret_key: &V::SecretKey,
        claims: &Claims,
    ) -> Result<String, PasetoError> {
        let payload = claims.encode_payload()?;
        let footer = claims.encode_footer()?;
        let token = SignedToken::<V>::sign(public_key, secret_key, &payload, &footer)?;
        Ok(token.to_string())
    }

    /// Verify a public token, checking `exp` and `nbf` against the current time
    /// when `validate_times` is set.
    pub fn parse(
        public_key: &V::PublicKey,
        token: &str,
        validate_times: bool,
    ) -> Result<Option<Claims>, PasetoError> {
        if validate_times {
            Self::parse_with(public_key, token, &Time::valid_now())
        } else {
            let validation = NoValidation::<Claims>::dangerous_no_validation();
            Self::parse_with(public_key, token, &validation)
        }
    }

    /// Verify a public token and run `validation` over its claims.
    pub fn parse_with(
        public_key: &V::PublicKey,
        token: &str,
        validation: &impl Validate<Claims = Claims>,
    ) -> Result<Option<Claims>, PasetoError> {
        let token: SignedToken<V> = token.parse().inspect_err(|err| {
            tracing::debug!(%err, "rejecting malformed public token");
        })?;

        let Some(token) = token.verify(public_key) else {
            tracing::debug!("rejecting public token with a bad signature");
            return Ok(None);
        };

        let claims = Claims::decode(&token.payload, &token.footer).inspect_err(|err| {
            tracing::debug!(%err, "public token carried malformed claims");
        })?;
        Ok(accept(claims, validation))
    }
}

impl<V: LocalVersion> TokenService<V> {
    /// Encrypt the claims under a fresh random nonce and render the token.
    /// The footer is handled as in [`TokenService::sign`].
    pub fn encrypt(key: &V::LocalKey, claims: &Claims) -> Result<String, PasetoError> {
        let nonce = V::random_nonce()?;
        Self::dangerous_encrypt_with_nonce(key, &nonce, claims)
    }

    /// Encrypt with a caller chosen nonce. Only for reproducing test vectors.
    pub fn dangerous_encrypt_with_nonce(
        key: &V::LocalKey,
        nonce: &[u8; NONCE_LEN],
        claims: &Claims,
    ) -> Result<String, PasetoError> {
        let payload = claims.encode_payload()?;
        let footer = claims.encode_footer()?;
        let token =
            EncryptedToken::<V>::dangerous_encrypt_with_nonce(key, nonce, &payload, &footer)?;
        Ok(token.to_string())
    }

    /// Decrypt a local token, checking `exp` and `nbf` against the current time
    /// when `validate_times` is set.
    pub fn decrypt(
        key: &V::LocalKey,
        token: &str,
        validate_times: bool,
    ) -> Result<Option<Claims>, PasetoError> {
        if validate_times {
            Self::decrypt_with(key, token, &Time::valid_now())
        } else {
            let validation = NoValidation::<Claims>::dangerous_no_validation();
            Self::decrypt_with(key, token, &validation)
        }
    }

    /// Decrypt a local token and run `validation` over its claims.
    pub fn decrypt_with(
        key: &V::LocalKey,
        token: &str,
        validation: &impl Validate<Claims = Claims>,
    ) -> Result<Option<Claims>, PasetoError> {
        let token: EncryptedToken<V> = token.parse().inspect_err(|err| {
            tracing::debug!(%err, "rejecting malformed local token");
        })?;

        let token = match token.decrypt(key) {
            Ok(token) => token,
            Err(PasetoError::DecryptionFailed) => {
                tracing::debug!("rejecting local token that failed to decrypt");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let claims = Claims::decode(&token.payload, &token.footer).inspect_err(|err| {
            tracing::debug!(%err, "local token carried malformed claims");
        })?;
        Ok(accept(claims, validation))
    }
}

fn accept(claims: Claims, validation: &impl Validate<Claims = Claims>) -> Option<Claims> {
    match validation.validate(&claims) {
        Ok(()) => Some(claims),
        Err(err) => {
            tracing::debug!(%err, "rejecting token claims");
            None
        }
    }
}
