//! PASETO v2 (RustCrypto and dalek)
//!
//! ```
//! use paseto_v2::{SecretKey, V2};
//! use paseto_claims::{Claims, TokenService};
//! use std::time::Duration;
//!
//! // create a new keypair
//! let secret_key = SecretKey::random().unwrap();
//! let public_key = secret_key.public_key();
//!
//! // create a set of token claims
//! let claims = Claims::now(Duration::from_secs(3600))
//!     .from_issuer("https://paseto.conrad.cafe/".to_string())
//!     .for_subject("conradludgate".to_string());
//!
//! // create and sign a new token
//! let token = TokenService::<V2>::sign(&public_key, &secret_key, &claims).unwrap();
//! // "v2.public..."
//!
//! // verify the token signature and check the token times.
//! let verified = TokenService::<V2>::parse(&public_key, &token, true).unwrap();
//! assert_eq!(verified, Some(claims));
//! ```
#![forbid(unsafe_code)]

/// Low level implementation primitives.
pub mod core;

pub use self::core::V2;
pub use paseto_core::PasetoError;

/// A signed token, not yet verified
#[cfg(feature = "public")]
pub type SignedToken = paseto_core::tokens::SignedToken<V2>;

/// An encrypted token
#[cfg(feature = "local")]
pub type EncryptedToken = paseto_core::tokens::EncryptedToken<V2>;

#[cfg(feature = "local")]
pub use self::core::LocalKey;

#[cfg(feature = "public")]
pub use self::core::{PublicKey, SecretKey};
