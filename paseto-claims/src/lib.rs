//! PASETO claims, validation, and a claims-level token service.
//!
//! [`Claims`] holds the reserved claims as typed fields and any others in an
//! open JSON map. [`TokenService`] turns claims into `v2.local` or `v2.public`
//! tokens and back, running [`Validate`] checks on the way in.
#![forbid(unsafe_code)]

pub use jiff;
pub use paseto_core::validation::{NoValidation, Validate};

mod claims;
mod service;
mod validation;

pub use claims::{Claims, RESERVED_CLAIMS};
pub use service::TokenService;
pub use validation::{ForAudience, ForSubject, FromIssuer, HasExpiry, Time, TimeWithLeeway};
