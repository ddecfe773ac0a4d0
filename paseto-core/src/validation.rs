//! Checks run against the claims of an authenticated token.

use std::marker::PhantomData;

use crate::PasetoError;

/// A check over some claims.
///
/// Validators fail with [`PasetoError::ClaimsError`]. Callers that follow the
/// PASETO fail-closed rules should not tell the token holder which check failed.
pub trait Validate {
    type Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError>;

    /// Require `other` to pass as well. `self` runs first.
    fn then<V>(self, other: V) -> Both<Self, V>
    where
        Self: Sized,
        V: Validate<Claims = Self::Claims>,
    {
        Both(self, other)
    }
}

/// Two validators that must both pass. Built by [`Validate::then`].
pub struct Both<A, B>(A, B);

impl<A: Validate, B: Validate<Claims = A::Claims>> Validate for Both<A, B> {
    type Claims = A::Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        self.0.validate(claims).and_then(|()| self.1.validate(claims))
    }
}

/// Accepts any claims.
pub struct NoValidation<Claims>(PhantomData<Claims>);

impl<Claims> NoValidation<Claims> {
    /// Skip every claim check, including token expiry.
    pub fn dangerous_no_validation() -> Self {
        NoValidation(PhantomData)
    }
}

impl<Claims> Validate for NoValidation<Claims> {
    type Claims = Claims;

    fn validate(&self, _: &Claims) -> Result<(), PasetoError> {
        Ok(())
    }
}
