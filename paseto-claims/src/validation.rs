use std::time::Duration;

use jiff::Timestamp;
use paseto_core::PasetoError;
use paseto_core::validation::Validate;

use crate::Claims;

/// Rejects tokens that have expired or are not yet valid.
///
/// The clock is read once, when the validator is created.
pub struct Time {
    now: Timestamp,
}

impl Time {
    pub fn valid_now() -> Self {
        Self {
            now: Timestamp::now(),
        }
    }

    pub fn valid_at(now: Timestamp) -> Self {
        Self { now }
    }

    /// Allow for clock skew between the issuer and this host.
    pub fn with_leeway(self, leeway: Duration) -> TimeWithLeeway {
        TimeWithLeeway {
            now: self.now,
            leeway,
        }
    }
}

impl Validate for Time {
    type Claims = Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        if let Some(exp) = claims.exp()
            && exp < self.now
        {
            return Err(PasetoError::ClaimsError);
        }

        if let Some(nbf) = claims.nbf()
            && self.now < nbf
        {
            return Err(PasetoError::ClaimsError);
        }

        Ok(())
    }
}

/// [`Time`] with a tolerance on both bounds. Built by [`Time::with_leeway`].
pub struct TimeWithLeeway {
    now: Timestamp,
    leeway: Duration,
}

impl Validate for TimeWithLeeway {
    type Claims = Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        // Only the local clock is shifted. `exp` and `nbf` come from the token
        // and may sit at the edge of the representable range.
        let earliest = self
            .now
            .checked_sub(self.leeway)
            .unwrap_or(Timestamp::MIN);
        let latest = self
            .now
            .checked_add(self.leeway)
            .unwrap_or(Timestamp::MAX);

        if let Some(exp) = claims.exp()
            && exp < earliest
        {
            return Err(PasetoError::ClaimsError);
        }

        if let Some(nbf) = claims.nbf()
            && latest < nbf
        {
            return Err(PasetoError::ClaimsError);
        }

        Ok(())
    }
}

/// Requires an `exp` claim.
pub struct HasExpiry;

impl Validate for HasExpiry {
    type Claims = Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        if claims.exp().is_none() {
            return Err(PasetoError::ClaimsError);
        }
        Ok(())
    }
}

/// Requires the `sub` claim to match.
pub struct ForSubject<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> Validate for ForSubject<T> {
    type Claims = Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        matches(claims.sub(), self.0.as_ref())
    }
}

/// Requires the `iss` claim to match.
pub struct FromIssuer<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> Validate for FromIssuer<T> {
    type Claims = Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        matches(claims.iss(), self.0.as_ref())
    }
}

/// Requires the `aud` claim to match.
pub struct ForAudience<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> Validate for ForAudience<T> {
    type Claims = Claims;

    fn validate(&self, claims: &Self::Claims) -> Result<(), PasetoError> {
        matches(claims.aud(), self.0.as_ref())
    }
}

fn matches(claim: Option<&str>, expected: &str) -> Result<(), PasetoError> {
    if claim != Some(expected) {
        return Err(PasetoError::ClaimsError);
    }
    Ok(())
}
