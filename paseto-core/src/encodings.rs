//! PASETO wire encoding.

use core::fmt;
use core::marker::PhantomData;

use crate::tokens::SealedToken;
use crate::{PasetoError, version};

/// A sink for encoded bytes.
///
/// Implemented for `Vec<u8>` and forwarded through `&mut W`, so a pre-auth
/// encoding can be collected or streamed straight into a hasher.
pub trait WriteBytes {
    fn write(&mut self, slice: &[u8]);
}

impl WriteBytes for Vec<u8> {
    fn write(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice)
    }
}

impl<W: WriteBytes + ?Sized> WriteBytes for &mut W {
    fn write(&mut self, slice: &[u8]) {
        (**self).write(slice)
    }
}

impl<V: version::Version, P: version::Purpose> fmt::Display for SealedToken<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(V::HEADER)?;
        f.write_str(P::HEADER)?;
        crate::base64::write_to_fmt(&self.payload, f)?;

        if !self.footer.is_empty() {
            f.write_str(".")?;
            crate::base64::write_to_fmt(&self.footer, f)?;
        }

        Ok(())
    }
}

impl<V: version::Version, P: version::Purpose> fmt::Debug for SealedToken<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl<V: version::Version, P: version::Purpose> core::str::FromStr for SealedToken<V, P> {
    type Err = PasetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s
            .strip_prefix(V::HEADER)
            .and_then(|s| s.strip_prefix(P::HEADER))
            .ok_or(PasetoError::InvalidToken(P::WRONG_HEADER))?;

        let (payload, footer) = match s.split_once('.') {
            Some(("", _)) => return Err(PasetoError::InvalidToken("token body is empty")),
            Some((_, "")) => return Err(PasetoError::InvalidToken("footer segment is empty")),
            Some((payload, footer)) => (payload, footer),
            None => (s, ""),
        };

        let payload = crate::base64::decode_vec(payload)
            .map_err(|_| PasetoError::InvalidToken("token body is not valid base64url"))?;
        if payload.len() < P::MIN_BODY_LEN {
            return Err(PasetoError::InvalidToken(P::SHORT_BODY));
        }

        let footer = crate::base64::decode_vec(footer)
            .map_err(|_| PasetoError::InvalidToken("token footer is not valid base64url"))?;

        Ok(Self {
            payload,
            footer,
            _version: PhantomData,
            _purpose: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::PasetoError;
    use crate::tokens::{EncryptedToken, SignedToken};
    use crate::version::Version;

    struct Test;
    impl Version for Test {
        const HEADER: &'static str = "v2";
    }

    fn format_error<T>(r: Result<T, PasetoError>) -> &'static str {
        match r {
            Err(PasetoError::InvalidToken(reason)) => reason,
            Err(e) => panic!("expected a format error, got {e}"),
            Ok(_) => panic!("expected a format error"),
        }
    }

    #[test]
    fn round_trips_the_wire_format() {
        let body = "A".repeat(86);
        for token in [format!("v2.public.{body}"), format!("v2.public.{body}.Q3VvbiBBbHBpbnVz")] {
            let parsed: SignedToken<Test> = token.parse().unwrap();
            assert_eq!(parsed.to_string(), token);
        }

        let parsed: SignedToken<Test> = format!("v2.public.{body}.Q3VvbiBBbHBpbnVz").parse().unwrap();
        assert_eq!(parsed.unverified_footer(), b"Cuon Alpinus");
    }

    #[test]
    fn rejects_wrong_headers() {
        let body = "A".repeat(86);
        let wrong = [
            format!("v2.local.{body}"),
            format!("v1.public.{body}"),
            format!("v2.publi.{body}"),
            format!("V2.PUBLIC.{body}"),
            String::new(),
        ];
        for token in wrong {
            assert_eq!(
                format_error(token.parse::<SignedToken<Test>>()),
                "token did not start with v2.public."
            );
        }

        let body = "A".repeat(54);
        assert_eq!(
            format_error(format!("v2.public.{body}").parse::<EncryptedToken<Test>>()),
            "token did not start with v2.local."
        );
    }

    #[test]
    fn rejects_short_bodies() {
        // 63 bytes
        let body = "A".repeat(84);
        assert_eq!(
            format_error(format!("v2.public.{body}").parse::<SignedToken<Test>>()),
            "token was less than 64 bytes long"
        );
        // 23 bytes
        let body = "A".repeat(31);
        assert_eq!(
            format_error(format!("v2.local.{body}").parse::<EncryptedToken<Test>>()),
            "token was less than 24 bytes long"
        );
        // exactly 24 bytes is a well formed frame
        let body = "A".repeat(32);
        assert!(format!("v2.local.{body}").parse::<EncryptedToken<Test>>().is_ok());
    }

    #[test]
    fn rejects_bad_segments() {
        let body = "A".repeat(32);
        let cases = [
            ("v2.local.".to_string(), "token was less than 24 bytes long"),
            ("v2.local..Zm9v".to_string(), "token body is empty"),
            (format!("v2.local.{body}."), "footer segment is empty"),
            (format!("v2.local.{body}=="), "token body is not valid base64url"),
            (format!("v2.local.{body}.Zm9v.Zm9v"), "token footer is not valid base64url"),
            (format!("v2.local.{body}.Zm9v+"), "token footer is not valid base64url"),
        ];
        for (token, reason) in cases {
            assert_eq!(format_error(token.parse::<EncryptedToken<Test>>()), reason, "{token}");
        }
    }
}
