use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use paseto_core::PasetoError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The claim names with a meaning defined by PASETO.
pub const RESERVED_CLAIMS: [&str; 7] = ["iss", "sub", "aud", "exp", "nbf", "iat", "jti"];

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

#[derive(Debug, thiserror::Error)]
enum ClaimsFormatError {
    #[error("claims must be a JSON object")]
    NotAnObject,
    #[error("footer must be a JSON object")]
    FooterNotAnObject,
    #[error("claim `{0}` must be a string")]
    NotAString(&'static str),
    #[error("claim `{0}` is not a date-time with an explicit offset")]
    NotADate(&'static str, #[source] jiff::Error),
    #[error("claim `{0}` is reserved")]
    Reserved(String),
}

impl From<ClaimsFormatError> for PasetoError {
    fn from(err: ClaimsFormatError) -> Self {
        PasetoError::InvalidClaims(Box::new(err))
    }
}

/// The claims carried by a token, plus the footer that travels next to them.
///
/// Reserved claims are held as typed fields. Everything else lives in an open
/// JSON map. Dates are UTC with whole-second precision, which is what survives
/// the wire format.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Claims {
    iss: Option<String>,
    sub: Option<String>,
    aud: Option<String>,
    exp: Option<Timestamp>,
    nbf: Option<Timestamp>,
    iat: Option<Timestamp>,
    jti: Option<String>,
    additional: Map<String, Value>,
    footer: Map<String, Value>,
}

impl Claims {
    /// Claims issued at `now`, valid from `now` and expiring `exp` later.
    pub fn new(now: Timestamp, exp: Duration) -> Self {
        let now = whole_seconds(now);
        Self {
            exp: Some(whole_seconds(now + exp)),
            nbf: Some(now),
            iat: Some(now),
            ..Self::default()
        }
    }

    /// [`Claims::new`] at the current time.
    pub fn now(exp: Duration) -> Self {
        Self::new(Timestamp::now(), exp)
    }

    /// Set `iss`, the party that issued the token.
    pub fn from_issuer(mut self, iss: String) -> Self {
        self.iss = Some(iss);
        self
    }

    /// Set `aud`, the intended recipient.
    pub fn for_audience(mut self, aud: String) -> Self {
        self.aud = Some(aud);
        self
    }

    /// Set `sub`, the principal the token is about.
    pub fn for_subject(mut self, sub: String) -> Self {
        self.sub = Some(sub);
        self
    }

    /// Set `jti`, a unique token identifier.
    pub fn with_token_id(mut self, jti: String) -> Self {
        self.jti = Some(jti);
        self
    }

    /// Set `exp`. Sub-second precision is dropped.
    pub fn expires_at(mut self, exp: Timestamp) -> Self {
        self.exp = Some(whole_seconds(exp));
        self
    }

    /// Set `nbf`. Sub-second precision is dropped.
    pub fn not_before(mut self, nbf: Timestamp) -> Self {
        self.nbf = Some(whole_seconds(nbf));
        self
    }

    /// Set `iat`. Sub-second precision is dropped.
    pub fn issued_at(mut self, iat: Timestamp) -> Self {
        self.iat = Some(whole_seconds(iat));
        self
    }

    /// Add an application defined claim.
    ///
    /// Reserved claim names are rejected with [`PasetoError::InvalidClaims`];
    /// use the typed builders for those.
    pub fn with_claim(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, PasetoError> {
        self.add_additional(key, value)?;
        Ok(self)
    }

    /// In-place form of [`Claims::with_claim`].
    pub fn add_additional(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), PasetoError> {
        let key = key.into();
        if RESERVED_CLAIMS.contains(&key.as_str()) {
            return Err(ClaimsFormatError::Reserved(key).into());
        }
        self.additional.insert(key, value.into());
        Ok(())
    }

    /// Add an entry to the footer. The footer is authenticated but never encrypted.
    pub fn with_footer_claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.footer.insert(key.into(), value.into());
        self
    }

    /// The issuer, `iss`.
    pub fn iss(&self) -> Option<&str> {
        self.iss.as_deref()
    }
    /// The subject, `sub`.
    pub fn sub(&self) -> Option<&str> {
        self.sub.as_deref()
    }
    /// The audience, `aud`.
    pub fn aud(&self) -> Option<&str> {
        self.aud.as_deref()
    }
    /// The expiry time, `exp`.
    pub fn exp(&self) -> Option<Timestamp> {
        self.exp
    }
    /// The not-before time, `nbf`.
    pub fn nbf(&self) -> Option<Timestamp> {
        self.nbf
    }
    /// The issue time, `iat`.
    pub fn iat(&self) -> Option<Timestamp> {
        self.iat
    }
    /// The token identifier, `jti`.
    pub fn jti(&self) -> Option<&str> {
        self.jti.as_deref()
    }

    /// The claims that are not reserved.
    pub fn additional_claims(&self) -> &Map<String, Value> {
        &self.additional
    }

    /// The footer entries. Empty unless set, or decoded from a token footer.
    pub fn footer(&self) -> &Map<String, Value> {
        &self.footer
    }

    /// Look up any claim by name, as it would appear in the payload.
    pub fn get_claim(&self, key: &str) -> Option<Value> {
        match self.reserved().into_iter().find(|(name, _)| *name == key) {
            Some((_, value)) => value,
            None => self.additional.get(key).cloned(),
        }
    }

    /// Build claims from a decoded payload object.
    ///
    /// Reserved claims are type checked, `null` counts as unset. Every other
    /// key is kept as an additional claim. The footer starts empty.
    pub fn from_map(mut map: Map<String, Value>) -> Result<Self, PasetoError> {
        Ok(Self {
            iss: take_string(&mut map, "iss")?,
            sub: take_string(&mut map, "sub")?,
            aud: take_string(&mut map, "aud")?,
            exp: take_date(&mut map, "exp")?,
            nbf: take_date(&mut map, "nbf")?,
            iat: take_date(&mut map, "iat")?,
            jti: take_string(&mut map, "jti")?,
            additional: map,
            footer: Map::new(),
        })
    }

    /// The payload object: additional claims overlaid with the reserved claims
    /// that are set.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.additional.clone();
        for (key, value) in self.reserved() {
            if let Some(value) = value {
                map.insert(key.to_owned(), value);
            }
        }
        map
    }

    fn reserved(&self) -> [(&'static str, Option<Value>); 7] {
        let string = |s: &Option<String>| s.clone().map(Value::String);
        let date = |d: Option<Timestamp>| d.map(|d| Value::String(render_date(d)));
        [
            ("iss", string(&self.iss)),
            ("sub", string(&self.sub)),
            ("aud", string(&self.aud)),
            ("exp", date(self.exp)),
            ("nbf", date(self.nbf)),
            ("iat", date(self.iat)),
            ("jti", string(&self.jti)),
        ]
    }

    pub(crate) fn encode_payload(&self) -> Result<Vec<u8>, PasetoError> {
        serde_json::to_vec(&self.to_map()).map_err(|err| PasetoError::InvalidClaims(err.into()))
    }

    /// An empty footer map encodes to no footer at all.
    ///
    /// Encoders that always serialize the footer emit `{}` (`.e30`) instead.
    /// Those tokens still decode here, to an empty footer map, but re-signing
    /// the same claims yields a token without the footer segment.
    pub(crate) fn encode_footer(&self) -> Result<Vec<u8>, PasetoError> {
        if self.footer.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::to_vec(&self.footer).map_err(|err| PasetoError::InvalidClaims(err.into()))
    }

    pub(crate) fn decode(payload: &[u8], footer: &[u8]) -> Result<Self, PasetoError> {
        let Value::Object(map) = parse_json(payload)? else {
            return Err(ClaimsFormatError::NotAnObject.into());
        };
        let mut claims = Self::from_map(map)?;

        if !footer.is_empty() {
            let Value::Object(footer) = parse_json(footer)? else {
                return Err(ClaimsFormatError::FooterNotAnObject.into());
            };
            claims.footer = footer;
        }
        Ok(claims)
    }
}

impl Serialize for Claims {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(s)
    }
}

impl<'de> Deserialize<'de> for Claims {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let map = Map::deserialize(d)?;
        Claims::from_map(map).map_err(serde::de::Error::custom)
    }
}

fn parse_json(bytes: &[u8]) -> Result<Value, PasetoError> {
    serde_json::from_slice(bytes).map_err(|err| PasetoError::InvalidClaims(err.into()))
}

fn take_string(
    map: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, ClaimsFormatError> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ClaimsFormatError::NotAString(key)),
    }
}

fn take_date(
    map: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Option<Timestamp>, ClaimsFormatError> {
    let Some(date) = take_string(map, key)? else {
        return Ok(None);
    };
    // jiff only accepts a timestamp with a `Z` or numeric offset
    let ts: Timestamp = date
        .parse()
        .map_err(|err| ClaimsFormatError::NotADate(key, err))?;
    Ok(Some(whole_seconds(ts)))
}

fn render_date(ts: Timestamp) -> String {
    ts.strftime(DATE_FORMAT).to_string()
}

fn whole_seconds(ts: Timestamp) -> Timestamp {
    ts - SignedDuration::from_nanos(i64::from(ts.subsec_nanosecond()))
}
