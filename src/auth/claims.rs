use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Claims the backend puts in its access tokens. Read for display only;
/// the signature is the backend's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
}

impl TokenClaims {
    /// Decode the payload without verifying the signature or expiry
    pub fn peek(token: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let header = decode_header(token)?;

        let mut validation = Validation::new(header.alg);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// True once `now` is within `leeway` of the expiry. Tokens without
    /// `exp` never expire client-side.
    pub fn is_expired(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        self.expires_at().is_some_and(|at| at - leeway <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(exp: i64) -> String {
        let claims = TokenClaims {
            sub: Some("admin".into()),
            exp: Some(exp),
            token_type: Some("access".into()),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"server-secret")).unwrap()
    }

    #[test]
    fn test_peek_reads_claims_without_the_secret() {
        let exp = Utc::now().timestamp() + 3600;
        let claims = TokenClaims::peek(&token(exp)).unwrap();

        assert_eq!(claims.sub.as_deref(), Some("admin"));
        assert_eq!(claims.expires_at().map(|at| at.timestamp()), Some(exp));
        assert!(!claims.is_expired(Utc::now(), Duration::seconds(30)));
    }

    #[test]
    fn test_expired_tokens_still_decode() {
        let claims = TokenClaims::peek(&token(Utc::now().timestamp() - 60)).unwrap();
        assert!(claims.is_expired(Utc::now(), Duration::zero()));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(TokenClaims::peek("not-a-jwt").is_err());
    }
}
