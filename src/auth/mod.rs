use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Access token claims. `iat` and `exp` are in seconds, as JWT requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token along with the instants it was derived from
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub claims: Claims,
    pub issued_at_ms: i64,
    pub expired_at_ms: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    Encoding(jsonwebtoken::errors::Error),

    #[error("Invalid JWT token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

#[derive(Debug, Deserialize)]
struct SubjectOnly {
    sub: String,
}

pub fn issue_token(subject: &str, security: &SecurityConfig) -> Result<IssuedToken, TokenError> {
    issue_token_at(subject, security, Utc::now().timestamp_millis())
}

/// Sign a token for `subject` as if issued at `now_ms`.
pub fn issue_token_at(
    subject: &str,
    security: &SecurityConfig,
    now_ms: i64,
) -> Result<IssuedToken, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let ttl = security.token_ttl_secs as i64;
    let iat = now_ms.div_euclid(1000);
    let claims = Claims {
        sub: subject.to_string(),
        iat,
        exp: iat + ttl,
    };

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    let access_token =
        encode(&Header::default(), &claims, &encoding_key).map_err(TokenError::Encoding)?;

    Ok(IssuedToken {
        access_token,
        claims,
        issued_at_ms: now_ms,
        expired_at_ms: now_ms + ttl * 1000,
    })
}

/// Check signature and expiry, returning the claims on success.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(TokenError::Invalid)?;

    Ok(token_data.claims)
}

/// Read the `sub` claim without checking signature or expiry.
pub fn decode_subject(token: &str) -> Result<String, TokenError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<SubjectOnly>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(TokenError::Invalid)?;

    Ok(token_data.claims.sub)
}
