//! JWT access/refresh token issuing and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Default access-token lifetime in seconds (120 minutes).
pub const ACCESS_TOKEN_EXP: u64 = 120 * 60;

/// Default refresh-token lifetime in seconds (7 days).
pub const REFRESH_TOKEN_EXP: u64 = 7 * 24 * 60 * 60;

/// Value of the `token_type` field in token responses.
pub const BEARER: &str = "Bearer";

/// Distinguishes access tokens from refresh tokens (`type` claim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims payload shared by every issuer and validator.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | numeric user id as a string |
/// | `username` | custom | admin username, or openid for mini-program users |
/// | `role` | custom | `"mp"` for mini-program tokens, absent for admin tokens |
/// | `token_type` | `type` | `access` or `refresh` |
/// | `iat` | `iat` | issued-at, seconds since epoch |
/// | `exp` | `exp` | expiry, seconds since epoch |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub iat: u64,
    pub exp: u64,
}

impl JwtClaims {
    /// Parse `sub` as a numeric row id.
    pub fn subject_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::Malformed)
    }
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("unexpected token type")]
    WrongType,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Identity carried by a token, passed to [`TokenIssuer::issue`].
#[derive(Debug, Clone)]
pub struct Subject<'a> {
    pub id: i64,
    pub username: &'a str,
    pub role: Option<&'a str>,
}

/// A freshly signed token and its lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: u64,
    pub expires_in: u64,
}

/// Signs and validates HS256 tokens with a secret and lifetimes fixed at construction.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    access_ttl: u64,
    refresh_ttl: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, access_ttl: u64, refresh_ttl: u64) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issuer with the default lifetimes.
    pub fn with_default_ttl(secret: impl Into<String>) -> Self {
        Self::new(secret, ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP)
    }

    pub fn access_ttl(&self) -> u64 {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> u64 {
        self.refresh_ttl
    }

    pub fn issue(
        &self,
        subject: &Subject<'_>,
        token_type: TokenType,
    ) -> Result<IssuedToken, AuthError> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let iat = now_secs();
        let exp = iat + ttl;
        let claims = JwtClaims {
            sub: subject.id.to_string(),
            username: subject.username.to_owned(),
            role: subject.role.map(str::to_owned),
            token_type,
            iat,
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(AuthError::Signing)?;
        Ok(IssuedToken {
            token,
            exp,
            expires_in: ttl,
        })
    }

    pub fn issue_access(&self, subject: &Subject<'_>) -> Result<IssuedToken, AuthError> {
        self.issue(subject, TokenType::Access)
    }

    pub fn issue_refresh(&self, subject: &Subject<'_>) -> Result<IssuedToken, AuthError> {
        self.issue(subject, TokenType::Refresh)
    }

    /// Decode and validate signature + expiry, without checking the token type.
    ///
    /// Validation: HS256, required claims `exp` + `sub`, default 60s leeway.
    pub fn decode(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature
            | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
            | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
            _ => AuthError::Malformed,
        })?;

        Ok(data.claims)
    }

    /// Decode a token and require the given type.
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<JwtClaims, AuthError> {
        let claims = self.decode(token)?;
        if claims.token_type != expected {
            return Err(AuthError::WrongType);
        }
        Ok(claims)
    }
}
