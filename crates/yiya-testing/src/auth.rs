//! Token helpers for tests.
//!
//! Services validate bearer tokens themselves, so tests sign real tokens with
//! a fixed secret instead of faking headers.

use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use yiya_auth_types::token::{IssuedToken, Subject, TokenIssuer};

/// Secret shared by every test issuer.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Issuer with default lifetimes and [`TEST_JWT_SECRET`].
pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::with_default_ttl(TEST_JWT_SECRET)
}

/// Identity to sign tokens for.
pub struct MockAuth {
    pub user_id: i64,
    pub username: String,
    pub role: Option<String>,
}

impl MockAuth {
    pub fn admin(user_id: i64, username: &str) -> Self {
        Self {
            user_id,
            username: username.to_owned(),
            role: None,
        }
    }

    pub fn mp(user_id: i64, openid: &str) -> Self {
        Self {
            user_id,
            username: openid.to_owned(),
            role: Some("mp".to_owned()),
        }
    }

    fn subject(&self) -> Subject<'_> {
        Subject {
            id: self.user_id,
            username: &self.username,
            role: self.role.as_deref(),
        }
    }

    pub fn access_token(&self) -> IssuedToken {
        test_issuer().issue_access(&self.subject()).unwrap()
    }

    pub fn refresh_token(&self) -> IssuedToken {
        test_issuer().issue_refresh(&self.subject()).unwrap()
    }

    /// `Authorization: Bearer <access token>` header map.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let value = format!("Bearer {}", self.access_token().token);
        map.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        map
    }
}
