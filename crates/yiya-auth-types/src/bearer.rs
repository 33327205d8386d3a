//! `Authorization: Bearer <token>` extractor.

use axum::extract::FromRequestParts;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::request::Parts;

/// Raw bearer token taken from the `Authorization` header.
///
/// Returns 401 if the header is absent or not a bearer credential. Signature and
/// expiry are checked by the service-level user extractor, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the bearer credential from request parts without consuming anything.
    pub fn from_parts(parts: &Parts) -> Option<Self> {
        parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| Self(auth.token().to_owned()))
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Extract synchronously and hand back a 'static future; see axum-core 0.5
    // `FromRequestParts` signature.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = Self::from_parts(parts);
        async move { token.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
