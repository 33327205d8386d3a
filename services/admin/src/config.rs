use yiya_auth_types::token::TokenIssuer;
use yiya_core::middleware::parse_origins;

/// Admin service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AdminConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL.
    pub redis_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// Access-token lifetime (default 120). Env var: `ACCESS_TOKEN_EXPIRE_MINUTES`.
    pub access_token_expire_minutes: u64,
    /// Refresh-token lifetime (default 7). Env var: `REFRESH_TOKEN_EXPIRE_DAYS`.
    pub refresh_token_expire_days: u64,
    /// TCP port to listen on (default 8000). Env var: `ADMIN_PORT`.
    pub admin_port: u16,
    /// Comma-separated allowed origins; `*` or empty allows any. Env var: `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            access_token_expire_minutes: std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            refresh_token_expire_days: std::env::var("REFRESH_TOKEN_EXPIRE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            admin_port: std::env::var("ADMIN_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        }
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            self.jwt_secret.clone(),
            self.access_token_expire_minutes * 60,
            self.refresh_token_expire_days * 24 * 60 * 60,
        )
    }
}
