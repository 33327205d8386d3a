use yiya_auth_types::token::TokenIssuer;
use yiya_core::middleware::parse_origins;

use crate::infra::wechat::{WECHAT_API_BASE, WeChatClient};

/// Mini-program service configuration loaded from environment variables.
#[derive(Debug)]
pub struct MpConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret shared with the admin service.
    pub jwt_secret: String,
    /// Env var: `ACCESS_TOKEN_EXPIRE_MINUTES` (default 120).
    pub access_token_expire_minutes: u64,
    /// Env var: `REFRESH_TOKEN_EXPIRE_DAYS` (default 7).
    pub refresh_token_expire_days: u64,
    /// TCP port to listen on (default 8001). Env var: `MP_PORT`.
    pub mp_port: u16,
    pub cors_origins: Vec<String>,
    pub wechat_appid: String,
    pub wechat_secret: String,
    /// Env var: `WECHAT_API_BASE` (default `https://api.weixin.qq.com`).
    pub wechat_api_base: String,
}

impl MpConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            access_token_expire_minutes: std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            refresh_token_expire_days: std::env::var("REFRESH_TOKEN_EXPIRE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            mp_port: std::env::var("MP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8001),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            wechat_appid: std::env::var("WECHAT_APPID").expect("WECHAT_APPID"),
            wechat_secret: std::env::var("WECHAT_SECRET").expect("WECHAT_SECRET"),
            wechat_api_base: std::env::var("WECHAT_API_BASE")
                .unwrap_or_else(|_| WECHAT_API_BASE.to_owned()),
        }
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            self.jwt_secret.clone(),
            self.access_token_expire_minutes * 60,
            self.refresh_token_expire_days * 24 * 60 * 60,
        )
    }

    pub fn wechat_client(&self) -> WeChatClient {
        WeChatClient::new(self.wechat_appid.clone(), self.wechat_secret.clone())
            .with_base_url(self.wechat_api_base.clone())
    }
}
