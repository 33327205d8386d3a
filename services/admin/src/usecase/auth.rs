use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;

use yiya_auth_types::password::verify_password;
use yiya_auth_types::token::{Subject, TokenIssuer, TokenType};

use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::types::ResolvedUser;
use crate::error::AdminServiceError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub ip: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: u64,
}

pub struct LoginUseCase<U: UserRepository, T: TokenStore> {
    pub users: U,
    pub tokens: T,
    pub issuer: TokenIssuer,
}

impl<U: UserRepository, T: TokenStore> LoginUseCase<U, T> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AdminServiceError> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or(AdminServiceError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(AdminServiceError::InvalidCredentials);
        }
        if !user.status.is_enabled() {
            return Err(AdminServiceError::UserDisabled);
        }

        self.users
            .record_login(user.id, Utc::now(), input.ip.as_deref())
            .await?;

        let subject = Subject {
            id: user.id,
            username: &user.username,
            role: None,
        };
        let access = self.issuer.issue_access(&subject)?;
        let refresh = self.issuer.issue_refresh(&subject)?;

        self.tokens
            .store_refresh(user.id, &refresh.token, self.issuer.refresh_ttl())
            .await?;

        tracing::info!(user_id = user.id, "admin login");

        Ok(LoginOutput {
            access_token: access.token,
            refresh_token: refresh.token,
            expires_in: access.expires_in,
        })
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshOutput {
    pub access_token: String,
    pub expires_in: u64,
}

pub struct RefreshUseCase<T: TokenStore> {
    pub tokens: T,
    pub issuer: TokenIssuer,
}

impl<T: TokenStore> RefreshUseCase<T> {
    pub async fn execute(&self, refresh_token: &str) -> Result<RefreshOutput, AdminServiceError> {
        let claims = self.issuer.validate(refresh_token, TokenType::Refresh)?;
        let user_id = claims.subject_id()?;

        if self.tokens.is_blacklisted(refresh_token).await? {
            return Err(AdminServiceError::InvalidToken);
        }
        if !self.tokens.refresh_exists(user_id, refresh_token).await? {
            return Err(AdminServiceError::InvalidToken);
        }

        let access = self.issuer.issue_access(&Subject {
            id: user_id,
            username: &claims.username,
            role: claims.role.as_deref(),
        })?;

        Ok(RefreshOutput {
            access_token: access.token,
            expires_in: access.expires_in,
        })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<T: TokenStore> {
    pub tokens: T,
    pub issuer: TokenIssuer,
}

impl<T: TokenStore> LogoutUseCase<T> {
    /// Revoke `refresh_token` for `user_id`. A token that no longer decodes is
    /// already unusable, so that case succeeds without touching the store.
    pub async fn execute(
        &self,
        user_id: i64,
        refresh_token: &str,
    ) -> Result<(), AdminServiceError> {
        let Ok(claims) = self.issuer.decode(refresh_token) else {
            return Ok(());
        };

        let remaining = claims.exp.saturating_sub(now_secs());
        if remaining > 0 {
            self.tokens.blacklist(refresh_token, remaining).await?;
        }
        self.tokens.remove_refresh(user_id, refresh_token).await?;
        Ok(())
    }
}

// ── ResolveUser ──────────────────────────────────────────────────────────────

/// Turns a bearer access token into the fully loaded current user.
pub struct ResolveUserUseCase<U: UserRepository> {
    pub users: U,
    pub issuer: TokenIssuer,
}

impl<U: UserRepository> ResolveUserUseCase<U> {
    pub async fn execute(&self, access_token: &str) -> Result<ResolvedUser, AdminServiceError> {
        let claims = self.issuer.validate(access_token, TokenType::Access)?;
        let user_id = claims.subject_id()?;

        let user = self
            .users
            .resolve(user_id)
            .await?
            .ok_or(AdminServiceError::InvalidToken)?;

        if !user.status.is_enabled() {
            return Err(AdminServiceError::UserDisabled);
        }
        Ok(user)
    }
}
