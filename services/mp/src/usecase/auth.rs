use yiya_auth_types::token::{Subject, TokenIssuer, TokenType};

use crate::domain::repository::{MpUserRepository, WeChatPort};
use crate::domain::types::{DEFAULT_NICKNAME, MP_ROLE, MpUser, NewMpUser};
use crate::error::MpServiceError;

// ── Login by code ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginByCodeOutput {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: u64,
    pub is_new_user: bool,
    pub need_bind_phone: bool,
}

pub struct LoginByCodeUseCase<U: MpUserRepository, W: WeChatPort> {
    pub users: U,
    pub wechat: W,
    pub issuer: TokenIssuer,
}

impl<U: MpUserRepository, W: WeChatPort> LoginByCodeUseCase<U, W> {
    pub async fn execute(&self, code: &str) -> Result<LoginByCodeOutput, MpServiceError> {
        if code.trim().is_empty() {
            return Err(MpServiceError::invalid_input("code must not be empty"));
        }

        let session = self.wechat.code2session(code).await?;

        let (user, is_new_user) = match self.users.find_by_openid(&session.openid).await? {
            Some(existing) if existing.is_deleted() => return Err(MpServiceError::UserNotFound),
            Some(existing) => {
                let user = self
                    .users
                    .update_session(
                        existing.id,
                        &session.session_key,
                        session.unionid.as_deref(),
                    )
                    .await?;
                (user, false)
            }
            None => {
                let user = self
                    .users
                    .create(&NewMpUser {
                        openid: session.openid.clone(),
                        unionid: session.unionid.clone(),
                        session_key: session.session_key.clone(),
                        nickname: DEFAULT_NICKNAME.to_owned(),
                    })
                    .await?;
                (user, true)
            }
        };

        let subject = Subject {
            id: user.id,
            username: &user.openid,
            role: Some(MP_ROLE),
        };
        let access = self.issuer.issue_access(&subject)?;
        let refresh = self.issuer.issue_refresh(&subject)?;

        tracing::info!(user_id = user.id, is_new_user, "mini-program login");

        Ok(LoginByCodeOutput {
            access_token: access.token,
            refresh_token: refresh.token,
            expires_in: access.expires_in,
            is_new_user,
            need_bind_phone: user.phone.as_deref().is_none_or(str::is_empty),
        })
    }
}

// ── Bind phone ───────────────────────────────────────────────────────────────

pub struct BindPhoneUseCase<U: MpUserRepository, W: WeChatPort> {
    pub users: U,
    pub wechat: W,
}

impl<U: MpUserRepository, W: WeChatPort> BindPhoneUseCase<U, W> {
    /// Exchange `code` for the user's phone number and store it.
    pub async fn execute(&self, user_id: i64, code: &str) -> Result<String, MpServiceError> {
        if code.trim().is_empty() {
            return Err(MpServiceError::invalid_input("code must not be empty"));
        }

        let info = self.wechat.phone_number(code).await?;
        let phone = info
            .number()
            .ok_or_else(|| MpServiceError::WeChat("phone_info carries no number".into()))?
            .to_owned();

        self.users.update_phone(user_id, &phone).await?;
        tracing::info!(user_id, "phone bound");
        Ok(phone)
    }
}

// ── Resolve ──────────────────────────────────────────────────────────────────

pub struct ResolveMpUserUseCase<U: MpUserRepository> {
    pub users: U,
    pub issuer: TokenIssuer,
}

impl<U: MpUserRepository> ResolveMpUserUseCase<U> {
    /// Validate a mini-program access token and load its live account.
    ///
    /// Admin tokens carry no `mp` role and are rejected.
    pub async fn execute(&self, access_token: &str) -> Result<MpUser, MpServiceError> {
        let claims = self.issuer.validate(access_token, TokenType::Access)?;
        if claims.role.as_deref() != Some(MP_ROLE) {
            return Err(MpServiceError::InvalidToken);
        }
        let user_id = claims.subject_id()?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(MpServiceError::InvalidToken)
    }
}
