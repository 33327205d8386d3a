#![allow(async_fn_in_trait)]

use crate::domain::types::{MpUser, MpUserPatch, NewMpUser, PhoneInfo, WeChatSession};
use crate::error::MpServiceError;

/// Repository for mini-program accounts.
pub trait MpUserRepository: Send + Sync {
    /// Live account by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<MpUser>, MpServiceError>;

    /// Account holding `openid`, soft-deleted rows included.
    async fn find_by_openid(&self, openid: &str) -> Result<Option<MpUser>, MpServiceError>;

    async fn create(&self, user: &NewMpUser) -> Result<MpUser, MpServiceError>;

    /// Store a fresh session key. `unionid` is only written when present.
    async fn update_session(
        &self,
        id: i64,
        session_key: &str,
        unionid: Option<&str>,
    ) -> Result<MpUser, MpServiceError>;

    async fn update_phone(&self, id: i64, phone: &str) -> Result<(), MpServiceError>;

    async fn update_profile(&self, id: i64, patch: &MpUserPatch)
    -> Result<MpUser, MpServiceError>;
}

/// WeChat open platform calls used by the mini-program login flow.
pub trait WeChatPort: Send + Sync {
    /// Exchange a `wx.login` code for the caller's openid and session key.
    async fn code2session(&self, code: &str) -> Result<WeChatSession, MpServiceError>;

    /// Exchange a `getPhoneNumber` code for the bound phone number.
    async fn phone_number(&self, code: &str) -> Result<PhoneInfo, MpServiceError>;
}
