use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Nickname given to accounts created on first login.
pub const DEFAULT_NICKNAME: &str = "微信用户";

/// Role claim carried by every mini-program token.
pub const MP_ROLE: &str = "mp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpUser {
    pub id: i64,
    pub openid: String,
    pub unionid: Option<String>,
    pub session_key: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    /// 0 = unknown, 1 = male, 2 = female.
    pub gender: Option<i32>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl MpUser {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewMpUser {
    pub openid: String,
    pub unionid: Option<String>,
    pub session_key: String,
    pub nickname: String,
}

/// Profile fields a user may edit. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct MpUserPatch {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}

/// Result of exchanging a `wx.login` code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeChatSession {
    pub openid: String,
    pub session_key: String,
    pub unionid: Option<String>,
}

/// `phone_info` object returned by `getuserphonenumber`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneInfo {
    pub phone_number: Option<String>,
    pub pure_phone_number: Option<String>,
    pub country_code: Option<String>,
}

impl PhoneInfo {
    /// The full number, falling back to the number without country code.
    pub fn number(&self) -> Option<&str> {
        self.phone_number
            .as_deref()
            .or(self.pure_phone_number.as_deref())
            .filter(|n| !n.is_empty())
    }
}
