use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use yiya_mp::domain::repository::{MpUserRepository, WeChatPort};
use yiya_mp::domain::types::{MpUser, MpUserPatch, NewMpUser, PhoneInfo, WeChatSession};
use yiya_mp::error::MpServiceError;

pub use yiya_testing::auth::test_issuer;

// ── MockMpUserRepo ───────────────────────────────────────────────────────────

/// In-memory account table. Clones share the same rows.
#[derive(Clone, Default)]
pub struct MockMpUserRepo {
    pub users: Arc<Mutex<Vec<MpUser>>>,
}

impl MockMpUserRepo {
    pub fn with(users: Vec<MpUser>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn get(&self, id: i64) -> Option<MpUser> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn modify(&self, id: i64, f: impl FnOnce(&mut MpUser)) -> Result<MpUser, MpServiceError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(MpServiceError::UserNotFound)?;
        f(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

impl MpUserRepository for MockMpUserRepo {
    async fn find_by_id(&self, id: i64) -> Result<Option<MpUser>, MpServiceError> {
        Ok(self.get(id).filter(|u| !u.is_deleted()))
    }

    async fn find_by_openid(&self, openid: &str) -> Result<Option<MpUser>, MpServiceError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.openid == openid).cloned())
    }

    async fn create(&self, user: &NewMpUser) -> Result<MpUser, MpServiceError> {
        let mut users = self.users.lock().unwrap();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let mut created = test_user(id, &user.openid);
        created.unionid = user.unionid.clone();
        created.session_key = Some(user.session_key.clone());
        created.nickname = Some(user.nickname.clone());
        users.push(created.clone());
        Ok(created)
    }

    async fn update_session(
        &self,
        id: i64,
        session_key: &str,
        unionid: Option<&str>,
    ) -> Result<MpUser, MpServiceError> {
        self.modify(id, |u| {
            u.session_key = Some(session_key.to_owned());
            if let Some(unionid) = unionid {
                u.unionid = Some(unionid.to_owned());
            }
        })
    }

    async fn update_phone(&self, id: i64, phone: &str) -> Result<(), MpServiceError> {
        self.modify(id, |u| u.phone = Some(phone.to_owned()))?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: i64,
        patch: &MpUserPatch,
    ) -> Result<MpUser, MpServiceError> {
        self.modify(id, |u| {
            if let Some(ref v) = patch.nickname {
                u.nickname = Some(v.clone());
            }
            if let Some(ref v) = patch.avatar {
                u.avatar = Some(v.clone());
            }
        })
    }
}

// ── MockWeChat ───────────────────────────────────────────────────────────────

/// Canned WeChat answers keyed by code. Unknown codes fail like WeChat does
/// with errcode 40029.
#[derive(Clone, Default)]
pub struct MockWeChat {
    pub sessions: HashMap<String, WeChatSession>,
    pub phones: HashMap<String, PhoneInfo>,
}

impl MockWeChat {
    pub fn session(mut self, code: &str, openid: &str, unionid: Option<&str>) -> Self {
        self.sessions.insert(
            code.to_owned(),
            WeChatSession {
                openid: openid.to_owned(),
                session_key: format!("sk-{code}"),
                unionid: unionid.map(str::to_owned),
            },
        );
        self
    }

    pub fn phone(mut self, code: &str, info: PhoneInfo) -> Self {
        self.phones.insert(code.to_owned(), info);
        self
    }
}

fn invalid_code() -> MpServiceError {
    MpServiceError::WeChat("40029: invalid code".into())
}

impl WeChatPort for MockWeChat {
    async fn code2session(&self, code: &str) -> Result<WeChatSession, MpServiceError> {
        self.sessions.get(code).cloned().ok_or_else(invalid_code)
    }

    async fn phone_number(&self, code: &str) -> Result<PhoneInfo, MpServiceError> {
        self.phones.get(code).cloned().ok_or_else(invalid_code)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(id: i64, openid: &str) -> MpUser {
    let now = Utc::now();
    MpUser {
        id,
        openid: openid.to_owned(),
        unionid: None,
        session_key: Some("old-session".into()),
        nickname: Some("微信用户".into()),
        avatar: None,
        phone: None,
        gender: None,
        country: None,
        province: None,
        city: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

pub fn phone_info(number: &str) -> PhoneInfo {
    PhoneInfo {
        phone_number: Some(number.to_owned()),
        pure_phone_number: Some(number.to_owned()),
        country_code: Some("86".into()),
    }
}
