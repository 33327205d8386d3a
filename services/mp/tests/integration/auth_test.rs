use chrono::Utc;

use yiya_auth_types::token::TokenType;
use yiya_mp::domain::types::{MP_ROLE, PhoneInfo};
use yiya_mp::error::MpServiceError;
use yiya_mp::usecase::auth::{BindPhoneUseCase, LoginByCodeUseCase, ResolveMpUserUseCase};
use yiya_testing::auth::MockAuth;

use crate::helpers::{MockMpUserRepo, MockWeChat, phone_info, test_issuer, test_user};

fn login(
    users: &MockMpUserRepo,
    wechat: MockWeChat,
) -> LoginByCodeUseCase<MockMpUserRepo, MockWeChat> {
    LoginByCodeUseCase {
        users: users.clone(),
        wechat,
        issuer: test_issuer(),
    }
}

// ── login_by_code ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_user_on_first_login() {
    let users = MockMpUserRepo::default();
    let wechat = MockWeChat::default().session("code-1", "openid-1", Some("union-1"));

    let out = login(&users, wechat).execute("code-1").await.unwrap();

    assert!(out.is_new_user);
    assert!(out.need_bind_phone);
    assert_eq!(out.expires_in, test_issuer().access_ttl());
    assert_eq!(users.len(), 1);

    let claims = test_issuer()
        .validate(&out.access_token, TokenType::Access)
        .unwrap();
    assert_eq!(claims.role.as_deref(), Some(MP_ROLE));
    assert_eq!(claims.username, "openid-1");

    let stored = users.get(claims.subject_id().unwrap()).unwrap();
    assert_eq!(stored.nickname.as_deref(), Some("微信用户"));
    assert_eq!(stored.session_key.as_deref(), Some("sk-code-1"));
    assert_eq!(stored.unionid.as_deref(), Some("union-1"));

    test_issuer()
        .validate(&out.refresh_token, TokenType::Refresh)
        .unwrap();
}

#[tokio::test]
async fn should_refresh_session_for_returning_user() {
    let mut existing = test_user(7, "openid-7");
    existing.phone = Some("13800138000".into());
    existing.unionid = Some("union-old".into());
    let users = MockMpUserRepo::with(vec![existing]);
    let wechat = MockWeChat::default().session("code-7", "openid-7", None);

    let out = login(&users, wechat).execute("code-7").await.unwrap();

    assert!(!out.is_new_user);
    assert!(!out.need_bind_phone);
    assert_eq!(users.len(), 1);
    let stored = users.get(7).unwrap();
    assert_eq!(stored.session_key.as_deref(), Some("sk-code-7"));
    // Absent unionid keeps the stored one.
    assert_eq!(stored.unionid.as_deref(), Some("union-old"));
}

#[tokio::test]
async fn should_surface_wechat_errors() {
    let users = MockMpUserRepo::default();
    let result = login(&users, MockWeChat::default()).execute("bogus").await;
    assert!(matches!(result, Err(MpServiceError::WeChat(_))));
    assert_eq!(users.len(), 0);
}

#[tokio::test]
async fn should_reject_blank_code() {
    let users = MockMpUserRepo::default();
    let result = login(&users, MockWeChat::default()).execute("  ").await;
    assert!(matches!(result, Err(MpServiceError::InvalidInput(_))));
}

#[tokio::test]
async fn should_not_revive_deleted_account() {
    let mut deleted = test_user(3, "openid-3");
    deleted.deleted_at = Some(Utc::now());
    let users = MockMpUserRepo::with(vec![deleted]);
    let wechat = MockWeChat::default().session("code-3", "openid-3", None);

    let result = login(&users, wechat).execute("code-3").await;
    assert!(matches!(result, Err(MpServiceError::UserNotFound)));
    assert_eq!(users.len(), 1);
}

// ── bind_phone ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_bind_phone_number() {
    let users = MockMpUserRepo::with(vec![test_user(1, "openid-1")]);
    let usecase = BindPhoneUseCase {
        users: users.clone(),
        wechat: MockWeChat::default().phone("p-1", phone_info("13900139000")),
    };

    let phone = usecase.execute(1, "p-1").await.unwrap();

    assert_eq!(phone, "13900139000");
    assert_eq!(users.get(1).unwrap().phone.as_deref(), Some("13900139000"));
}

#[tokio::test]
async fn should_fall_back_to_pure_phone_number() {
    let users = MockMpUserRepo::with(vec![test_user(1, "openid-1")]);
    let info = PhoneInfo {
        pure_phone_number: Some("13700137000".into()),
        ..Default::default()
    };
    let usecase = BindPhoneUseCase {
        users: users.clone(),
        wechat: MockWeChat::default().phone("p-1", info),
    };

    assert_eq!(usecase.execute(1, "p-1").await.unwrap(), "13700137000");
}

#[tokio::test]
async fn should_fail_when_phone_info_is_empty() {
    let users = MockMpUserRepo::with(vec![test_user(1, "openid-1")]);
    let usecase = BindPhoneUseCase {
        users: users.clone(),
        wechat: MockWeChat::default().phone("p-1", PhoneInfo::default()),
    };

    let result = usecase.execute(1, "p-1").await;
    assert!(matches!(result, Err(MpServiceError::WeChat(_))));
    assert!(users.get(1).unwrap().phone.is_none());
}

// ── resolve ──────────────────────────────────────────────────────────────────

fn resolver(users: &MockMpUserRepo) -> ResolveMpUserUseCase<MockMpUserRepo> {
    ResolveMpUserUseCase {
        users: users.clone(),
        issuer: test_issuer(),
    }
}

#[tokio::test]
async fn should_resolve_mp_access_token() {
    let users = MockMpUserRepo::with(vec![test_user(5, "openid-5")]);
    let token = MockAuth::mp(5, "openid-5").access_token().token;

    let user = resolver(&users).execute(&token).await.unwrap();
    assert_eq!(user.openid, "openid-5");
}

#[tokio::test]
async fn should_reject_admin_token() {
    let users = MockMpUserRepo::with(vec![test_user(5, "openid-5")]);
    let token = MockAuth::admin(5, "admin").access_token().token;

    let result = resolver(&users).execute(&token).await;
    assert!(matches!(result, Err(MpServiceError::InvalidToken)));
}

#[tokio::test]
async fn should_reject_refresh_token() {
    let users = MockMpUserRepo::with(vec![test_user(5, "openid-5")]);
    let token = MockAuth::mp(5, "openid-5").refresh_token().token;

    let result = resolver(&users).execute(&token).await;
    assert!(matches!(result, Err(MpServiceError::InvalidToken)));
}

#[tokio::test]
async fn should_reject_token_for_deleted_user() {
    let mut deleted = test_user(5, "openid-5");
    deleted.deleted_at = Some(Utc::now());
    let users = MockMpUserRepo::with(vec![deleted]);
    let token = MockAuth::mp(5, "openid-5").access_token().token;

    let result = resolver(&users).execute(&token).await;
    assert!(matches!(result, Err(MpServiceError::InvalidToken)));
}
